//! Activity display order
//!
//! The only place `order` values are produced. Every write path that
//! persists activities goes through [`compute_order`].

use crate::domain::itineraries::{Activity, ActivityDraft};

use super::time;

/// Assign 1-based chronological order to a day's activities.
///
/// Activities come back in input position, each carrying its rank.
/// Valid times sort by their zero-padded `HH:MM` form, unscheduled ones
/// after all of them; ties keep their input sequence.
pub fn compute_order(activities: Vec<ActivityDraft>) -> Vec<Activity> {
    let ranks = rank(activities.iter().map(|a| a.time.as_str()));

    activities
        .into_iter()
        .zip(ranks)
        .map(|(draft, order)| Activity::from_draft(draft, order))
        .collect()
}

/// Rank raw time strings; `result[i]` is the 1-based order of `times[i]`.
pub fn rank<'a>(times: impl IntoIterator<Item = &'a str>) -> Vec<i32> {
    let mut keyed: Vec<(bool, String, usize)> = times
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let normalized = time::normalize(raw);
            (normalized.is_empty(), normalized, index)
        })
        .collect();

    keyed.sort();

    let mut ranks = vec![0; keyed.len()];
    for (position, (_, _, index)) in keyed.into_iter().enumerate() {
        ranks[index] = position as i32 + 1;
    }
    ranks
}

/// Sort persisted activities by their order value.
pub fn in_display_order(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by_key(|a| a.order);
    activities
}
