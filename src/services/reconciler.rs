//! Day/activity reconciliation
//!
//! Every save replaces an itinerary's days wholesale. The replacement tree is
//! built completely in memory first (dense day numbers, freshly computed
//! activity order) and then handed to the store, which swaps it in inside a
//! single transaction and returns what it committed.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Day, DayDraft, Flight, HotelStay, Itinerary, ItineraryHeader, TreeReplacement,
};
use crate::scheduling::order::{compute_order, in_display_order};
use crate::store::{ItineraryStore, StoreResult, UpdateGuard};

/// Build persisted days from incoming groups.
///
/// Groups are stably sorted by their supplied day number (missing numbers
/// last), renumbered `1..N`, and each day's activities are ordered.
pub fn build_days(mut drafts: Vec<DayDraft>) -> Vec<Day> {
    drafts.sort_by_key(|d| d.day_number.unwrap_or(i32::MAX));

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| Day {
            day_number: index as i32 + 1,
            activities: in_display_order(compute_order(draft.activities)),
        })
        .collect()
}

/// Assemble a tree replacement; `None` collections stay untouched.
pub fn plan(
    flights: Option<Vec<Flight>>,
    hotel_stays: Option<Vec<HotelStay>>,
    days: Option<Vec<DayDraft>>,
) -> TreeReplacement {
    TreeReplacement {
        flights,
        hotel_stays,
        days: days.map(build_days),
    }
}

#[derive(Clone)]
pub struct Reconciler {
    store: Arc<dyn ItineraryStore>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn ItineraryStore>) -> Self {
        Self { store }
    }

    /// Write a new itinerary with its full tree.
    pub async fn create(
        &self,
        header: ItineraryHeader,
        tree: TreeReplacement,
    ) -> StoreResult<Itinerary> {
        let day_count = tree.days.as_ref().map_or(0, Vec::len);
        let snapshot = self.store.insert(header, tree).await?;

        tracing::debug!(
            itinerary_id = %snapshot.id,
            days = day_count,
            "Wrote new itinerary tree"
        );
        Ok(snapshot)
    }

    /// Replace the collections present in `tree` for an existing itinerary.
    pub async fn replace(
        &self,
        id: Uuid,
        header: ItineraryHeader,
        tree: TreeReplacement,
        guard: UpdateGuard,
    ) -> StoreResult<Option<Itinerary>> {
        let replaces_days = tree.days.is_some();
        let snapshot = self.store.update(id, header, tree, guard).await?;

        if let Some(saved) = &snapshot {
            tracing::debug!(
                itinerary_id = %id,
                version = saved.version,
                days = saved.days.len(),
                replaced_days = replaces_days,
                "Replaced itinerary tree"
            );
        }
        Ok(snapshot)
    }
}
