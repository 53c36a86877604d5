//! Itinerary status automaton
//!
//! Decides the status a save resolves to, when a read may promote an
//! upcoming trip, and which fields the form layer must treat as locked.
//! All comparisons use naive local dates and times.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use super::itineraries::{Flight, ItineraryStatus};
use crate::scheduling::time;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("itinerary is completed and read-only")]
    ReadOnly,

    #[error("cannot {action} an itinerary in status {from}")]
    InvalidTransition {
        from: ItineraryStatus,
        action: &'static str,
    },
}

/// The finalize action resolves to `Active` once the departure date is
/// today or earlier, otherwise `Upcoming`.
pub fn finalize(departure_date: Option<NaiveDate>, today: NaiveDate) -> ItineraryStatus {
    if has_departed(departure_date, today) {
        ItineraryStatus::Active
    } else {
        ItineraryStatus::Upcoming
    }
}

/// Status for a newly created itinerary.
pub fn resolve_initial(
    requested: Option<ItineraryStatus>,
    departure_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ItineraryStatus {
    if requests_finalize(requested) {
        finalize(departure_date, today)
    } else {
        ItineraryStatus::Draft
    }
}

/// Status for a re-save of an existing itinerary.
///
/// `Upcoming` is pinned, `Disrupted` clears back to `Active`, `Active`
/// stays `Active`, and only a `Draft` honours a finalize request.
/// `Completed` and `Disrupted` are never save-path targets.
pub fn resolve_resave(
    current: ItineraryStatus,
    requested: Option<ItineraryStatus>,
    departure_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<ItineraryStatus, LifecycleError> {
    match current {
        ItineraryStatus::Completed => Err(LifecycleError::ReadOnly),
        ItineraryStatus::Upcoming => Ok(ItineraryStatus::Upcoming),
        ItineraryStatus::Disrupted | ItineraryStatus::Active => Ok(ItineraryStatus::Active),
        ItineraryStatus::Draft => Ok(resolve_initial(requested, departure_date, today)),
    }
}

/// Promotion a read should apply, if any.
pub fn promotion(
    current: ItineraryStatus,
    departure_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<ItineraryStatus> {
    (current == ItineraryStatus::Upcoming && has_departed(departure_date, today))
        .then_some(ItineraryStatus::Active)
}

pub fn report_disruption(current: ItineraryStatus) -> Result<ItineraryStatus, LifecycleError> {
    match current {
        ItineraryStatus::Completed => Err(LifecycleError::ReadOnly),
        _ => Ok(ItineraryStatus::Disrupted),
    }
}

pub fn complete(current: ItineraryStatus) -> Result<ItineraryStatus, LifecycleError> {
    match current {
        ItineraryStatus::Completed => Err(LifecycleError::InvalidTransition {
            from: current,
            action: "complete",
        }),
        _ => Ok(ItineraryStatus::Completed),
    }
}

/// Whether moving from `previous` (or a new record) to `resolved` finalizes a draft.
pub fn leaves_draft(previous: Option<ItineraryStatus>, resolved: ItineraryStatus) -> bool {
    matches!(previous, None | Some(ItineraryStatus::Draft)) && resolved != ItineraryStatus::Draft
}

fn requests_finalize(requested: Option<ItineraryStatus>) -> bool {
    matches!(
        requested,
        Some(ItineraryStatus::Upcoming) | Some(ItineraryStatus::Active)
    )
}

fn has_departed(departure_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    departure_date.is_some_and(|date| date <= today)
}

/// Which parts of an itinerary the form layer may edit.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FieldLocks {
    pub itinerary: bool,
    pub departure_flight: bool,
    pub return_flight: bool,
    pub activities: bool,
}

impl FieldLocks {
    const OPEN: Self = Self {
        itinerary: false,
        departure_flight: false,
        return_flight: false,
        activities: false,
    };

    const SEALED: Self = Self {
        itinerary: true,
        departure_flight: true,
        return_flight: true,
        activities: true,
    };
}

/// Field locks for an itinerary in `status`.
///
/// While `Active`, the departure flight locks once its arrival moment has
/// passed. Return flights and activities never lock outside `Completed`.
pub fn field_locks(
    status: ItineraryStatus,
    departure: Option<&Flight>,
    now: NaiveDateTime,
) -> FieldLocks {
    match status {
        ItineraryStatus::Completed => FieldLocks::SEALED,
        ItineraryStatus::Active => FieldLocks {
            departure_flight: departure.is_some_and(|flight| has_landed(flight, now)),
            ..FieldLocks::OPEN
        },
        _ => FieldLocks::OPEN,
    }
}

fn has_landed(flight: &Flight, now: NaiveDateTime) -> bool {
    let Some(date) = flight.date else {
        return false;
    };
    let Some(minutes) = time::parse_minutes(&flight.arrival_time) else {
        return false;
    };
    let arrival = date.and_hms_opt(0, 0, 0).map(|midnight| {
        midnight + chrono::Duration::minutes(i64::from(minutes))
    });
    arrival.is_some_and(|arrival| arrival < now)
}
