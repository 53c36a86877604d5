//! Itinerary operations
//!
//! Resolves lifecycle status and field locks for each request, then hands the
//! write to the [`Reconciler`]. Reads preview pending promotions without
//! writing; [`ItineraryService::apply_pending_promotions`] performs them.

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::clock::Clock;
use super::reconciler::{plan, Reconciler};
use crate::domain::lifecycle::{self, FieldLocks, LifecycleError};
use crate::domain::{
    find_flight, CreateItineraryRequest, Flight, FlightType, Itinerary, ItineraryHeader,
    ItineraryListing, ItineraryStatus, UpdateItineraryRequest,
};
use crate::scheduling::time;
use crate::store::{ItineraryStore, StoreError, UpdateGuard};

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("{0}")]
    Validation(String),

    #[error("itinerary {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    Locked(String),

    #[error("cannot {action} an itinerary in status {from}")]
    InvalidTransition {
        from: ItineraryStatus,
        action: &'static str,
    },

    #[error("itinerary was modified: expected version {expected}, found {actual}")]
    VersionConflict { expected: i32, actual: i32 },

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ItineraryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::VersionConflict { expected, actual } => {
                Self::VersionConflict { expected, actual }
            }
            // The status changed between resolving the save and writing it
            StoreError::StatusConflict {
                actual: ItineraryStatus::Completed,
                ..
            } => LifecycleError::ReadOnly.into(),
            StoreError::StatusConflict { actual, .. } => Self::InvalidTransition {
                from: actual,
                action: "save",
            },
            other => Self::Store(other),
        }
    }
}

impl From<LifecycleError> for ItineraryError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::ReadOnly => Self::Locked(e.to_string()),
            LifecycleError::InvalidTransition { from, action } => {
                Self::InvalidTransition { from, action }
            }
        }
    }
}

pub type ItineraryResult<T> = Result<T, ItineraryError>;

#[derive(Clone)]
pub struct ItineraryService {
    store: Arc<dyn ItineraryStore>,
    clock: Arc<dyn Clock>,
    reconciler: Reconciler,
}

impl ItineraryService {
    pub fn new(store: Arc<dyn ItineraryStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reconciler: Reconciler::new(store.clone()),
            store,
            clock,
        }
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await.is_ok()
    }

    pub async fn create(&self, req: CreateItineraryRequest) -> ItineraryResult<Itinerary> {
        validate_flight_times(&req.flights)?;

        let departure_date = find_flight(&req.flights, FlightType::Departure).and_then(|f| f.date);
        let status = lifecycle::resolve_initial(req.status, departure_date, self.clock.today());

        let header = ItineraryHeader {
            client_name: req.client_name,
            destination: req.destination,
            status,
            date_range: req.date_range,
            details: req.details,
        };
        if lifecycle::leaves_draft(None, status) {
            validate_finalize(&header, req.days.len())?;
        }

        let snapshot = self
            .reconciler
            .create(
                header,
                plan(Some(req.flights), Some(req.hotel_stays), Some(req.days)),
            )
            .await?;

        tracing::info!(
            itinerary_id = %snapshot.id,
            status = %snapshot.status,
            days = snapshot.days.len(),
            "Created itinerary"
        );
        Ok(snapshot)
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateItineraryRequest,
    ) -> ItineraryResult<Itinerary> {
        let current = self.load(id).await?;
        let locks = lifecycle::field_locks(
            current.status,
            current.flight(FlightType::Departure),
            self.clock.now(),
        );
        if locks.itinerary {
            return Err(LifecycleError::ReadOnly.into());
        }

        if let Some(flights) = &req.flights {
            validate_flight_times(flights)?;
            let incoming = find_flight(flights, FlightType::Departure);
            if locks.departure_flight && incoming != current.flight(FlightType::Departure) {
                return Err(ItineraryError::Locked(
                    "departure flight has already landed and can no longer be changed".into(),
                ));
            }
        }

        let departure_date = match &req.flights {
            Some(flights) => find_flight(flights, FlightType::Departure).and_then(|f| f.date),
            None => current.departure_date(),
        };
        let status = lifecycle::resolve_resave(
            current.status,
            req.status,
            departure_date,
            self.clock.today(),
        )?;

        let Itinerary {
            client_name,
            destination,
            status: resolved_from,
            date_range,
            mut details,
            days: current_days,
            ..
        } = current;
        details.apply(req.details);
        let header = ItineraryHeader {
            client_name: req.client_name.unwrap_or(client_name),
            destination: req.destination.unwrap_or(destination),
            status,
            date_range: req.date_range.unwrap_or(date_range),
            details,
        };

        if lifecycle::leaves_draft(Some(resolved_from), status) {
            let day_count = req.days.as_ref().map_or(current_days.len(), Vec::len);
            validate_finalize(&header, day_count)?;
        }

        let snapshot = self
            .reconciler
            .replace(
                id,
                header,
                plan(req.flights, req.hotel_stays, req.days),
                UpdateGuard {
                    status: resolved_from,
                    version: req.expected_version,
                },
            )
            .await?
            .ok_or(ItineraryError::NotFound(id))?;

        tracing::info!(
            itinerary_id = %id,
            from = %resolved_from,
            to = %snapshot.status,
            version = snapshot.version,
            "Updated itinerary"
        );
        Ok(snapshot)
    }

    /// Canonical snapshot, with any pending promotion already reflected.
    pub async fn get(&self, id: Uuid) -> ItineraryResult<Itinerary> {
        let mut itinerary = self.load(id).await?;
        self.preview_promotion(&mut itinerary);
        Ok(itinerary)
    }

    /// All itineraries plus the ids whose promotion still has to be written.
    pub async fn list(&self) -> ItineraryResult<ItineraryListing> {
        let mut data = self.store.list().await?;
        let pending_promotions: Vec<Uuid> = data
            .iter_mut()
            .filter_map(|itinerary| self.preview_promotion(itinerary).then_some(itinerary.id))
            .collect();

        tracing::debug!(
            count = data.len(),
            pending = pending_promotions.len(),
            "Listed itineraries"
        );
        Ok(ItineraryListing {
            data,
            pending_promotions,
        })
    }

    /// Promote each listed itinerary that is still due; returns those promoted.
    ///
    /// The rule is re-checked against stored state and written with a
    /// status compare-and-set, so repeating a call is harmless.
    pub async fn apply_pending_promotions(&self, ids: &[Uuid]) -> ItineraryResult<Vec<Uuid>> {
        let today = self.clock.today();
        let attempts = ids.iter().map(|&id| self.promote_one(id, today));

        let promoted: Vec<Uuid> = futures::future::try_join_all(attempts)
            .await?
            .into_iter()
            .flatten()
            .collect();

        if !promoted.is_empty() {
            tracing::info!(count = promoted.len(), "Promoted upcoming itineraries to active");
        }
        Ok(promoted)
    }

    pub async fn report_disruption(&self, id: Uuid) -> ItineraryResult<Itinerary> {
        self.transition(id, "report disruption", lifecycle::report_disruption)
            .await
    }

    pub async fn complete(&self, id: Uuid) -> ItineraryResult<Itinerary> {
        self.transition(id, "complete", lifecycle::complete).await
    }

    pub async fn field_locks(&self, id: Uuid) -> ItineraryResult<FieldLocks> {
        let itinerary = self.load(id).await?;
        Ok(lifecycle::field_locks(
            itinerary.status,
            itinerary.flight(FlightType::Departure),
            self.clock.now(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> ItineraryResult<()> {
        if !self.store.delete(id).await? {
            return Err(ItineraryError::NotFound(id));
        }
        tracing::info!(itinerary_id = %id, "Deleted itinerary");
        Ok(())
    }

    async fn promote_one(&self, id: Uuid, today: NaiveDate) -> ItineraryResult<Option<Uuid>> {
        let Some(itinerary) = self.store.get(id).await? else {
            return Ok(None);
        };
        let Some(to) = lifecycle::promotion(itinerary.status, itinerary.departure_date(), today)
        else {
            return Ok(None);
        };
        let promoted = self.store.transition_status(id, itinerary.status, to).await?;
        Ok(promoted.then_some(id))
    }

    async fn load(&self, id: Uuid) -> ItineraryResult<Itinerary> {
        self.store
            .get(id)
            .await?
            .ok_or(ItineraryError::NotFound(id))
    }

    async fn transition(
        &self,
        id: Uuid,
        action: &'static str,
        rule: fn(ItineraryStatus) -> Result<ItineraryStatus, LifecycleError>,
    ) -> ItineraryResult<Itinerary> {
        let current = self.load(id).await?;
        let to = rule(current.status)?;

        if !self.store.transition_status(id, current.status, to).await? {
            // Status moved underneath us between read and write
            return Err(ItineraryError::InvalidTransition {
                from: self.load(id).await?.status,
                action,
            });
        }

        tracing::info!(itinerary_id = %id, from = %current.status, to = %to, action, "Status changed");
        self.load(id).await
    }

    fn preview_promotion(&self, itinerary: &mut Itinerary) -> bool {
        match lifecycle::promotion(
            itinerary.status,
            itinerary.departure_date(),
            self.clock.today(),
        ) {
            Some(to) => {
                itinerary.status = to;
                true
            }
            None => false,
        }
    }
}

fn validate_flight_times(flights: &[Flight]) -> ItineraryResult<()> {
    for flight in flights {
        for (label, value) in [
            ("departure time", &flight.departure_time),
            ("arrival time", &flight.arrival_time),
        ] {
            if !value.trim().is_empty() && !time::is_valid(value) {
                return Err(ItineraryError::Validation(format!(
                    "{} flight {label} '{value}' is not a valid HH:MM time",
                    flight.flight_type.as_str()
                )));
            }
        }
    }
    Ok(())
}

fn validate_finalize(header: &ItineraryHeader, day_count: usize) -> ItineraryResult<()> {
    if header.client_name.trim().is_empty() {
        return Err(ItineraryError::Validation("client name is required".into()));
    }
    if header.destination.trim().is_empty() {
        return Err(ItineraryError::Validation("destination is required".into()));
    }
    let positive = match header.details.total_days {
        Some(total) => total > 0,
        None => day_count > 0,
    };
    if !positive {
        return Err(ItineraryError::Validation(
            "trip must have a positive number of days".into(),
        ));
    }
    Ok(())
}
