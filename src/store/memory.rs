//! In-process itinerary store
//!
//! Each write builds the replacement record completely and swaps it in under
//! one write lock, so readers see either the old or the new tree.

use chrono::Utc;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{ItineraryStore, StoreError, StoreResult, UpdateGuard};
use crate::domain::{Itinerary, ItineraryHeader, ItineraryStatus, TreeReplacement};

#[derive(Clone, Default)]
pub struct MemoryItineraryStore {
    inner: Arc<RwLock<HashMap<Uuid, Itinerary>>>,
}

impl MemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply(record: &mut Itinerary, header: ItineraryHeader, tree: TreeReplacement) {
    record.client_name = header.client_name;
    record.destination = header.destination;
    record.status = header.status;
    record.date_range = header.date_range;
    record.details = header.details;
    if let Some(flights) = tree.flights {
        record.flights = flights;
    }
    if let Some(hotel_stays) = tree.hotel_stays {
        record.hotel_stays = hotel_stays;
    }
    if let Some(days) = tree.days {
        record.days = days;
    }
}

impl ItineraryStore for MemoryItineraryStore {
    fn insert(
        &self,
        header: ItineraryHeader,
        tree: TreeReplacement,
    ) -> BoxFuture<'_, StoreResult<Itinerary>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let now = Utc::now();
            let mut record = Itinerary {
                id: Uuid::new_v4(),
                client_name: String::new(),
                destination: String::new(),
                status: ItineraryStatus::Draft,
                date_range: String::new(),
                details: Default::default(),
                flights: Vec::new(),
                hotel_stays: Vec::new(),
                days: Vec::new(),
                version: 1,
                created_at: now,
                updated_at: now,
            };
            apply(&mut record, header, tree);

            inner.write().insert(record.id, record.clone());
            Ok(record)
        })
    }

    fn update(
        &self,
        id: Uuid,
        header: ItineraryHeader,
        tree: TreeReplacement,
        precondition: UpdateGuard,
    ) -> BoxFuture<'_, StoreResult<Option<Itinerary>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut guard = inner.write();
            let Some(current) = guard.get(&id) else {
                return Ok(None);
            };
            if current.status != precondition.status {
                return Err(StoreError::StatusConflict {
                    expected: precondition.status,
                    actual: current.status,
                });
            }
            if let Some(expected) = precondition.version {
                if expected != current.version {
                    return Err(StoreError::VersionConflict {
                        expected,
                        actual: current.version,
                    });
                }
            }

            let mut next = current.clone();
            apply(&mut next, header, tree);
            next.version += 1;
            next.updated_at = Utc::now();

            guard.insert(id, next.clone());
            Ok(Some(next))
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, StoreResult<Option<Itinerary>>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.read().get(&id).cloned()) })
    }

    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<Itinerary>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut all: Vec<Itinerary> = inner.read().values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
            Ok(all)
        })
    }

    fn transition_status(
        &self,
        id: Uuid,
        from: ItineraryStatus,
        to: ItineraryStatus,
    ) -> BoxFuture<'_, StoreResult<bool>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut guard = inner.write();
            match guard.get_mut(&id) {
                Some(record) if record.status == from => {
                    record.status = to;
                    record.version += 1;
                    record.updated_at = Utc::now();
                    Ok(true)
                }
                _ => Ok(false),
            }
        })
    }

    fn delete(&self, id: Uuid) -> BoxFuture<'_, StoreResult<bool>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.write().remove(&id).is_some()) })
    }

    fn health_check(&self) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
