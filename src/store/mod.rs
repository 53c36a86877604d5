//! Itinerary persistence port
//!
//! A store writes a header plus whichever collections a save carries as one
//! atomic unit and hands back the canonical snapshot it just committed.

pub mod legacy;
pub mod memory;
pub mod postgres;

use futures::future::BoxFuture;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Itinerary, ItineraryHeader, ItineraryStatus, TreeReplacement};

pub use memory::MemoryItineraryStore;
pub use postgres::PgItineraryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    Decode(String),

    #[error("version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: i32, actual: i32 },

    #[error("status conflict: expected {expected}, found {actual}")]
    StatusConflict {
        expected: ItineraryStatus,
        actual: ItineraryStatus,
    },
}

/// What the stored row must still look like for an update to go through.
///
/// `status` is the status the new header was resolved from; `version` is
/// only checked when the caller supplied one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateGuard {
    pub status: ItineraryStatus,
    pub version: Option<i32>,
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait ItineraryStore: Send + Sync {
    /// Insert a new itinerary and its full tree.
    fn insert(
        &self,
        header: ItineraryHeader,
        tree: TreeReplacement,
    ) -> BoxFuture<'_, StoreResult<Itinerary>>;

    /// Overwrite the header and replace every collection present in `tree`.
    ///
    /// The write only happens while the stored row still satisfies `guard`.
    /// Returns `None` when the itinerary does not exist.
    fn update(
        &self,
        id: Uuid,
        header: ItineraryHeader,
        tree: TreeReplacement,
        guard: UpdateGuard,
    ) -> BoxFuture<'_, StoreResult<Option<Itinerary>>>;

    fn get(&self, id: Uuid) -> BoxFuture<'_, StoreResult<Option<Itinerary>>>;

    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<Itinerary>>>;

    /// Set `to` only if the stored status is still `from`.
    fn transition_status(
        &self,
        id: Uuid,
        from: ItineraryStatus,
        to: ItineraryStatus,
    ) -> BoxFuture<'_, StoreResult<bool>>;

    /// Delete an itinerary and everything it owns.
    fn delete(&self, id: Uuid) -> BoxFuture<'_, StoreResult<bool>>;

    fn health_check(&self) -> BoxFuture<'_, StoreResult<()>>;
}
