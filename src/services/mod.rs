//! Service layer: itinerary operations, tree reconciliation and the clock
//! they are evaluated against.

pub mod clock;
pub mod itineraries;
pub mod reconciler;

pub use clock::SystemClock;
pub use itineraries::{ItineraryError, ItineraryService};
