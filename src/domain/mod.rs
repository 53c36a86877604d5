//! Domain types and lifecycle rules

pub mod itineraries;
pub mod lifecycle;

// Re-export commonly used types
pub use itineraries::*;
