//! Scheduling engine: time normalization, activity ordering and
//! flight-derived synthetic activities.

pub mod auto_schedule;
pub mod order;
pub mod time;

pub use auto_schedule::apply_auto_schedule;
