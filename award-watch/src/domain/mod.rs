//! Domain types for the award watcher.
//!
//! Value types that enforce their invariants at construction time, plus
//! the availability rows and matches the rest of the crate passes around.

mod airport;
mod cabin;
mod record;

pub use airport::{AirportCode, InvalidAirportCode, join_codes};
pub use cabin::Cabin;
pub use record::{AvailabilityRecord, MatchResult};
