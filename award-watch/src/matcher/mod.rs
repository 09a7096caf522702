//! Route matching.
//!
//! Turns raw availability rows into matches: one search per configured
//! route, then a fixed pipeline of filters (program, seats, mileage cap,
//! route preferences or airlines, directness) per row.

mod filters;
mod search;

pub use filters::{
    has_required_airline, is_direct_when_required, matches_route_preferences, within_mileage_cap,
};
pub use search::{AvailabilitySource, Matcher, RouteFailure, SearchQuery, SearchSummary, qualifies};
