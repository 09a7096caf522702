//! seats.aero partner API client.
//!
//! Provides the availability source used by the matcher. Key
//! characteristics of the API:
//! - Results come from a cache refreshed by seats.aero, not live airline
//!   inventory, so a search is cheap and idempotent
//! - Every row reports all four cabins; the client keeps the fields for
//!   the cabin that was queried
//! - Mileage costs arrive as strings and may be blank

mod client;
mod convert;
mod error;
mod types;

pub use client::{SeatsClient, SeatsConfig};
pub use convert::{ConversionError, convert_response, convert_row};
pub use error::SeatsError;
pub use types::{AvailabilityRow, MileageCost, RouteInfo, SearchResponse};
