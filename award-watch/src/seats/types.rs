//! seats.aero search response DTOs.
//!
//! These types map directly to the partner API's cached-search JSON. The
//! API reports every cabin on every row, with one field family per cabin
//! letter (`Y`, `W`, `J`, `F`). Fields are optional because the API omits
//! or nulls them for cabins with no space.

use serde::Deserialize;

/// Response from `GET /partnerapi/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Availability rows; absent or null when nothing matched.
    #[serde(default)]
    pub data: Option<Vec<AvailabilityRow>>,

    /// Number of rows in this page.
    #[serde(default)]
    pub count: Option<u32>,

    /// Whether more rows are available past this page.
    #[serde(rename = "hasMore", default)]
    pub has_more: Option<bool>,
}

/// Route metadata attached to each row.
///
/// Every field may be absent or null; conversion rejects rows missing one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteInfo {
    pub origin_airport: Option<String>,
    pub destination_airport: Option<String>,
    /// Mileage program the inventory comes from (e.g. "alaska").
    pub source: Option<String>,
}

/// Mileage cost as sent by the API: usually a numeric string, sometimes a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MileageCost {
    Number(u64),
    Text(String),
}

/// One availability row: a date on a route in one program.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityRow {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,

    #[serde(rename = "Route")]
    pub route: Option<RouteInfo>,

    /// Departure date (`YYYY-MM-DD`).
    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(rename = "YAvailable")]
    pub y_available: Option<bool>,
    #[serde(rename = "YRemainingSeats")]
    pub y_remaining_seats: Option<u32>,
    #[serde(rename = "YMileageCost")]
    pub y_mileage_cost: Option<MileageCost>,
    #[serde(rename = "YAirlines")]
    pub y_airlines: Option<String>,
    #[serde(rename = "YDirect")]
    pub y_direct: Option<bool>,

    #[serde(rename = "WAvailable")]
    pub w_available: Option<bool>,
    #[serde(rename = "WRemainingSeats")]
    pub w_remaining_seats: Option<u32>,
    #[serde(rename = "WMileageCost")]
    pub w_mileage_cost: Option<MileageCost>,
    #[serde(rename = "WAirlines")]
    pub w_airlines: Option<String>,
    #[serde(rename = "WDirect")]
    pub w_direct: Option<bool>,

    #[serde(rename = "JAvailable")]
    pub j_available: Option<bool>,
    #[serde(rename = "JRemainingSeats")]
    pub j_remaining_seats: Option<u32>,
    #[serde(rename = "JMileageCost")]
    pub j_mileage_cost: Option<MileageCost>,
    #[serde(rename = "JAirlines")]
    pub j_airlines: Option<String>,
    #[serde(rename = "JDirect")]
    pub j_direct: Option<bool>,

    #[serde(rename = "FAvailable")]
    pub f_available: Option<bool>,
    #[serde(rename = "FRemainingSeats")]
    pub f_remaining_seats: Option<u32>,
    #[serde(rename = "FMileageCost")]
    pub f_mileage_cost: Option<MileageCost>,
    #[serde(rename = "FAirlines")]
    pub f_airlines: Option<String>,
    #[serde(rename = "FDirect")]
    pub f_direct: Option<bool>,
}
