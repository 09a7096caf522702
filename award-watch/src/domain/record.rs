//! Availability rows and qualifying matches.

use chrono::NaiveDate;

use super::AirportCode;

/// One availability row for a single date, route and program.
///
/// The cabin-specific fields hold the values for whichever cabin was
/// searched; the conversion from the API response picks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    /// Program the inventory belongs to, as reported by the API (e.g. "alaska").
    pub source: String,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub date: NaiveDate,
    /// Whether award space is open in the searched cabin.
    pub available: bool,
    pub remaining_seats: u32,
    /// Mileage cost; zero when the API left it blank.
    pub miles: u32,
    /// Operating airlines, comma-joined as the API sends them (e.g. "AA, JL").
    pub airlines: String,
    pub direct: bool,
}

impl AvailabilityRecord {
    /// Whether the searched cabin has bookable seats.
    pub fn has_seats(&self) -> bool {
        self.available && self.remaining_seats > 0
    }
}

/// A record that passed every filter for one configured route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub period: String,
    pub program: String,
    pub route_name: String,
    pub record: AvailabilityRecord,
}
