//! Conversion from seats.aero DTOs to domain records.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{AirportCode, AvailabilityRecord, Cabin, InvalidAirportCode};

use super::types::{AvailabilityRow, MileageCost, SearchResponse};

/// Error converting one API row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("bad airport: {0}")]
    Airport(#[from] InvalidAirportCode),

    #[error("bad date {0:?}")]
    Date(String),

    #[error("bad mileage cost {0:?}")]
    Mileage(String),

    #[error("missing {0}")]
    Missing(&'static str),
}

/// The field family for one cabin, borrowed out of a row.
struct CabinFields<'a> {
    available: Option<bool>,
    remaining_seats: Option<u32>,
    mileage_cost: Option<&'a MileageCost>,
    airlines: Option<&'a str>,
    direct: Option<bool>,
}

fn cabin_fields(row: &AvailabilityRow, cabin: Cabin) -> CabinFields<'_> {
    match cabin {
        Cabin::Economy => CabinFields {
            available: row.y_available,
            remaining_seats: row.y_remaining_seats,
            mileage_cost: row.y_mileage_cost.as_ref(),
            airlines: row.y_airlines.as_deref(),
            direct: row.y_direct,
        },
        Cabin::PremiumEconomy => CabinFields {
            available: row.w_available,
            remaining_seats: row.w_remaining_seats,
            mileage_cost: row.w_mileage_cost.as_ref(),
            airlines: row.w_airlines.as_deref(),
            direct: row.w_direct,
        },
        Cabin::Business => CabinFields {
            available: row.j_available,
            remaining_seats: row.j_remaining_seats,
            mileage_cost: row.j_mileage_cost.as_ref(),
            airlines: row.j_airlines.as_deref(),
            direct: row.j_direct,
        },
        Cabin::First => CabinFields {
            available: row.f_available,
            remaining_seats: row.f_remaining_seats,
            mileage_cost: row.f_mileage_cost.as_ref(),
            airlines: row.f_airlines.as_deref(),
            direct: row.f_direct,
        },
    }
}

/// Parse a mileage cost; blank or absent counts as zero.
fn parse_miles(cost: Option<&MileageCost>) -> Result<u32, ConversionError> {
    match cost {
        None => Ok(0),
        Some(MileageCost::Number(n)) => {
            u32::try_from(*n).map_err(|_| ConversionError::Mileage(n.to_string()))
        }
        Some(MileageCost::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            s.parse()
                .map_err(|_| ConversionError::Mileage(s.to_string()))
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ConversionError> {
    value.as_deref().ok_or(ConversionError::Missing(name))
}

/// Convert one row, reading the fields for `cabin`.
pub fn convert_row(
    row: &AvailabilityRow,
    cabin: Cabin,
) -> Result<AvailabilityRecord, ConversionError> {
    let route = row.route.as_ref().ok_or(ConversionError::Missing("Route"))?;
    let origin = AirportCode::parse(required(&route.origin_airport, "OriginAirport")?)?;
    let destination =
        AirportCode::parse(required(&route.destination_airport, "DestinationAirport")?)?;
    let source = required(&route.source, "Source")?;

    let raw_date = required(&row.date, "Date")?;
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| ConversionError::Date(raw_date.to_string()))?;

    let fields = cabin_fields(row, cabin);

    Ok(AvailabilityRecord {
        source: source.to_string(),
        origin,
        destination,
        date,
        available: fields.available.unwrap_or(false),
        remaining_seats: fields.remaining_seats.unwrap_or(0),
        miles: parse_miles(fields.mileage_cost)?,
        airlines: fields.airlines.unwrap_or_default().to_string(),
        direct: fields.direct.unwrap_or(false),
    })
}

/// Convert a whole response, dropping rows that cannot be converted.
pub fn convert_response(response: &SearchResponse, cabin: Cabin) -> Vec<AvailabilityRecord> {
    let Some(rows) = response.data.as_ref() else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| match convert_row(row, cabin) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(id = ?row.id, error = %e, "dropping unconvertible availability row");
                None
            }
        })
        .collect()
}
