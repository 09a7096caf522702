//! The deployed watchlist.

use chrono::NaiveDate;

use crate::domain::AirportCode;

use super::model::{Program, RoutePreference, RouteSpec, SearchPeriod, Watchlist};

const ORD: AirportCode = AirportCode::from_static("ORD");
const DFW: AirportCode = AirportCode::from_static("DFW");
const LAX: AirportCode = AirportCode::from_static("LAX");
const SFO: AirportCode = AirportCode::from_static("SFO");
const SEA: AirportCode = AirportCode::from_static("SEA");
const HKG: AirportCode = AirportCode::from_static("HKG");
const HND: AirportCode = AirportCode::from_static("HND");
const NRT: AirportCode = AirportCode::from_static("NRT");
const TPE: AirportCode = AirportCode::from_static("TPE");

/// Build the watchlist this deployment searches.
///
/// The Alaska direct route merges what would otherwise be two searches
/// (American into Tokyo, STARLUX into Taipei) into one API call and
/// separates them again with route preferences.
pub fn builtin() -> Watchlist {
    let dec_us_to_asia = SearchPeriod {
        name: "dec_us_to_asia".to_string(),
        title: "🎄 Dec 5-15, 2025: US→Asia".to_string(),
        start_date: ymd(2025, 12, 5),
        end_date: ymd(2025, 12, 15),
        programs: vec![
            Program::new(
                "alaska",
                "🇺🇸",
                vec![
                    RouteSpec::new(
                        "ORD→HKG (Any airline, connecting OK)",
                        &[ORD],
                        &[HKG],
                        85_000,
                    ),
                    RouteSpec::new(
                        "US→Asia (Direct flights only)",
                        &[ORD, DFW, LAX, SFO],
                        &[HND, NRT, TPE],
                        75_000,
                    )
                    .direct_only()
                    .with_preferences(vec![
                        RoutePreference::new(&[ORD, DFW], &[HND, NRT], &["AA"]),
                        RoutePreference::new(&[LAX, SFO], &[TPE], &["JX"]),
                    ]),
                ],
            ),
            Program::new(
                "aeroplan",
                "🇨🇦",
                vec![
                    RouteSpec::new(
                        "ORD/LAX/SFO/SEA→TPE/HND/NRT (Direct only)",
                        &[ORD, LAX, SFO, SEA],
                        &[TPE, HND, NRT],
                        87_500,
                    )
                    .direct_only(),
                ],
            ),
        ],
    };

    Watchlist::new(vec![dec_us_to_asia])
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
