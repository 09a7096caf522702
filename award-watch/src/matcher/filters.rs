//! Per-record filter predicates.
//!
//! Each predicate looks at one availability record and one piece of route
//! configuration. They are total: missing restrictions accept everything.

use crate::domain::AvailabilityRecord;
use crate::watchlist::RoutePreference;

/// Whether the record is operated by one of the required airlines.
///
/// Matching is by substring against the API's comma-joined airline string,
/// so a required `"A"` matches a record flown by `"AA"`. Case-sensitive.
pub fn has_required_airline(record: &AvailabilityRecord, required: Option<&[String]>) -> bool {
    match required {
        None => true,
        Some([]) => true,
        Some(required) => any_airline(&record.airlines, required),
    }
}

/// Whether the record satisfies a nonstop requirement.
pub fn is_direct_when_required(record: &AvailabilityRecord, direct_only: bool) -> bool {
    !direct_only || record.direct
}

/// Whether the record fits one of the route's sub-routes.
///
/// An empty preference list accepts every record. Otherwise the first
/// preference whose origins, destinations and (when non-empty) airlines
/// all match wins.
pub fn matches_route_preferences(
    record: &AvailabilityRecord,
    preferences: &[RoutePreference],
) -> bool {
    if preferences.is_empty() {
        return true;
    }

    preferences.iter().any(|pref| {
        pref.origins.contains(&record.origin)
            && pref.destinations.contains(&record.destination)
            && (pref.airlines.is_empty() || any_airline(&record.airlines, &pref.airlines))
    })
}

/// Whether the mileage cost is at or below the cap.
pub fn within_mileage_cap(record: &AvailabilityRecord, max_miles: u32) -> bool {
    record.miles <= max_miles
}

fn any_airline(airlines: &str, wanted: &[String]) -> bool {
    wanted.iter().any(|code| airlines.contains(code.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AirportCode;
    use chrono::NaiveDate;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn record(origin: &str, destination: &str, airlines: &str) -> AvailabilityRecord {
        AvailabilityRecord {
            source: "alaska".to_string(),
            origin: code(origin),
            destination: code(destination),
            date: NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
            available: true,
            remaining_seats: 2,
            miles: 75_000,
            airlines: airlines.to_string(),
            direct: false,
        }
    }

    fn strings(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn airline_absent_or_empty_accepts_all() {
        let r = record("ORD", "HKG", "CX");
        assert!(has_required_airline(&r, None));
        assert!(has_required_airline(&r, Some(&[][..])));
    }

    #[test]
    fn airline_any_overlap() {
        let r = record("ORD", "HND", "AA, JL");
        assert!(has_required_airline(&r, Some(strings(&["JL"]).as_slice())));
        assert!(has_required_airline(&r, Some(strings(&["NH", "AA"]).as_slice())));
        assert!(!has_required_airline(&r, Some(strings(&["NH"]).as_slice())));
    }

    #[test]
    fn airline_match_is_substring() {
        // A partial code matches inside a longer one.
        let r = record("ORD", "HND", "AA");
        assert!(has_required_airline(&r, Some(strings(&["A"]).as_slice())));
    }

    #[test]
    fn airline_match_is_case_sensitive() {
        let r = record("ORD", "HND", "AA");
        assert!(!has_required_airline(&r, Some(strings(&["aa"]).as_slice())));
    }

    #[test]
    fn direct_requirement() {
        let mut r = record("ORD", "HND", "AA");
        assert!(is_direct_when_required(&r, false));
        assert!(!is_direct_when_required(&r, true));

        r.direct = true;
        assert!(is_direct_when_required(&r, true));
    }

    #[test]
    fn empty_preferences_accept_all() {
        assert!(matches_route_preferences(&record("ORD", "HND", "AA"), &[]));
    }

    #[test]
    fn preference_needs_full_match() {
        let prefs = vec![
            RoutePreference::new(&[code("AAA")], &[code("BBB")], &[]),
            RoutePreference::new(&[code("CCC")], &[code("DDD")], &["X"]),
        ];

        assert!(matches_route_preferences(&record("AAA", "BBB", "Y"), &prefs));
        assert!(!matches_route_preferences(&record("CCC", "DDD", "Z"), &prefs));
        assert!(matches_route_preferences(&record("CCC", "DDD", "X"), &prefs));
        // Origin of one rule with destination of another is not a match.
        assert!(!matches_route_preferences(&record("AAA", "DDD", "X"), &prefs));
    }

    #[test]
    fn merged_alaska_preferences() {
        let prefs = vec![
            RoutePreference::new(&[code("ORD"), code("DFW")], &[code("HND"), code("NRT")], &["AA"]),
            RoutePreference::new(&[code("LAX"), code("SFO")], &[code("TPE")], &["JX"]),
        ];

        assert!(matches_route_preferences(&record("DFW", "NRT", "AA"), &prefs));
        assert!(matches_route_preferences(&record("SFO", "TPE", "JX"), &prefs));
        assert!(!matches_route_preferences(&record("SFO", "TPE", "BR"), &prefs));
        assert!(!matches_route_preferences(&record("ORD", "TPE", "AA"), &prefs));
    }

    #[test]
    fn mileage_cap_is_inclusive() {
        let mut r = record("ORD", "HND", "AA");
        r.miles = 75_000;
        assert!(within_mileage_cap(&r, 75_000));

        r.miles = 75_001;
        assert!(!within_mileage_cap(&r, 75_000));
    }

    #[test]
    fn unset_mileage_always_passes() {
        let mut r = record("ORD", "HND", "AA");
        r.miles = 0;
        assert!(within_mileage_cap(&r, 0));
    }
}
