//! Unit tests for the watchlist search.

use super::*;
use crate::watchlist::{Program, RoutePreference};
use std::collections::HashMap;
use std::sync::Mutex;

fn code(s: &str) -> AirportCode {
    AirportCode::parse(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn record(
    source: &str,
    origin: &str,
    destination: &str,
    day: &str,
    miles: u32,
) -> AvailabilityRecord {
    AvailabilityRecord {
        source: source.to_string(),
        origin: code(origin),
        destination: code(destination),
        date: date(day),
        available: true,
        remaining_seats: 2,
        miles,
        airlines: "AA".to_string(),
        direct: true,
    }
}

fn period(programs: Vec<Program>) -> SearchPeriod {
    SearchPeriod {
        name: "dec".to_string(),
        title: "December".to_string(),
        start_date: date("2025-12-05"),
        end_date: date("2025-12-15"),
        programs,
    }
}

/// Mock availability source keyed by the first origin of each query.
struct MockSource {
    responses: HashMap<AirportCode, Vec<AvailabilityRecord>>,
    failing: Vec<AirportCode>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockSource {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failing: Vec::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn respond(&mut self, origin: &str, records: Vec<AvailabilityRecord>) {
        self.responses.insert(code(origin), records);
    }

    fn fail(&mut self, origin: &str) {
        self.failing.push(code(origin));
    }

    fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl AvailabilitySource for MockSource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<AvailabilityRecord>, SeatsError> {
        self.queries.lock().unwrap().push(query.clone());

        let origin = query.origins[0];
        if self.failing.contains(&origin) {
            return Err(SeatsError::ApiError {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.responses.get(&origin).cloned().unwrap_or_default())
    }
}

#[tokio::test]
async fn one_call_per_route_with_period_dates() {
    let route =
        RouteSpec::new("r", &[code("ORD"), code("DFW")], &[code("HND")], 80_000).direct_only();
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![route])])]);

    let source = MockSource::new();
    let summary = Matcher::new(&source, &list).search().await;

    assert_eq!(summary.routes_searched, 1);
    assert_eq!(source.call_count(), 1);

    let queries = source.queries.lock().unwrap();
    assert_eq!(queries[0].origins, vec![code("ORD"), code("DFW")]);
    assert_eq!(queries[0].start_date, date("2025-12-05"));
    assert_eq!(queries[0].end_date, date("2025-12-15"));
    assert_eq!(queries[0].cabin, Cabin::Business);
    assert!(queries[0].direct_only);
}

#[tokio::test]
async fn failed_route_is_skipped_not_fatal() {
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![
        RouteSpec::new("broken", &[code("ORD")], &[code("HKG")], 85_000),
        RouteSpec::new("working", &[code("SEA")], &[code("HKG")], 85_000),
    ])])]);

    let mut source = MockSource::new();
    source.fail("ORD");
    source.respond("SEA", vec![record("alaska", "SEA", "HKG", "2025-12-07", 70_000)]);

    let summary = Matcher::new(&source, &list).search().await;

    assert_eq!(source.call_count(), 2);
    assert_eq!(summary.matches.len(), 1);
    assert_eq!(summary.matches[0].route_name, "working");
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].route_name, "broken");
    assert_eq!(summary.failures[0].message, "API error 503: unavailable");
}

#[tokio::test]
async fn all_routes_failing_gives_empty_matches() {
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![
        RouteSpec::new("a", &[code("ORD")], &[code("HKG")], 85_000),
    ])])]);

    let mut source = MockSource::new();
    source.fail("ORD");

    let summary = Matcher::new(&source, &list).search().await;

    assert!(summary.matches.is_empty());
    assert_eq!(summary.failures.len(), 1);
}

#[tokio::test]
async fn program_must_match_case_insensitively() {
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![
        RouteSpec::new("r", &[code("ORD")], &[code("HKG")], 85_000),
    ])])]);

    let mut source = MockSource::new();
    source.respond(
        "ORD",
        vec![
            record("Alaska", "ORD", "HKG", "2025-12-06", 60_000),
            record("aeroplan", "ORD", "HKG", "2025-12-06", 60_000),
        ],
    );

    let summary = Matcher::new(&source, &list).search().await;

    assert_eq!(summary.matches.len(), 1);
    assert_eq!(summary.matches[0].record.source, "Alaska");
    assert_eq!(summary.matches[0].program, "alaska");
}

#[tokio::test]
async fn unavailable_or_sold_out_rows_are_dropped() {
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![
        RouteSpec::new("r", &[code("ORD")], &[code("HKG")], 85_000),
    ])])]);

    let mut closed = record("alaska", "ORD", "HKG", "2025-12-06", 60_000);
    closed.available = false;
    let mut sold_out = record("alaska", "ORD", "HKG", "2025-12-07", 60_000);
    sold_out.remaining_seats = 0;

    let mut source = MockSource::new();
    source.respond("ORD", vec![closed, sold_out]);

    let summary = Matcher::new(&source, &list).search().await;
    assert!(summary.matches.is_empty());
}

#[tokio::test]
async fn mileage_cap_applies() {
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![
        RouteSpec::new("r", &[code("ORD")], &[code("HKG")], 85_000),
    ])])]);

    let mut source = MockSource::new();
    source.respond(
        "ORD",
        vec![
            record("alaska", "ORD", "HKG", "2025-12-06", 85_000),
            record("alaska", "ORD", "HKG", "2025-12-07", 85_001),
            record("alaska", "ORD", "HKG", "2025-12-08", 0),
        ],
    );

    let summary = Matcher::new(&source, &list).search().await;
    let days: Vec<_> = summary.matches.iter().map(|m| m.record.date).collect();
    assert_eq!(days, vec![date("2025-12-06"), date("2025-12-08")]);
}

#[tokio::test]
async fn preferences_take_precedence_over_airlines() {
    // The airline list would reject everything; the preferences accept AA into HND.
    let route = RouteSpec::new("merged", &[code("ORD")], &[code("HND"), code("TPE")], 75_000)
        .with_airlines(&["ZZ"])
        .with_preferences(vec![RoutePreference::new(&[code("ORD")], &[code("HND")], &["AA"])]);
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![route])])]);

    let mut source = MockSource::new();
    source.respond(
        "ORD",
        vec![
            record("alaska", "ORD", "HND", "2025-12-06", 60_000),
            record("alaska", "ORD", "TPE", "2025-12-06", 60_000),
        ],
    );

    let summary = Matcher::new(&source, &list).search().await;

    assert_eq!(summary.matches.len(), 1);
    assert_eq!(summary.matches[0].record.destination, code("HND"));
}

#[tokio::test]
async fn airline_filter_used_without_preferences() {
    let route = RouteSpec::new("r", &[code("ORD")], &[code("HKG")], 85_000).with_airlines(&["CX"]);
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![route])])]);

    let mut cathay = record("alaska", "ORD", "HKG", "2025-12-06", 60_000);
    cathay.airlines = "CX".to_string();

    let mut source = MockSource::new();
    source.respond(
        "ORD",
        vec![record("alaska", "ORD", "HKG", "2025-12-06", 60_000), cathay],
    );

    let summary = Matcher::new(&source, &list).search().await;

    assert_eq!(summary.matches.len(), 1);
    assert_eq!(summary.matches[0].record.airlines, "CX");
}

#[tokio::test]
async fn direct_only_drops_connections() {
    let route = RouteSpec::new("r", &[code("ORD")], &[code("HKG")], 85_000).direct_only();
    let list = Watchlist::new(vec![period(vec![Program::new("alaska", "", vec![route])])]);

    let mut connecting = record("alaska", "ORD", "HKG", "2025-12-06", 60_000);
    connecting.direct = false;

    let mut source = MockSource::new();
    source.respond("ORD", vec![connecting]);

    let summary = Matcher::new(&source, &list).search().await;
    assert!(summary.matches.is_empty());
}

#[tokio::test]
async fn matches_keep_discovery_order_and_tags() {
    let list = Watchlist::new(vec![period(vec![
        Program::new(
            "alaska",
            "",
            vec![RouteSpec::new("first", &[code("ORD")], &[code("HKG")], 85_000)],
        ),
        Program::new(
            "aeroplan",
            "",
            vec![RouteSpec::new("second", &[code("SEA")], &[code("TPE")], 87_500)],
        ),
    ])]);

    let mut source = MockSource::new();
    source.respond(
        "ORD",
        vec![
            record("alaska", "ORD", "HKG", "2025-12-10", 60_000),
            record("alaska", "ORD", "HKG", "2025-12-06", 60_000),
        ],
    );
    source.respond("SEA", vec![record("aeroplan", "SEA", "TPE", "2025-12-05", 87_500)]);

    let summary = Matcher::new(&source, &list).search().await;

    let tags: Vec<_> = summary
        .matches
        .iter()
        .map(|m| (m.period.as_str(), m.program.as_str(), m.route_name.as_str(), m.record.date))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("dec", "alaska", "first", date("2025-12-10")),
            ("dec", "alaska", "first", date("2025-12-06")),
            ("dec", "aeroplan", "second", date("2025-12-05")),
        ]
    );
}

#[test]
fn qualifies_checks_everything() {
    let route = RouteSpec::new("r", &[code("ORD")], &[code("HKG")], 85_000).direct_only();
    let good = record("alaska", "ORD", "HKG", "2025-12-06", 85_000);

    assert!(qualifies(&good, "alaska", &route));
    assert!(!qualifies(&good, "aeroplan", &route));
}
