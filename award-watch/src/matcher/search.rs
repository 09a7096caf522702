//! Watchlist search.
//!
//! Runs one availability search per configured route and keeps the rows
//! that satisfy that route's filters.

use std::future::Future;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{AirportCode, AvailabilityRecord, Cabin, MatchResult};
use crate::seats::SeatsError;
use crate::watchlist::{RouteSpec, SearchPeriod, Watchlist};

use super::filters::{
    has_required_airline, is_direct_when_required, matches_route_preferences, within_mileage_cap,
};

/// Parameters for one availability search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origins: Vec<AirportCode>,
    pub destinations: Vec<AirportCode>,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub cabin: Cabin,
    pub direct_only: bool,
}

impl SearchQuery {
    /// Build the query for a route within a period.
    pub fn for_route(period: &SearchPeriod, route: &RouteSpec) -> Self {
        Self {
            origins: route.origins.clone(),
            destinations: route.destinations.clone(),
            start_date: period.start_date,
            end_date: period.end_date,
            cabin: route.cabin,
            direct_only: route.direct_only,
        }
    }
}

/// Trait for providing availability rows.
///
/// One call covers the full origin × destination product of a query.
/// This abstraction allows the search to be tested with mock data.
pub trait AvailabilitySource {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<AvailabilityRecord>, SeatsError>>;
}

/// A route whose search call failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFailure {
    pub period: String,
    pub program: String,
    pub route_name: String,
    pub message: String,
}

/// Result of searching a whole watchlist.
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    /// Qualifying records in discovery order.
    pub matches: Vec<MatchResult>,

    /// Routes skipped because their search failed.
    pub failures: Vec<RouteFailure>,

    /// Number of search calls made.
    pub routes_searched: usize,
}

/// Whether a record satisfies every filter of `route` for `program`.
pub fn qualifies(record: &AvailabilityRecord, program: &str, route: &RouteSpec) -> bool {
    if !record.source.eq_ignore_ascii_case(program) {
        return false;
    }

    if !record.has_seats() {
        return false;
    }

    if !within_mileage_cap(record, route.max_miles) {
        return false;
    }

    // Preferences replace the plain airline filter when present.
    let airline_ok = if route.route_preferences.is_empty() {
        has_required_airline(record, route.airlines.as_deref())
    } else {
        matches_route_preferences(record, &route.route_preferences)
    };
    if !airline_ok {
        return false;
    }

    is_direct_when_required(record, route.direct_only)
}

/// Searches every route of a watchlist against an availability source.
pub struct Matcher<'a, S: AvailabilitySource> {
    source: &'a S,
    watchlist: &'a Watchlist,
}

impl<'a, S: AvailabilitySource> Matcher<'a, S> {
    pub fn new(source: &'a S, watchlist: &'a Watchlist) -> Self {
        Self { source, watchlist }
    }

    /// Search each route in configuration order.
    ///
    /// A failed search skips its route; it never aborts the run.
    pub async fn search(&self) -> SearchSummary {
        let mut summary = SearchSummary::default();

        for (period, program, route) in self.watchlist.routes() {
            info!(route = %route.name, program = %program.name, "searching");

            let query = SearchQuery::for_route(period, route);
            summary.routes_searched += 1;

            let records = match self.source.search(&query).await {
                Ok(records) => records,
                Err(e) => {
                    warn!(
                        route = %route.name,
                        program = %program.name,
                        error = %e,
                        "search failed, skipping route"
                    );
                    summary.failures.push(RouteFailure {
                        period: period.name.clone(),
                        program: program.name.clone(),
                        route_name: route.name.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let before = summary.matches.len();
            let total = records.len();

            summary.matches.extend(
                records
                    .into_iter()
                    .filter(|record| qualifies(record, &program.name, route))
                    .map(|record| MatchResult {
                        period: period.name.clone(),
                        program: program.name.clone(),
                        route_name: route.name.clone(),
                        record,
                    }),
            );

            debug!(
                route = %route.name,
                rows = total,
                matched = summary.matches.len() - before,
                "filtered search results"
            );
        }

        summary
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
