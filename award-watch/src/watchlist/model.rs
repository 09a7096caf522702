//! Watchlist configuration types.

use chrono::NaiveDate;

use crate::domain::{AirportCode, Cabin};

/// Error from validating a watchlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchlistError {
    /// A period's date range runs backwards
    #[error("period {period}: start date {start} is after end date {end}")]
    InvertedDates {
        period: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A route or preference has no origins or no destinations
    #[error("route {route:?} in {period}/{program}: {reason}")]
    InvalidRoute {
        period: String,
        program: String,
        route: String,
        reason: &'static str,
    },

    /// A period, program or route has an empty name
    #[error("empty name in {0}")]
    EmptyName(&'static str),
}

/// One alternative origin/destination/airline combination within a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePreference {
    pub origins: Vec<AirportCode>,
    pub destinations: Vec<AirportCode>,
    /// Empty means any airline.
    pub airlines: Vec<String>,
}

impl RoutePreference {
    /// Create a preference; pass an empty airline slice to accept any airline.
    pub fn new(origins: &[AirportCode], destinations: &[AirportCode], airlines: &[&str]) -> Self {
        Self {
            origins: origins.to_vec(),
            destinations: destinations.to_vec(),
            airlines: airlines.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Configuration for one search and the filters applied to its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Human-readable label shown in the digest.
    pub name: String,
    pub origins: Vec<AirportCode>,
    pub destinations: Vec<AirportCode>,
    pub cabin: Cabin,
    /// Inclusive upper bound on mileage cost.
    pub max_miles: u32,
    pub direct_only: bool,
    /// Required airlines; ignored when `route_preferences` is non-empty.
    pub airlines: Option<Vec<String>>,
    /// Alternative sub-routes, any one of which qualifies a record.
    pub route_preferences: Vec<RoutePreference>,
}

impl RouteSpec {
    /// Create a business-class route with no airline or directness filter.
    pub fn new(
        name: impl Into<String>,
        origins: &[AirportCode],
        destinations: &[AirportCode],
        max_miles: u32,
    ) -> Self {
        Self {
            name: name.into(),
            origins: origins.to_vec(),
            destinations: destinations.to_vec(),
            cabin: Cabin::default(),
            max_miles,
            direct_only: false,
            airlines: None,
            route_preferences: Vec::new(),
        }
    }

    /// Only accept nonstop itineraries.
    pub fn direct_only(mut self) -> Self {
        self.direct_only = true;
        self
    }

    /// Search a different cabin.
    pub fn with_cabin(mut self, cabin: Cabin) -> Self {
        self.cabin = cabin;
        self
    }

    /// Require at least one of these airlines.
    pub fn with_airlines(mut self, airlines: &[&str]) -> Self {
        self.airlines = Some(airlines.iter().map(|a| (*a).to_string()).collect());
        self
    }

    /// Accept only records matching one of these sub-routes.
    pub fn with_preferences(mut self, preferences: Vec<RoutePreference>) -> Self {
        self.route_preferences = preferences;
        self
    }

    fn validate(&self, period: &str, program: &str) -> Result<(), WatchlistError> {
        let invalid = |reason| WatchlistError::InvalidRoute {
            period: period.to_string(),
            program: program.to_string(),
            route: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(WatchlistError::EmptyName("route"));
        }
        if self.origins.is_empty() {
            return Err(invalid("no origins"));
        }
        if self.destinations.is_empty() {
            return Err(invalid("no destinations"));
        }
        for pref in &self.route_preferences {
            if pref.origins.is_empty() || pref.destinations.is_empty() {
                return Err(invalid("route preference without origins or destinations"));
            }
        }
        Ok(())
    }
}

/// A loyalty program and the routes searched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Source identifier as the API reports it (e.g. "alaska").
    pub name: String,
    /// Emoji shown next to the program in the digest.
    pub badge: String,
    pub routes: Vec<RouteSpec>,
}

impl Program {
    pub fn new(name: impl Into<String>, badge: impl Into<String>, routes: Vec<RouteSpec>) -> Self {
        Self {
            name: name.into(),
            badge: badge.into(),
            routes,
        }
    }
}

/// A named travel window searched across one or more programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPeriod {
    pub name: String,
    /// Heading used for this period in the digest.
    pub title: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub programs: Vec<Program>,
}

/// Everything a run searches, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Watchlist {
    pub periods: Vec<SearchPeriod>,
}

impl Watchlist {
    pub fn new(periods: Vec<SearchPeriod>) -> Self {
        Self { periods }
    }

    /// Iterate `(period, program, route)` triples in configuration order.
    pub fn routes(&self) -> impl Iterator<Item = (&SearchPeriod, &Program, &RouteSpec)> {
        self.periods.iter().flat_map(|period| {
            period.programs.iter().flat_map(move |program| {
                program
                    .routes
                    .iter()
                    .map(move |route| (period, program, route))
            })
        })
    }

    /// Total number of configured routes (one API call each).
    pub fn route_count(&self) -> usize {
        self.routes().count()
    }

    /// Look up a period by name.
    pub fn period(&self, name: &str) -> Option<&SearchPeriod> {
        self.periods.iter().find(|p| p.name == name)
    }

    /// Look up a program within a period.
    pub fn program(&self, period: &str, program: &str) -> Option<&Program> {
        self.period(period)?
            .programs
            .iter()
            .find(|p| p.name == program)
    }

    /// Check the structural invariants of every period, program and route.
    pub fn validate(&self) -> Result<(), WatchlistError> {
        for period in &self.periods {
            if period.name.is_empty() {
                return Err(WatchlistError::EmptyName("period"));
            }
            if period.start_date > period.end_date {
                return Err(WatchlistError::InvertedDates {
                    period: period.name.clone(),
                    start: period.start_date,
                    end: period.end_date,
                });
            }
            for program in &period.programs {
                if program.name.is_empty() {
                    return Err(WatchlistError::EmptyName("program"));
                }
                for route in &program.routes {
                    route.validate(&period.name, &program.name)?;
                }
            }
        }
        Ok(())
    }
}
