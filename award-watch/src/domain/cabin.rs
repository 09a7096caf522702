//! Cabin classes.

use std::fmt;

/// Service class searched for on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cabin {
    Economy,
    PremiumEconomy,
    #[default]
    Business,
    First,
}

impl Cabin {
    /// Query parameter value for the `cabins` filter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Cabin::Economy => "economy",
            Cabin::PremiumEconomy => "premium",
            Cabin::Business => "business",
            Cabin::First => "first",
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}
