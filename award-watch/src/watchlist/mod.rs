//! Route configuration.
//!
//! A watchlist is a static tree of search periods, each holding the
//! loyalty programs searched in it, each holding the routes searched for
//! that program. It is built from literals; there is no remote config.

mod builtin;
mod model;

pub use builtin::builtin;
pub use model::{Program, RoutePreference, RouteSpec, SearchPeriod, Watchlist, WatchlistError};
