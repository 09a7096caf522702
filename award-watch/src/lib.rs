//! Award flight availability watcher.
//!
//! Each invocation searches a fixed watchlist of routes for award seats,
//! filters the results, and sends a Telegram digest: immediately when
//! something qualifies, otherwise at most once a day.

pub mod config;
pub mod digest;
pub mod domain;
pub mod matcher;
pub mod notify;
pub mod run;
pub mod seats;
pub mod throttle;
pub mod watchlist;
