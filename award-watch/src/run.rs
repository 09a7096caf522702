//! One scheduled check, end to end.
//!
//! Validates the watchlist, searches it, and decides which message (if
//! any) goes out. Errors and panics are caught here, reported to the chat
//! on a best-effort basis, and returned as [`RunOutcome::Error`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::digest::DigestFormatter;
use crate::matcher::{AvailabilitySource, Matcher};
use crate::notify::NotifyError;
use crate::throttle::{MarkerStore, ThrottleGate};
use crate::watchlist::{Watchlist, WatchlistError};

/// Something that can deliver a message to the user.
pub trait Notifier {
    fn deliver(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>>;
}

/// Errors that end a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Watchlist failed validation
    #[error("invalid watchlist: {0}")]
    Watchlist(#[from] WatchlistError),

    /// Something panicked mid-run
    #[error("run panicked: {0}")]
    Panicked(String),
}

/// Result of a run, printed by the binary as one JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunOutcome {
    Success { flights_found: usize },
    Error { error: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    /// Matches found, if the run succeeded.
    pub fn flights_found(&self) -> Option<usize> {
        match self {
            RunOutcome::Success { flights_found } => Some(*flights_found),
            RunOutcome::Error { .. } => None,
        }
    }
}

/// Runs checks of a watchlist against injected collaborators.
pub struct Driver<'a, S, N, M> {
    source: &'a S,
    notifier: &'a N,
    gate: &'a ThrottleGate<M>,
    watchlist: &'a Watchlist,
    formatter: DigestFormatter<'a>,
    announce_startup: bool,
}

impl<'a, S, N, M> Driver<'a, S, N, M>
where
    S: AvailabilitySource,
    N: Notifier,
    M: MarkerStore,
{
    pub fn new(
        source: &'a S,
        notifier: &'a N,
        gate: &'a ThrottleGate<M>,
        watchlist: &'a Watchlist,
    ) -> Self {
        Self {
            source,
            notifier,
            gate,
            watchlist,
            formatter: DigestFormatter::new(watchlist),
            announce_startup: false,
        }
    }

    /// Set the check interval quoted in messages.
    pub fn with_check_interval(mut self, mins: u32) -> Self {
        self.formatter = self.formatter.with_check_interval(mins);
        self
    }

    /// Send the once-per-deployment startup notice before searching.
    pub fn with_startup_notice(mut self, enabled: bool) -> Self {
        self.announce_startup = enabled;
        self
    }

    /// Run a check now.
    pub async fn run(&self) -> RunOutcome {
        self.run_at(Utc::now()).await
    }

    /// Run a check as if the time were `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> RunOutcome {
        let result = match AssertUnwindSafe(self.check(now)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(RunError::Panicked(panic_message(&*payload))),
        };

        match result {
            Ok(flights_found) => RunOutcome::Success { flights_found },
            Err(e) => {
                error!(error = %e, "run failed");
                let error = e.to_string();
                self.send(&self.formatter.error_notice(&error), "error notice")
                    .await;
                RunOutcome::Error { error }
            }
        }
    }

    async fn check(&self, now: DateTime<Utc>) -> Result<usize, RunError> {
        if self.announce_startup && self.gate.should_send_startup(now).should_send() {
            self.send(&self.formatter.startup_notice(now), "startup notice")
                .await;
        }

        self.watchlist.validate()?;

        let summary = Matcher::new(self.source, self.watchlist).search().await;
        let flights_found = summary.matches.len();
        info!(
            flights_found,
            routes = summary.routes_searched,
            failed = summary.failures.len(),
            "search complete"
        );

        let digest = self.formatter.format(&summary.matches, now);
        if digest.is_found() {
            self.send(digest.text(), "flight digest").await;
        } else if self.gate.should_send_daily_digest(now).should_send() {
            self.send(digest.text(), "daily update").await;
        } else {
            debug!("daily update already handled today");
        }

        Ok(flights_found)
    }

    /// Deliver a message, logging rather than propagating failure.
    async fn send(&self, text: &str, what: &str) {
        match self.notifier.deliver(text).await {
            Ok(()) => info!(what, "delivered"),
            Err(e) => warn!(what, error = %e, "delivery failed"),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
