//! Send/skip decisions for throttled notifications.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use tracing::{debug, warn};

use super::error::ThrottleError;
use super::store::{MarkerStore, Slot};

/// Outcome of asking whether a throttled message may go out.
#[derive(Debug)]
pub enum Verdict {
    /// This caller won the decision and has recorded the send.
    Send,
    /// Already sent for the current day or deployment.
    AlreadySent,
    /// Another process holds the lock and is deciding.
    Contended,
    /// State could not be locked, read or written; do not send.
    Failed(ThrottleError),
}

impl Verdict {
    /// Only [`Verdict::Send`] permits sending.
    pub fn should_send(&self) -> bool {
        matches!(self, Verdict::Send)
    }
}

/// Decides at most once per key whether to send a throttled notification.
///
/// Each decision runs under the slot's exclusive lock. Failing to get the
/// lock, or any error under it, means "do not send".
#[derive(Debug, Clone)]
pub struct ThrottleGate<S> {
    store: S,
}

impl<S: MarkerStore> ThrottleGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether this deployment's one startup notice should go out now.
    pub fn should_send_startup(&self, now: DateTime<Utc>) -> Verdict {
        self.decide(Slot::Startup, |store| {
            if store.read(Slot::Startup)?.is_some() {
                return Ok(false);
            }
            store.write(Slot::Startup, &now.to_rfc3339())?;
            Ok(true)
        })
    }

    /// Whether today's "no flights" digest should go out now.
    ///
    /// Days are UTC calendar days. An unreadable stored stamp means "do not
    /// send" today; it is replaced so the next day sends normally.
    pub fn should_send_daily_digest(&self, now: DateTime<Utc>) -> Verdict {
        let today = start_of_day(now);

        self.decide(Slot::Daily, |store| {
            let last = match store.read(Slot::Daily)? {
                None => None,
                Some(value) => match parse_timestamp(Slot::Daily, &value) {
                    Ok(last) => Some(last),
                    Err(e) => {
                        // Replace the unreadable stamp; only today is skipped.
                        store.write(Slot::Daily, &today.to_rfc3339())?;
                        return Err(e);
                    }
                },
            };

            if last.is_some_and(|last| last >= today) {
                return Ok(false);
            }
            store.write(Slot::Daily, &today.to_rfc3339())?;
            Ok(true)
        })
    }

    fn decide(
        &self,
        slot: Slot,
        decision: impl FnOnce(&S) -> Result<bool, ThrottleError>,
    ) -> Verdict {
        let _guard = match self.store.try_lock(slot) {
            Ok(Some(guard)) => guard,
            Ok(None) => {
                debug!(%slot, "throttle lock held by another run");
                return Verdict::Contended;
            }
            Err(e) => {
                warn!(%slot, error = %e, "throttle lock failed, not sending");
                return Verdict::Failed(e);
            }
        };

        match decision(&self.store) {
            Ok(true) => Verdict::Send,
            Ok(false) => Verdict::AlreadySent,
            Err(e) => {
                warn!(%slot, error = %e, "throttle state unusable, not sending");
                Verdict::Failed(e)
            }
        }
    }
}

/// Midnight UTC at the start of `now`'s day.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Parse a stored timestamp; one without an offset is taken as UTC.
fn parse_timestamp(slot: Slot, value: &str) -> Result<DateTime<Utc>, ThrottleError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ThrottleError::Parse {
            slot,
            value: value.to_string(),
        })
}
