//! Notification message rendering.
//!
//! Turns a run's matches into one Telegram Markdown message. With matches
//! the message lists them grouped by period, program and route; without,
//! it is the daily "nothing found" update.

use chrono::{DateTime, Utc};

use crate::domain::MatchResult;
use crate::watchlist::Watchlist;

/// Matches shown per route before the rest are summarized.
const MAX_PER_ROUTE: usize = 5;

/// Default minutes between scheduled checks, quoted in messages.
const DEFAULT_CHECK_INTERVAL_MINS: u32 = 5;

/// A rendered message for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Digest {
    /// At least one match; always sent.
    Found(String),
    /// No matches; sent at most once a day.
    DailyUpdate(String),
}

impl Digest {
    /// The message text.
    pub fn text(&self) -> &str {
        match self {
            Digest::Found(text) | Digest::DailyUpdate(text) => text,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Digest::Found(_))
    }
}

/// Renders digests and notices for a watchlist.
#[derive(Debug, Clone)]
pub struct DigestFormatter<'a> {
    watchlist: &'a Watchlist,
    check_interval_mins: u32,
}

impl<'a> DigestFormatter<'a> {
    pub fn new(watchlist: &'a Watchlist) -> Self {
        Self {
            watchlist,
            check_interval_mins: DEFAULT_CHECK_INTERVAL_MINS,
        }
    }

    /// Set the check interval quoted in messages.
    pub fn with_check_interval(mut self, mins: u32) -> Self {
        self.check_interval_mins = mins;
        self
    }

    /// Render the digest for a run's matches.
    pub fn format(&self, results: &[MatchResult], now: DateTime<Utc>) -> Digest {
        if results.is_empty() {
            Digest::DailyUpdate(self.daily_update(now))
        } else {
            Digest::Found(self.found(results, now))
        }
    }

    /// One-off notice sent when a deployment first runs.
    pub fn startup_notice(&self, now: DateTime<Utc>) -> String {
        format!(
            "🚀 *Award watch started*\n📅 {}\n\n🔍 Monitoring:\n{}\n\n🛫 {} routes, checking every {} minutes",
            timestamp(now),
            self.monitored_periods(),
            self.watchlist.route_count(),
            self.check_interval_mins,
        )
    }

    /// Notice sent when a run fails. The error text is escaped so Telegram
    /// does not read it as markup.
    pub fn error_notice(&self, error: &str) -> String {
        format!(
            "⚠️ *Monitor Error*\n\nError: {}\n\nWill retry in {} minutes...",
            escape_markdown(error),
            self.check_interval_mins
        )
    }

    fn daily_update(&self, now: DateTime<Utc>) -> String {
        format!(
            "📊 *Daily Update*\n📅 {}\n\n❌ No flights found matching criteria\n\n🔍 Monitoring:\n{}\n\n⏰ Next check in {} minutes...",
            timestamp(now),
            self.monitored_periods(),
            self.check_interval_mins,
        )
    }

    fn monitored_periods(&self) -> String {
        self.watchlist
            .periods
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn found(&self, results: &[MatchResult], now: DateTime<Utc>) -> String {
        let mut message = format!("🚨 *FLIGHTS FOUND!* 🚨\n📅 {}\n\n", timestamp(now));

        for (period, in_period) in group_by(results.iter(), |m| m.period.as_str()) {
            let title = self
                .watchlist
                .period(period)
                .map_or(period, |p| p.title.as_str());
            message.push_str(title);
            message.push('\n');

            for (program, mut flights) in group_by(in_period, |m| m.program.as_str()) {
                flights.sort_by_key(|m| (m.record.date, m.record.miles));

                let badge = self
                    .watchlist
                    .program(period, program)
                    .map(|p| p.badge.as_str())
                    .filter(|b| !b.is_empty());
                message.push('\n');
                if let Some(badge) = badge {
                    message.push_str(badge);
                    message.push(' ');
                }
                message.push_str(&format!(
                    "*{}*: {} found\n",
                    program.to_uppercase(),
                    flights.len()
                ));

                for (route_name, route_flights) in group_by(flights, |m| m.route_name.as_str()) {
                    message.push_str(&format!("  📍 *{route_name}*:\n"));

                    for flight in route_flights.iter().take(MAX_PER_ROUTE) {
                        message.push_str(&render_match(flight));
                    }

                    if route_flights.len() > MAX_PER_ROUTE {
                        message.push_str(&format!(
                            "    ... and {} more flights\n\n",
                            route_flights.len() - MAX_PER_ROUTE
                        ));
                    }
                }
            }

            message.push('\n');
        }

        message
    }
}

fn render_match(m: &MatchResult) -> String {
    let r = &m.record;
    let indicator = if r.direct { "✈️" } else { "🔄" };
    format!(
        "    {indicator} `{}→{}` {}\n       💺 {} miles ({} seats) [{}]\n\n",
        r.origin,
        r.destination,
        r.date.format("%Y-%m-%d"),
        group_thousands(r.miles),
        r.remaining_seats,
        r.airlines,
    )
}

/// Backslash-escape the characters legacy Telegram Markdown treats as markup.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Group items by key, keeping groups and their members in first-seen order.
fn group_by<'r, K: PartialEq>(
    items: impl IntoIterator<Item = &'r MatchResult>,
    key: impl Fn(&'r MatchResult) -> K,
) -> Vec<(K, Vec<&'r MatchResult>)> {
    let mut groups: Vec<(K, Vec<&'r MatchResult>)> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

/// Format a number with comma thousands separators (`75000` → `75,000`).
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
