//! Runtime configuration from environment variables.

use std::path::PathBuf;

/// Default minutes between scheduled checks.
const DEFAULT_CHECK_INTERVAL_MINS: u32 = 5;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors from loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required variable unset or empty
    #[error("{0} is not set")]
    Missing(&'static str),

    /// Variable set to something unusable
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything a run needs from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub seats_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,

    /// Where throttle markers and locks live. Shared by all runs.
    pub state_dir: PathBuf,

    /// Send a one-off notice the first time a deployment runs.
    pub announce_startup: bool,

    /// Quoted in messages; the schedule itself lives outside this program.
    pub check_interval_mins: u32,

    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl WatchConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let require = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let state_dir = get("AWARD_WATCH_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("award-watch"));

        let announce_startup = match get("AWARD_WATCH_ANNOUNCE_STARTUP") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                var: "AWARD_WATCH_ANNOUNCE_STARTUP",
                value,
            })?,
        };

        let check_interval_mins = match get("AWARD_WATCH_CHECK_INTERVAL_MINS") {
            None => DEFAULT_CHECK_INTERVAL_MINS,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(mins) if mins > 0 => mins,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "AWARD_WATCH_CHECK_INTERVAL_MINS",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            seats_api_key: require("SEATS_API_KEY")?,
            telegram_bot_token: require("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: require("TELEGRAM_CHAT_ID")?,
            state_dir,
            announce_startup,
            check_interval_mins,
            log_level: get("AWARD_WATCH_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
