use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use award_watch::config::WatchConfig;
use award_watch::notify::{TelegramClient, TelegramConfig};
use award_watch::run::{Driver, RunOutcome};
use award_watch::seats::{SeatsClient, SeatsConfig};
use award_watch::throttle::{FileMarkerStore, ThrottleGate};
use award_watch::watchlist::builtin;

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(outcome: &RunOutcome) -> ExitCode {
    match serde_json::to_string(outcome) {
        Ok(line) => println!("{line}"),
        Err(e) => error!(error = %e, "failed to serialize outcome"),
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match WatchConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            error!(error = %e, "configuration error");
            return report(&RunOutcome::Error {
                error: e.to_string(),
            });
        }
    };
    init_logging(&config.log_level);

    let seats = match SeatsClient::new(SeatsConfig::new(&config.seats_api_key)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create seats client");
            return report(&RunOutcome::Error {
                error: e.to_string(),
            });
        }
    };

    let telegram = match TelegramClient::new(TelegramConfig::new(
        &config.telegram_bot_token,
        &config.telegram_chat_id,
    )) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create Telegram client");
            return report(&RunOutcome::Error {
                error: e.to_string(),
            });
        }
    };

    let gate = ThrottleGate::new(FileMarkerStore::new(&config.state_dir));
    let watchlist = builtin();
    info!(
        routes = watchlist.route_count(),
        state_dir = %config.state_dir.display(),
        "starting check"
    );

    let outcome = Driver::new(&seats, &telegram, &gate, &watchlist)
        .with_check_interval(config.check_interval_mins)
        .with_startup_notice(config.announce_startup)
        .run()
        .await;

    report(&outcome)
}
