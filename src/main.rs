use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, parse_cli_mode, run_list_mode, USAGE};
mod tui;
use tui::{run_tui, sample_store};

use event_desk::{storage::config::Config, sync::event_api::HttpEventStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    if options.mode == CliMode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = Config::load_or_create().context("Failed to load config")?;
    if let Some(url) = options.events_url {
        config.api.events_url = url;
    }

    setup_logging(&config);

    match (options.mode, options.sample) {
        (CliMode::List, true) => run_list_mode(sample_store()).await,
        (CliMode::List, false) => run_list_mode(HttpEventStore::new(&config.api.events_url)).await,
        (_, true) => Ok(run_tui(sample_store(), &config).await?),
        (_, false) => Ok(run_tui(HttpEventStore::new(&config.api.events_url), &config).await?),
    }
}

fn setup_logging(config: &Config) {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "event-desk.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("event-desk started against {}", config.api.events_url);
}
