mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use engine_logging::{engine_error, engine_info};
use giveaway_engine::{EntryEngine, FetchSettings, ReqwestFetcher};

const DEFAULT_CONFIG_PATH: &str = "config.ron";

pub fn run_app() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = config::load(&path)?;

    logging::initialize(if config.log_to_file {
        logging::LogDestination::Both
    } else {
        logging::LogDestination::Terminal
    });

    let fetcher = ReqwestFetcher::new(&config.cookie, FetchSettings::default())
        .context("failed to build the http client")?;
    let base = config.base_url()?;
    let timings = config.timings.to_loop_timings();
    engine_info!(
        "Starting with {:?} listings, minimum {} points, {} ignore words",
        config.filter.variant,
        config.filter.min_points,
        config.filter.ignored_words.len()
    );
    let mut engine = EntryEngine::new(fetcher, base, config.filter, timings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    match runtime.block_on(engine.run()) {
        Ok(never) => match never {},
        Err(err) => {
            engine_error!("Stopping: {}", err);
            Err(err.into())
        }
    }
}
