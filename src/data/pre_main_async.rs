// Async code to run in main before the engine starts

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::Cli;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::demo::DemoSource;
use crate::data::json_file::JsonFileSource;
use crate::data::market_data::{MarketData, MarketDataSource, get_market_data_async};

/// Providers in the order they are tried. `--demo` puts the demo first; otherwise the
/// file is primary and the demo is the fallback.
pub fn market_data_providers(args: &Cli) -> Vec<Box<dyn MarketDataSource>> {
    let path: PathBuf = args
        .data
        .clone()
        .unwrap_or_else(|| PERSISTENCE.market_data_path());
    let file: Box<dyn MarketDataSource> = Box::new(JsonFileSource::new(path));
    let demo: Box<dyn MarketDataSource> = Box::new(DemoSource);

    if args.demo {
        vec![demo, file] // demo first
    } else {
        vec![file, demo] // file first
    }
}

pub async fn fetch_market_data(args: &Cli) -> Result<(MarketData, &'static str)> {
    let providers = market_data_providers(args);
    let (data, signature) = get_market_data_async(&providers)
        .await
        .context("Failed to retrieve market data")?;

    if signature == "Demo Data" && !args.demo {
        log::warn!("⚠️  Market data file unavailable, falling back to demo data");
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_data_source {
        log::info!("Successfully retrieved market data using: {}.", signature);
    }
    Ok((data, signature))
}
