use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::runtime::Runtime;

use zone_confluence::{
    Cli, // The struct from lib.rs
    ConfluenceEngine,
    fetch_market_data, // The re-export from lib.rs
    format_alert,
    load_reference_table,
};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Level table (validated once, here)
    let table = load_reference_table(&args)?;

    // D. Data Loading (Blocking)
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let (market_data, signature) = rt.block_on(fetch_market_data(&args))?;
    log::info!("📈 Market data source: {}", signature);

    let price = match args.price {
        Some(price) => price,
        None => market_data
            .current_price()
            .context("No intraday bars to take a current price from")?,
    };

    // E. Evaluate and report
    let mut engine = ConfluenceEngine::new(table);
    let analysis = engine.evaluate(price, Utc::now(), &market_data);

    if args.json {
        let json =
            serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?;
        println!("{}", json);
    } else {
        println!("{}", format_alert(&analysis));
    }
    Ok(())
}
