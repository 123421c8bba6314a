use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use zone_confluence::config::PERSISTENCE;
use zone_confluence::data::{DemoSource, MarketDataFile};
use zone_confluence::domain::ReferenceTable;

fn main() -> Result<()> {
    build_sample_data()
}

fn build_sample_data() -> Result<()> {
    let table = ReferenceTable::default();
    table
        .validate()
        .context("Built-in level table failed validation")?;

    let levels_path = PERSISTENCE.levels_path();
    table.save_to_path(&levels_path)?;
    println!(
        "✅ Level table written to {:?} ({} daily tiers, {} hourly tiers).",
        levels_path,
        table.daily_zones.len(),
        table.hourly_zones.len()
    );

    let market = DemoSource::generate();
    let output = MarketDataFile::new(market);
    let market_path = PERSISTENCE.market_data_path();
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(output.save_to_path(&market_path))?;

    println!(
        "✅ Market data written to {:?} with {} daily and {} intraday bars.",
        market_path,
        output.data.daily.len(),
        output.data.intraday.len()
    );
    Ok(())
}
