use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Bar;

/// Everything one evaluation reads besides the level table. Each series is oldest first.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct MarketData {
    pub daily: Vec<Bar>,
    pub intraday: Vec<Bar>,
    /// Correlated instrument (e.g. the dollar index). Absence is tolerated everywhere.
    #[serde(default)]
    pub secondary_daily: Option<Vec<Bar>>,
}

impl MarketData {
    /// Latest intraday close
    pub fn current_price(&self) -> Option<f64> {
        self.intraday.last().map(|bar| bar.close)
    }
}

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    // Either produce market data OR return an anyhow::error
    async fn fetch_market_data(&self) -> Result<MarketData>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each provider in turn; the first success wins.
pub async fn get_market_data_async(
    providers: &[Box<dyn MarketDataSource>],
) -> Result<(MarketData, &'static str)> {
    for provider in providers {
        match provider.fetch_market_data().await {
            Ok(data) => {
                let signature = provider.signature();
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_data_source {
                    log::info!(
                        "✅ {} supplied {} daily / {} intraday bars",
                        signature,
                        data.daily.len(),
                        data.intraday.len()
                    );
                }
                return Ok((data, signature));
            }
            Err(e) => {
                log::info!("Market data provider '{}' failed: {:#}", provider.signature(), e);
                // Continue to the next provider
            }
        }
    }
    Err(anyhow!("All market data providers failed"))
}
