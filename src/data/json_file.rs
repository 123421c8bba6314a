use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::market_data::{MarketData, MarketDataSource};

/// Serialized wrapper around a market data snapshot
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MarketDataFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub data: MarketData,
}

impl MarketDataFile {
    pub fn new(data: MarketData) -> Self {
        Self {
            version: PERSISTENCE.version,
            timestamp_ms: Utc::now().timestamp_millis(),
            data,
        }
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .context(format!("Failed to read market data file: {:?}", path))?;
        let file: MarketDataFile = serde_json::from_str(&text)
            .context(format!("Failed to parse market data file: {:?}", path))?;
        Ok(file)
    }

    pub async fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)
            .context(format!("Failed to serialize market data for: {}", path.display()))?;
        tokio::fs::write(path, text)
            .await
            .context(format!("Failed to write file: {}", path.display()))
    }
}

/// Reads a market data snapshot written by `make_sample_data` (or any tool using the same format)
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MarketDataSource for JsonFileSource {
    async fn fetch_market_data(&self) -> Result<MarketData> {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_data_source {
            log::info!("Fetching market data from {:?}...", self.path);
        }

        let file = MarketDataFile::load_from_path(&self.path).await?;
        if file.version != PERSISTENCE.version {
            bail!(
                "Market data version mismatch: file v{} vs required v{}",
                file.version,
                PERSISTENCE.version
            );
        }
        if file.data.intraday.is_empty() {
            bail!("Market data file {:?} has no intraday bars", self.path);
        }
        Ok(file.data)
    }

    fn signature(&self) -> &'static str {
        "JSON File"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DemoSource;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("zone_confluence_{}_{}.json", tag, std::process::id()))
    }

    #[tokio::test]
    async fn reads_back_what_was_written() {
        let path = temp_path("market_roundtrip");
        let data = DemoSource::generate();
        MarketDataFile::new(data.clone()).save_to_path(&path).await.unwrap();

        let loaded = JsonFileSource::new(&path).fetch_market_data().await.unwrap();
        assert_eq!(loaded, data);
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = JsonFileSource::new(temp_path("does_not_exist"));
        let err = source.fetch_market_data().await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read market data file"));
    }

    #[tokio::test]
    async fn empty_intraday_is_rejected() {
        let path = temp_path("market_empty");
        MarketDataFile::new(MarketData::default()).save_to_path(&path).await.unwrap();
        assert!(JsonFileSource::new(&path).fetch_market_data().await.is_err());
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn version_mismatch_is_rejected() {
        let path = temp_path("market_version");
        let mut file = MarketDataFile::new(DemoSource::generate());
        file.version = PERSISTENCE.version + 1.0;
        file.save_to_path(&path).await.unwrap();
        let err = JsonFileSource::new(&path).fetch_market_data().await.unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
        tokio::fs::remove_file(&path).await.ok();
    }
}
