//! File persistence and serialization configuration

use std::path::PathBuf;

/// Filename of the editable reference-level table
pub const DEFAULT_LEVELS_FILENAME: &str = "reference_levels.json";

/// Filename of the market data snapshot (daily, intraday and secondary bars)
pub const DEFAULT_MARKET_DATA_FILENAME: &str = "market_data.json";

pub struct PersistenceConfig {
    /// Directory holding the JSON inputs
    pub directory: &'static str,
    /// Schema version written alongside generated files
    pub version: f64,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    directory: "level_data",
    version: 1.0,
};

impl PersistenceConfig {
    pub fn levels_path(&self) -> PathBuf {
        PathBuf::from(self.directory).join(DEFAULT_LEVELS_FILENAME)
    }

    pub fn market_data_path(&self) -> PathBuf {
        PathBuf::from(self.directory).join(DEFAULT_MARKET_DATA_FILENAME)
    }
}
