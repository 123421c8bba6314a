//! Configuration module for the confluence engine.

pub mod persistence;
pub mod scoring;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::{DEBUG_FLAGS, DebugFlags};

// Re-export commonly used items
pub use persistence::{
    DEFAULT_LEVELS_FILENAME, DEFAULT_MARKET_DATA_FILENAME, PERSISTENCE, PersistenceConfig,
};
pub use scoring::{SCORING, ScoringConfig};
