// Scoring stages: each one is a pure function over the price, the bars and the level table
pub mod confluence;
pub mod level_matchers;
pub mod macro_regime;
pub mod patterns;
pub mod time_quality;

// Re-export commonly used items
pub use confluence::{build_trade_setup, classify_tier, infer_direction, recommend};
pub use level_matchers::{LEVEL_MATCHERS, LevelMatcher};
pub use macro_regime::{MacroReading, classify_macro_regime};
pub use patterns::{PATTERN_DETECTORS, PatternDetector};
pub use time_quality::classify_time_quality;
