// Output models for one evaluation

pub mod analysis;

// Re-export key types for convenience
pub use analysis::{
    Action, Analysis, Confidence, ConfluenceTier, MacroContext, MacroRegime, Recommendation,
    TimeQuality, TradeDirection, TradeSetup,
};
