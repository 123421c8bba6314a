// Domain types and value objects
pub mod bar;
pub mod levels;
pub mod reference_table;
pub mod signal;

// Re-export commonly used types
pub use bar::Bar;
pub use levels::{
    FairValueGap, LiquidityLevel, LiquiditySide, OrderBlock, Polarity, PriceZone, SessionLevels,
    TimeWindow, VolumeNode, ZoneSide, ZoneTier,
};
pub use reference_table::{ConfluenceWeights, LevelTableError, ReferenceTable};
pub use signal::{ConfluenceSignal, DetectedPattern, PatternKind, SignalBias, SignalCategory};
