//! Signal records emitted by the matchers and detectors.

use serde::{Deserialize, Serialize};

/// Category of a level-based confluence signal
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    #[strum(serialize = "daily_zone")]
    DailyZone,
    #[strum(serialize = "hourly_zone")]
    HourlyZone,
    #[strum(serialize = "round_number_major")]
    RoundNumberMajor,
    #[strum(serialize = "fair_value_gap")]
    FairValueGap,
    #[strum(serialize = "order_block")]
    OrderBlock,
    #[strum(serialize = "volume_profile_hvn")]
    VolumeNode,
    #[strum(serialize = "equal_highs")]
    EqualHighs,
    #[strum(serialize = "equal_lows")]
    EqualLows,
    #[strum(serialize = "PDH")]
    PreviousDayHigh,
    #[strum(serialize = "PDL")]
    PreviousDayLow,
    #[strum(serialize = "MACRO_ALIGNMENT")]
    MacroAlignment,
}

/// Directional tag carried by every signal; the trade plan tallies these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalBias {
    Supportive,
    Resistive,
    Neutral,
}

/// One piece of level-based evidence. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceSignal {
    pub category: SignalCategory,
    pub name: String,
    /// Range, evidence or note text for reports
    pub detail: String,
    pub bias: SignalBias,
    /// Configured category weight (reporting only)
    pub weight: f64,
    /// What this signal adds to the confluence score
    pub score_contribution: f64,
    /// Entry for the "zones hit" list, if this category is listed there
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_label: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternKind {
    #[strum(serialize = "BULLISH_WICK")]
    BullishWick,
    #[strum(serialize = "HIGH_VOLUME")]
    HighVolume,
    #[strum(serialize = "BEARISH_WICK")]
    BearishWick,
    #[strum(serialize = "LIQUIDITY_GRAB_BULL")]
    LiquidityGrabBull,
}

/// A bar-pattern hit, independent of price level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub kind: PatternKind,
    pub note: String,
    pub score_contribution: f64,
}

impl DetectedPattern {
    pub fn new(kind: PatternKind, note: impl Into<String>, score_contribution: f64) -> Self {
        Self {
            kind,
            note: note.into(),
            score_contribution,
        }
    }
}
