use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::signal::{ConfluenceSignal, DetectedPattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacroRegime {
    #[strum(serialize = "STRONG_BULL")]
    StrongBull,
    #[strum(serialize = "STRONG_BEAR")]
    StrongBear,
    #[strum(serialize = "NEUTRAL")]
    Neutral,
}

/// Regime label plus the ratios it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroContext {
    pub regime: MacroRegime,
    /// Last close within the recent daily range, 0..1
    pub range_position: f64,
    /// Secondary series closed below its recent mean
    pub secondary_bearish: bool,
}

/// Discrete confidence tier derived from the final score
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfluenceTier {
    #[default]
    #[strum(serialize = "MODERATE")]
    Moderate,
    #[strum(serialize = "HIGH (3-star)")]
    High,
    #[strum(serialize = "VERY HIGH (4-star)")]
    VeryHigh,
    #[strum(serialize = "EXTREME (5-star)")]
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    #[strum(serialize = "LONG")]
    Long,
    #[strum(serialize = "SHORT")]
    Short,
}

/// Entry, stop and target at fixed offsets from the evaluated price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub direction: TradeDirection,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub reason: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    #[strum(serialize = "KILLER_EXECUTION")]
    KillerExecution,
    #[strum(serialize = "PREPARE_ENTRY")]
    PrepareEntry,
    #[default]
    #[strum(serialize = "WAIT")]
    Wait,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    #[strum(serialize = "EXTREME")]
    Extreme,
    #[strum(serialize = "HIGH")]
    High,
    #[default]
    #[strum(serialize = "LOW")]
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub confidence: Confidence,
}

/// Quality of the current time of day. Reported, never scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeQuality {
    Prime { name: String, quality: String },
    Avoid { name: String },
    OffPeak,
}

impl std::fmt::Display for TimeQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TimeQuality::Prime { name, quality } => write!(f, "✅ {} ({})", name, quality),
            TimeQuality::Avoid { name } => write!(f, "⛔ {}", name),
            TimeQuality::OffPeak => write!(f, "⚠️ Off-Peak"),
        }
    }
}

/// Accumulator for one evaluation.
/// Created empty, grown by recording signals and patterns, finalized once, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    /// Level-based evidence in emission order
    pub confluences: Vec<ConfluenceSignal>,
    /// Names of zones and levels hit, for reporting
    pub zones: Vec<String>,
    pub patterns: Vec<DetectedPattern>,
    pub confluence_score: f64,
    pub confluence_level: ConfluenceTier,
    pub macro_context: Option<MacroContext>,
    pub trade_setup: Option<TradeSetup>,
    pub recommendation: Recommendation,
    pub time_quality: Option<TimeQuality>,
}

impl Analysis {
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            price,
            timestamp,
            confluences: Vec::new(),
            zones: Vec::new(),
            patterns: Vec::new(),
            confluence_score: 0.0,
            confluence_level: ConfluenceTier::default(),
            macro_context: None,
            trade_setup: None,
            recommendation: Recommendation::default(),
            time_quality: None,
        }
    }

    /// Append a signal and add its contribution. Scores only ever grow.
    pub fn record_signal(&mut self, signal: ConfluenceSignal) {
        debug_assert!(signal.score_contribution >= 0.0);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_signal_trace {
            log::info!(
                "  + {:>5.1} {} {} ({})",
                signal.score_contribution,
                signal.category,
                signal.name,
                signal.detail
            );
        }

        if let Some(label) = &signal.zone_label {
            self.zones.push(label.clone());
        }
        self.confluence_score += signal.score_contribution;
        self.confluences.push(signal);
    }

    pub fn record_pattern(&mut self, pattern: DetectedPattern) {
        debug_assert!(pattern.score_contribution >= 0.0);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_signal_trace {
            log::info!(
                "  + {:>5.1} {} ({})",
                pattern.score_contribution,
                pattern.kind,
                pattern.note
            );
        }

        self.confluence_score += pattern.score_contribution;
        self.patterns.push(pattern);
    }
}
