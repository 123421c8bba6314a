//! Typed reference-level records, one shape per category.
//!
//! Every record is immutable once the table is loaded. Range-shaped records
//! (zones, gaps) match by inclusive containment; point-shaped records match by a
//! per-category proximity band owned by the caller.

use serde::{Deserialize, Serialize};

/// Which side of the market a zone defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSide {
    #[strum(serialize = "support")]
    Support,
    #[strum(serialize = "resistance")]
    Resistance,
}

/// Direction of a structural level (fair value gap, order block)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[strum(serialize = "bullish")]
    Bullish,
    #[strum(serialize = "bearish")]
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum LiquiditySide {
    #[strum(serialize = "equal highs")]
    EqualHighs,
    #[strum(serialize = "equal lows")]
    EqualLows,
}

/// True when `price` sits within `tolerance` of `level` (both ends inclusive)
pub fn within(price: f64, level: f64, tolerance: f64) -> bool {
    (price - level).abs() <= tolerance
}

/// A support or resistance zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceZone {
    pub name: String,
    pub low: f64,
    pub high: f64,
    pub evidence: String,
    /// 1 (weak) to 5 (strongest)
    pub priority: u8,
}

impl PriceZone {
    /// Check if a price is within this zone (inclusive both ends)
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    pub fn range_label(&self) -> String {
        format!("${:.0}-${:.0}", self.low, self.high)
    }
}

/// A labelled group of zones sharing one side, e.g. `tier1_support`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTier {
    pub label: String,
    pub side: ZoneSide,
    pub zones: Vec<PriceZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueGap {
    pub low: f64,
    pub high: f64,
    pub direction: Polarity,
    pub priority: u8,
    pub note: String,
}

impl FairValueGap {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    /// Magnitude of the imbalance
    pub fn size(&self) -> f64 {
        self.high - self.low
    }

    pub fn range_label(&self) -> String {
        format!("${:.0}-${:.0}", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    pub price: f64,
    pub polarity: Polarity,
    pub date: String,
    pub strength: String,
    pub evidence: String,
}

/// High-volume node from the volume profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeNode {
    pub price: f64,
    pub volume: f64,
    pub significance: String,
    pub note: String,
}

/// Equal highs or equal lows with repeated touches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityLevel {
    pub price: f64,
    pub side: LiquiditySide,
    pub touches: u32,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundNumbers {
    pub major: Vec<f64>,
    pub minor: Vec<f64>,
}

/// High/low/close of the most recently completed session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionLevels {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Static high/low pair, e.g. previous week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighLow {
    pub high: f64,
    pub low: f64,
}

/// A window of the trading day on the session clock.
/// `start_hour > end_hour` wraps past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub name: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub quality: String,
    /// Restrict to one weekday (Monday = 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl TimeWindow {
    /// Plain half-open check, no wrap-around: `start <= hour < end`
    pub fn contains_hour(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }

    /// Wrap-aware check that also honours the optional weekday
    pub fn covers(&self, hour: u32, weekday: u32) -> bool {
        if let Some(day) = self.day {
            if day != weekday {
                return false;
            }
        }
        if self.start_hour <= self.end_hour {
            self.contains_hour(hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePatterns {
    /// Offset of the session clock from UTC, in hours
    pub utc_offset_hours: i32,
    pub best_times: Vec<TimeWindow>,
    pub avoid_times: Vec<TimeWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WickRejectionRules {
    pub min_wick_size: f64,
    pub wick_to_body_ratio: f64,
}
