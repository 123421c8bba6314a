//! The reference-level table: every static level the engine scores against,
//! plus the one mutable slot (previous-day levels) refreshed per evaluation.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::bar::Bar;
use crate::domain::levels::{
    FairValueGap, HighLow, LiquidityLevel, LiquiditySide, OrderBlock, Polarity, PriceZone,
    RoundNumbers, SessionLevels, TimePatterns, TimeWindow, VolumeNode, WickRejectionRules,
    ZoneSide, ZoneTier,
};
use crate::domain::signal::SignalCategory;

/// Reasons a table is rejected at load time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LevelTableError {
    #[error("{category} '{name}': low {low} is above high {high}")]
    InvertedRange {
        category: &'static str,
        name: String,
        low: f64,
        high: f64,
    },
    #[error("{category} '{name}': priority {priority} is outside 1..=5")]
    PriorityOutOfRange {
        category: &'static str,
        name: String,
        priority: u8,
    },
    #[error("{category} '{name}': price is not a finite number")]
    NonFinitePrice { category: &'static str, name: String },
    #[error("weight '{field}' must be finite and non-negative, got {value}")]
    InvalidWeight { field: &'static str, value: f64 },
    #[error("time window '{name}': hours {start_hour}..{end_hour} must be below 24")]
    InvalidTimeWindow {
        name: String,
        start_hour: u32,
        end_hour: u32,
    },
    #[error("rule '{rule}' must be a positive number, got {value}")]
    InvalidRule { rule: &'static str, value: f64 },
}

/// Weight assigned to each signal category.
/// Recorded on signals for reporting; score contributions follow the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceWeights {
    pub daily_tier1_zone: f64,
    pub hourly_zone: f64,
    pub round_number_major: f64,
    pub round_number_minor: f64,
    pub fair_value_gap: f64,
    pub order_block: f64,
    pub volume_profile_hvn: f64,
    pub equal_highs_lows: f64,
    pub pdh_pdl: f64,
    pub pwh_pwl: f64,
    pub pmh_pml: f64,
    pub session_high_low: f64,
    pub psychological_level: f64,
    pub macro_regime_aligned: f64,
    pub volatility_expansion: f64,
}

impl Default for ConfluenceWeights {
    fn default() -> Self {
        Self {
            daily_tier1_zone: 5.0,
            hourly_zone: 3.0,
            round_number_major: 4.0,
            round_number_minor: 2.0,
            fair_value_gap: 3.0,
            order_block: 4.0,
            volume_profile_hvn: 4.0,
            equal_highs_lows: 3.0,
            pdh_pdl: 3.0,
            pwh_pwl: 2.0,
            pmh_pml: 2.0,
            session_high_low: 4.0,
            psychological_level: 3.0,
            macro_regime_aligned: 6.0,
            volatility_expansion: 5.0,
        }
    }
}

impl ConfluenceWeights {
    pub fn weight_for(&self, category: SignalCategory) -> f64 {
        match category {
            SignalCategory::DailyZone => self.daily_tier1_zone,
            SignalCategory::HourlyZone => self.hourly_zone,
            SignalCategory::RoundNumberMajor => self.round_number_major,
            SignalCategory::FairValueGap => self.fair_value_gap,
            SignalCategory::OrderBlock => self.order_block,
            SignalCategory::VolumeNode => self.volume_profile_hvn,
            SignalCategory::EqualHighs | SignalCategory::EqualLows => self.equal_highs_lows,
            SignalCategory::PreviousDayHigh | SignalCategory::PreviousDayLow => self.pdh_pdl,
            SignalCategory::MacroAlignment => self.macro_regime_aligned,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 15] {
        [
            ("daily_tier1_zone", self.daily_tier1_zone),
            ("hourly_zone", self.hourly_zone),
            ("round_number_major", self.round_number_major),
            ("round_number_minor", self.round_number_minor),
            ("fair_value_gap", self.fair_value_gap),
            ("order_block", self.order_block),
            ("volume_profile_hvn", self.volume_profile_hvn),
            ("equal_highs_lows", self.equal_highs_lows),
            ("pdh_pdl", self.pdh_pdl),
            ("pwh_pwl", self.pwh_pwl),
            ("pmh_pml", self.pmh_pml),
            ("session_high_low", self.session_high_low),
            ("psychological_level", self.psychological_level),
            ("macro_regime_aligned", self.macro_regime_aligned),
            ("volatility_expansion", self.volatility_expansion),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub daily_zones: Vec<ZoneTier>,
    pub hourly_zones: Vec<ZoneTier>,
    pub fair_value_gaps: Vec<FairValueGap>,
    pub order_blocks: Vec<OrderBlock>,
    pub volume_nodes: Vec<VolumeNode>,
    pub liquidity: Vec<LiquidityLevel>,
    pub round_numbers: RoundNumbers,
    /// Refreshed from daily bars on every evaluation
    #[serde(default)]
    pub previous_day: Option<SessionLevels>,
    pub previous_week: Option<HighLow>,
    pub time_patterns: TimePatterns,
    pub wick_rejection: WickRejectionRules,
    pub weights: ConfluenceWeights,
}

impl ReferenceTable {
    /// Read a table from JSON and validate it once.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open level table: {:?}", path))?;
        let reader = BufReader::new(file);
        let table: ReferenceTable = serde_json::from_reader(reader)
            .context(format!("Failed to parse level table: {:?}", path))?;
        table
            .validate()
            .context(format!("Level table failed validation: {:?}", path))?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::info!(
                "✅ Level table loaded from {:?}: {} daily tiers, {} hourly tiers, {} FVGs",
                path,
                table.daily_zones.len(),
                table.hourly_zones.len(),
                table.fair_value_gaps.len()
            );
        }
        Ok(table)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .context(format!("Failed to serialize level table to: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), LevelTableError> {
        for tier in self.daily_zones.iter().chain(self.hourly_zones.iter()) {
            for zone in &tier.zones {
                check_range("zone", &zone.name, zone.low, zone.high)?;
                check_priority("zone", &zone.name, zone.priority)?;
            }
        }

        for gap in &self.fair_value_gaps {
            let name = gap.range_label();
            check_range("fair value gap", &name, gap.low, gap.high)?;
            check_priority("fair value gap", &name, gap.priority)?;
        }

        for block in &self.order_blocks {
            check_finite("order block", &block.date, block.price)?;
        }
        for node in &self.volume_nodes {
            check_finite("volume node", &node.note, node.price)?;
        }
        for level in &self.liquidity {
            check_finite("liquidity level", &level.note, level.price)?;
        }
        for price in self
            .round_numbers
            .major
            .iter()
            .chain(self.round_numbers.minor.iter())
        {
            check_finite("round number", &price.to_string(), *price)?;
        }
        if let Some(week) = self.previous_week {
            check_range("previous week", "PWH/PWL", week.low, week.high)?;
        }

        for window in self
            .time_patterns
            .best_times
            .iter()
            .chain(self.time_patterns.avoid_times.iter())
        {
            if window.start_hour >= 24 || window.end_hour > 24 {
                return Err(LevelTableError::InvalidTimeWindow {
                    name: window.name.clone(),
                    start_hour: window.start_hour,
                    end_hour: window.end_hour,
                });
            }
        }

        check_rule("min_wick_size", self.wick_rejection.min_wick_size)?;
        check_rule("wick_to_body_ratio", self.wick_rejection.wick_to_body_ratio)?;

        for (field, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(LevelTableError::InvalidWeight { field, value });
            }
        }

        Ok(())
    }

    /// Refresh the previous-day slot from daily bars (oldest first).
    /// The second-to-last bar is the last completed session; the final bar may still be
    /// forming. Fewer than two bars leaves the slot as it was.
    pub fn update_session_levels(&mut self, daily: &[Bar]) {
        if daily.len() < 2 {
            return;
        }
        let prev = &daily[daily.len() - 2];
        self.previous_day = Some(SessionLevels {
            high: prev.high,
            low: prev.low,
            close: prev.close,
        });

        log::info!(
            "Updated Session Levels: PDH {:.2}, PDL {:.2}",
            prev.high,
            prev.low
        );
    }

    pub fn equal_highs(&self) -> impl Iterator<Item = &LiquidityLevel> {
        self.liquidity
            .iter()
            .filter(|l| l.side == LiquiditySide::EqualHighs)
    }

    pub fn equal_lows(&self) -> impl Iterator<Item = &LiquidityLevel> {
        self.liquidity
            .iter()
            .filter(|l| l.side == LiquiditySide::EqualLows)
    }
}

fn check_range(category: &'static str, name: &str, low: f64, high: f64) -> Result<(), LevelTableError> {
    check_finite(category, name, low)?;
    check_finite(category, name, high)?;
    if low > high {
        return Err(LevelTableError::InvertedRange {
            category,
            name: name.to_string(),
            low,
            high,
        });
    }
    Ok(())
}

fn check_priority(category: &'static str, name: &str, priority: u8) -> Result<(), LevelTableError> {
    if !(1..=5).contains(&priority) {
        return Err(LevelTableError::PriorityOutOfRange {
            category,
            name: name.to_string(),
            priority,
        });
    }
    Ok(())
}

fn check_finite(category: &'static str, name: &str, price: f64) -> Result<(), LevelTableError> {
    if !price.is_finite() {
        return Err(LevelTableError::NonFinitePrice {
            category,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_rule(rule: &'static str, value: f64) -> Result<(), LevelTableError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LevelTableError::InvalidRule { rule, value });
    }
    Ok(())
}

// ============================================================================
// Built-in knowledge base (gold futures, daily and hourly structure)
// ============================================================================

fn zone(name: &str, low: f64, high: f64, evidence: &str, priority: u8) -> PriceZone {
    PriceZone {
        name: name.to_string(),
        low,
        high,
        evidence: evidence.to_string(),
        priority,
    }
}

fn tier(label: &str, side: ZoneSide, zones: Vec<PriceZone>) -> ZoneTier {
    ZoneTier {
        label: label.to_string(),
        side,
        zones,
    }
}

fn bullish_gap(low: f64, high: f64, priority: u8, note: &str) -> FairValueGap {
    FairValueGap {
        low,
        high,
        direction: Polarity::Bullish,
        priority,
        note: note.to_string(),
    }
}

fn order_block(price: f64, polarity: Polarity, date: &str, strength: &str, evidence: &str) -> OrderBlock {
    OrderBlock {
        price,
        polarity,
        date: date.to_string(),
        strength: strength.to_string(),
        evidence: evidence.to_string(),
    }
}

fn volume_node(price: f64, volume: f64, significance: &str, note: &str) -> VolumeNode {
    VolumeNode {
        price,
        volume,
        significance: significance.to_string(),
        note: note.to_string(),
    }
}

fn liquidity(price: f64, side: LiquiditySide, touches: u32, note: &str) -> LiquidityLevel {
    LiquidityLevel {
        price,
        side,
        touches,
        note: note.to_string(),
    }
}

fn window(name: &str, start_hour: u32, end_hour: u32, quality: &str, day: Option<u32>) -> TimeWindow {
    TimeWindow {
        name: name.to_string(),
        start_hour,
        end_hour,
        quality: quality.to_string(),
        day,
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        use LiquiditySide::{EqualHighs, EqualLows};
        use Polarity::{Bearish, Bullish};
        use ZoneSide::{Resistance, Support};

        Self {
            daily_zones: vec![
                tier(
                    "tier1_resistance",
                    Resistance,
                    vec![zone("ATH Zone", 4300.0, 4360.0, "All-time high Oct 20, multiple rejections", 5)],
                ),
                tier(
                    "tier1_support",
                    Support,
                    vec![
                        zone("Major 4K", 4000.0, 4050.0, "HVN 88K contracts, psychological, multiple touches", 5),
                        zone("Order Block", 3880.0, 3930.0, "Bullish OB, FVG $3886-3926", 5),
                    ],
                ),
                tier(
                    "tier2_support",
                    Support,
                    vec![
                        zone("Swing Cluster", 3750.0, 3800.0, "Multiple swing lows, FVG $3756-3775", 4),
                        zone("Fib 61.8%", 3620.0, 3690.0, "Fibonacci $3679, equal lows cluster", 4),
                    ],
                ),
                tier(
                    "tier3_support",
                    Support,
                    vec![
                        zone("ULTIMATE BUY", 3400.0, 3450.0, "HIGHEST HVN 336K contracts, 9 touches, massive accumulation", 5),
                        zone("Consolidation Base", 3230.0, 3280.0, "11 swing lows, breakout base", 4),
                    ],
                ),
            ],
            hourly_zones: vec![
                tier(
                    "resistance",
                    Resistance,
                    vec![
                        zone("1H R1", 4240.0, 4250.0, "Dec 4 high rejection, massive volume", 5),
                        zone("1H R2", 4280.0, 4300.0, "Extension target, previous consolidation", 4),
                    ],
                ),
                tier(
                    "support",
                    Support,
                    vec![
                        zone("1H S1 CRITICAL", 4190.0, 4210.0, "Today session low, must hold", 5),
                        zone("1H S2 GOLDEN", 4100.0, 4125.0, "100% hold rate, 3 touches Nov, massive wicks", 5),
                        zone("1H S3", 4060.0, 4080.0, "Nov consolidation, equal lows", 4),
                        zone("1H S4 MAJOR", 4000.0, 4025.0, "$4K psychological, $49 wick reversal Nov 17", 5),
                    ],
                ),
            ],
            fair_value_gaps: vec![
                bullish_gap(4091.0, 4203.0, 5, "LARGEST FVG, wants to fill"),
                bullish_gap(3999.0, 4060.0, 4, "Major FVG near 4K"),
                bullish_gap(3927.0, 3986.0, 4, "Multiple gaps cluster"),
                bullish_gap(3886.0, 3926.0, 4, "Order block area"),
                bullish_gap(3756.0, 3775.0, 3, "Tier 2 support"),
                bullish_gap(3315.0, 3357.0, 4, "Ultimate zone"),
            ],
            order_blocks: vec![
                order_block(4115.0, Bullish, "2025-11-12", "strong", "Nov 12 reversal, held 3x"),
                order_block(4020.0, Bullish, "2025-11-17", "very_strong", "$49 wick, 1552 volume"),
                order_block(3420.0, Bullish, "2025-05-06", "extreme", "Massive accumulation, +3% move"),
                order_block(4246.0, Bearish, "2025-12-04", "strong", "Dec 4 rejection, 81K volume"),
                order_block(3276.0, Bearish, "2025-05-12", "strong", "-3.46% move"),
            ],
            volume_nodes: vec![
                volume_node(3333.0, 336_856.0, "EXTREME", "Highest volume of entire year"),
                volume_node(4205.0, 88_171.0, "VERY_HIGH", "Current area high volume"),
                volume_node(2769.0, 125_692.0, "VERY_HIGH", "Jan 29 record volume"),
            ],
            liquidity: vec![
                liquidity(4356.0, EqualHighs, 2, "ATH area, buy-side liquidity"),
                liquidity(4136.0, EqualHighs, 2, "Nov consolidation"),
                liquidity(4122.0, EqualHighs, 3, "Strong magnet"),
                liquidity(4102.0, EqualLows, 2, "Golden zone entry"),
                liquidity(4031.0, EqualLows, 3, "STRONG magnet, stop hunt zone"),
                liquidity(3945.0, EqualLows, 3, "Tier 1 support"),
                liquidity(3929.0, EqualLows, 2, "Order block area"),
            ],
            round_numbers: RoundNumbers {
                major: (30..=45).rev().map(|h| h as f64 * 100.0).collect(),
                minor: (30..45).rev().map(|h| h as f64 * 100.0 + 50.0).collect(),
            },
            previous_day: None,
            previous_week: Some(HighLow {
                high: 4228.70,
                low: 4019.40,
            }),
            time_patterns: TimePatterns {
                utc_offset_hours: -5,
                best_times: vec![
                    window("London Open", 3, 5, "EXCELLENT", None),
                    window("NY Open", 8, 10, "EXCELLENT", None),
                    window("Overlap", 8, 12, "BEST", None),
                ],
                avoid_times: vec![
                    window("Asian Session", 19, 2, "LOW", None),
                    window("US Lunch", 12, 14, "LOW", None),
                    window("Late Friday", 14, 17, "LOW", Some(4)),
                ],
            },
            wick_rejection: WickRejectionRules {
                min_wick_size: 1.5,
                wick_to_body_ratio: 2.0,
            },
            weights: ConfluenceWeights::default(),
        }
    }
}
