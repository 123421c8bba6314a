//! Level matchers. Each one tests the price against a single category of the
//! reference table and returns every entry it hits; none suppresses another.

use crate::config::SCORING;
use crate::domain::levels::{ZoneSide, ZoneTier, within};
use crate::domain::reference_table::ReferenceTable;
use crate::domain::signal::{ConfluenceSignal, SignalBias, SignalCategory};

pub type LevelMatcher = fn(f64, &ReferenceTable) -> Vec<ConfluenceSignal>;

/// All level matchers in their reporting order
pub const LEVEL_MATCHERS: [(&str, LevelMatcher); 8] = [
    ("daily_zones", check_daily_zones),
    ("hourly_zones", check_hourly_zones),
    ("round_numbers", check_round_numbers),
    ("fair_value_gaps", check_fair_value_gaps),
    ("order_blocks", check_order_blocks),
    ("volume_profile", check_volume_profile),
    ("liquidity_zones", check_liquidity_zones),
    ("session_levels", check_session_levels),
];

impl From<ZoneSide> for SignalBias {
    fn from(side: ZoneSide) -> Self {
        match side {
            ZoneSide::Support => SignalBias::Supportive,
            ZoneSide::Resistance => SignalBias::Resistive,
        }
    }
}

fn match_zone_tiers(
    price: f64,
    tiers: &[ZoneTier],
    category: SignalCategory,
    weight: f64,
    multiplier: f64,
) -> Vec<ConfluenceSignal> {
    tiers
        .iter()
        .flat_map(|tier| tier.zones.iter().map(move |zone| (tier, zone)))
        .filter(|(_, zone)| zone.contains(price))
        .map(|(tier, zone)| ConfluenceSignal {
            category,
            name: zone.name.clone(),
            detail: format!("{} {} | {}", tier.label, zone.range_label(), zone.evidence),
            bias: tier.side.into(),
            weight,
            score_contribution: zone.priority as f64 * multiplier,
            zone_label: Some(zone.name.clone()),
        })
        .collect()
}

/// Daily zones score their raw priority
pub fn check_daily_zones(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    match_zone_tiers(
        price,
        &table.daily_zones,
        SignalCategory::DailyZone,
        table.weights.weight_for(SignalCategory::DailyZone),
        1.0,
    )
}

/// Hourly zones score a discounted priority
pub fn check_hourly_zones(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    match_zone_tiers(
        price,
        &table.hourly_zones,
        SignalCategory::HourlyZone,
        table.weights.weight_for(SignalCategory::HourlyZone),
        SCORING.priority_multiplier,
    )
}

/// Major round numbers only; minor ones are carried in the table but not scored
pub fn check_round_numbers(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    table
        .round_numbers
        .major
        .iter()
        .filter(|&&level| within(price, level, SCORING.tolerance.round_number))
        .map(|&level| ConfluenceSignal {
            category: SignalCategory::RoundNumberMajor,
            name: format!("{:.0}", level),
            detail: "Psychological level".to_string(),
            bias: SignalBias::Neutral,
            weight: table.weights.weight_for(SignalCategory::RoundNumberMajor),
            score_contribution: SCORING.points.round_number_major,
            zone_label: Some(format!("Round ${:.0}", level)),
        })
        .collect()
}

pub fn check_fair_value_gaps(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    table
        .fair_value_gaps
        .iter()
        .filter(|gap| gap.contains(price))
        .map(|gap| ConfluenceSignal {
            category: SignalCategory::FairValueGap,
            name: format!("{} FVG", gap.direction),
            detail: format!("{} (size {:.1}) | {}", gap.range_label(), gap.size(), gap.note),
            bias: SignalBias::Neutral,
            weight: table.weights.weight_for(SignalCategory::FairValueGap),
            score_contribution: gap.priority as f64 * SCORING.priority_multiplier,
            zone_label: Some(format!("FVG ${:.0}", gap.low)),
        })
        .collect()
}

/// Either polarity matches; polarity only shows up in the name and label
pub fn check_order_blocks(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    table
        .order_blocks
        .iter()
        .filter(|block| within(price, block.price, SCORING.tolerance.order_block))
        .map(|block| ConfluenceSignal {
            category: SignalCategory::OrderBlock,
            name: format!("{} OB", block.polarity),
            detail: format!("${:.0} {} ({}) | {}", block.price, block.strength, block.date, block.evidence),
            bias: SignalBias::Neutral,
            weight: table.weights.weight_for(SignalCategory::OrderBlock),
            score_contribution: SCORING.points.order_block,
            zone_label: Some(format!("{} OB ${:.0}", block.polarity, block.price)),
        })
        .collect()
}

pub fn check_volume_profile(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    table
        .volume_nodes
        .iter()
        .filter(|node| within(price, node.price, SCORING.tolerance.volume_node))
        .map(|node| ConfluenceSignal {
            category: SignalCategory::VolumeNode,
            name: format!("HVN {:.0}", node.price),
            detail: format!("{} ({:.0} contracts) | {}", node.significance, node.volume, node.note),
            bias: SignalBias::Neutral,
            weight: table.weights.weight_for(SignalCategory::VolumeNode),
            score_contribution: SCORING.points.volume_node,
            zone_label: Some(format!("HVN ${:.0}", node.price)),
        })
        .collect()
}

/// Equal highs first, then equal lows. Not listed among the zones hit.
pub fn check_liquidity_zones(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    let highs = table.equal_highs().map(|level| (SignalCategory::EqualHighs, level));
    let lows = table.equal_lows().map(|level| (SignalCategory::EqualLows, level));

    highs
        .chain(lows)
        .filter(|(_, level)| within(price, level.price, SCORING.tolerance.liquidity_level))
        .map(|(category, level)| ConfluenceSignal {
            category,
            name: format!("{:.0}", level.price),
            detail: format!("{} touches | {}", level.touches, level.note),
            bias: SignalBias::Neutral,
            weight: table.weights.weight_for(category),
            score_contribution: SCORING.points.liquidity_level,
            zone_label: None,
        })
        .collect()
}

/// Previous-day high and low, once the session tracker has filled them in
pub fn check_session_levels(price: f64, table: &ReferenceTable) -> Vec<ConfluenceSignal> {
    let Some(prev) = table.previous_day else {
        return Vec::new();
    };

    [
        (SignalCategory::PreviousDayHigh, prev.high, "PDH"),
        (SignalCategory::PreviousDayLow, prev.low, "PDL"),
    ]
    .into_iter()
    .filter(|(_, level, _)| within(price, *level, SCORING.tolerance.session_level))
    .map(|(category, level, label)| ConfluenceSignal {
        category,
        name: label.to_string(),
        detail: format!("${:.2}", level),
        bias: SignalBias::Neutral,
        weight: table.weights.weight_for(category),
        score_contribution: SCORING.points.session_level,
        zone_label: Some(label.to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::levels::{
        FairValueGap, LiquidityLevel, LiquiditySide, OrderBlock, Polarity, PriceZone,
        RoundNumbers, SessionLevels, VolumeNode,
    };

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn total(signals: &[ConfluenceSignal]) -> f64 {
        signals.iter().map(|s| s.score_contribution).sum()
    }

    /// A table with nothing in it, so each test adds only what it exercises
    fn empty_table() -> ReferenceTable {
        ReferenceTable {
            daily_zones: Vec::new(),
            hourly_zones: Vec::new(),
            fair_value_gaps: Vec::new(),
            order_blocks: Vec::new(),
            volume_nodes: Vec::new(),
            liquidity: Vec::new(),
            round_numbers: RoundNumbers::default(),
            previous_day: None,
            ..ReferenceTable::default()
        }
    }

    fn zone_tier(side: ZoneSide, low: f64, high: f64, priority: u8) -> ZoneTier {
        ZoneTier {
            label: format!("test_{}", side),
            side,
            zones: vec![PriceZone {
                name: "Test Zone".to_string(),
                low,
                high,
                evidence: "fixture".to_string(),
                priority,
            }],
        }
    }

    #[test]
    fn daily_zone_scores_priority_with_inclusive_bounds() {
        let mut table = empty_table();
        table.daily_zones.push(zone_tier(ZoneSide::Support, 4000.0, 4050.0, 5));

        for price in [4000.0, 4025.0, 4050.0] {
            let signals = check_daily_zones(price, &table);
            assert_eq!(signals.len(), 1, "price {}", price);
            assert!(approx_eq(total(&signals), 5.0));
            assert_eq!(signals[0].bias, SignalBias::Supportive);
            assert_eq!(signals[0].weight, 5.0);
        }
        assert!(check_daily_zones(3999.0, &table).is_empty());
        assert!(check_daily_zones(4051.0, &table).is_empty());
    }

    #[test]
    fn hourly_zone_scores_discounted_priority() {
        let mut table = empty_table();
        table.hourly_zones.push(zone_tier(ZoneSide::Resistance, 4240.0, 4250.0, 5));

        let signals = check_hourly_zones(4240.0, &table);
        assert_eq!(signals.len(), 1);
        assert!(approx_eq(total(&signals), 4.0));
        assert_eq!(signals[0].bias, SignalBias::Resistive);
        assert_eq!(signals[0].weight, 3.0);
        assert!(check_hourly_zones(4251.0, &table).is_empty());
        assert!(check_hourly_zones(4239.0, &table).is_empty());
    }

    #[test]
    fn overlapping_zones_all_match() {
        let table = ReferenceTable::default();
        // 4010 sits in Major 4K (daily) and 1H S4 MAJOR (hourly)
        assert_eq!(check_daily_zones(4010.0, &table).len(), 1);
        assert_eq!(check_hourly_zones(4010.0, &table).len(), 1);

        let mut table = empty_table();
        table.daily_zones.push(zone_tier(ZoneSide::Support, 100.0, 200.0, 3));
        table.daily_zones.push(zone_tier(ZoneSide::Resistance, 150.0, 250.0, 4));
        let signals = check_daily_zones(175.0, &table);
        assert_eq!(signals.len(), 2);
        assert!(approx_eq(total(&signals), 7.0));
    }

    #[test]
    fn major_round_numbers_only() {
        let mut table = empty_table();
        table.round_numbers = RoundNumbers {
            major: vec![4000.0],
            minor: vec![4050.0],
        };
        let signals = check_round_numbers(4005.0, &table);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].zone_label.as_deref(), Some("Round $4000"));
        assert!(approx_eq(total(&signals), 4.0));
        assert!(check_round_numbers(4006.0, &table).is_empty());
        assert!(check_round_numbers(4050.0, &table).is_empty());
    }

    #[test]
    fn fair_value_gap_scores_discounted_priority() {
        let mut table = empty_table();
        table.fair_value_gaps.push(FairValueGap {
            low: 3999.0,
            high: 4060.0,
            direction: Polarity::Bullish,
            priority: 4,
            note: "Major FVG near 4K".to_string(),
        });
        let signals = check_fair_value_gaps(4000.0, &table);
        assert_eq!(signals.len(), 1);
        assert!(approx_eq(total(&signals), 3.2));
        assert_eq!(signals[0].zone_label.as_deref(), Some("FVG $3999"));
        assert_eq!(signals[0].bias, SignalBias::Neutral);
        assert!(check_fair_value_gaps(3998.0, &table).is_empty());
    }

    #[test]
    fn order_block_matches_at_zero_and_fails_past_tolerance() {
        let mut table = empty_table();
        table.order_blocks.push(OrderBlock {
            price: 4246.0,
            polarity: Polarity::Bearish,
            date: "2025-12-04".to_string(),
            strength: "strong".to_string(),
            evidence: "fixture".to_string(),
        });

        let signals = check_order_blocks(4246.0, &table);
        assert_eq!(signals.len(), 1);
        assert!(approx_eq(total(&signals), 4.0));
        assert_eq!(signals[0].bias, SignalBias::Neutral);
        assert_eq!(signals[0].zone_label.as_deref(), Some("bearish OB $4246"));

        assert_eq!(check_order_blocks(4251.0, &table).len(), 1);
        assert!(check_order_blocks(4252.0, &table).is_empty());
        assert!(check_order_blocks(4240.0, &table).is_empty());
    }

    #[test]
    fn volume_node_uses_wider_band() {
        let mut table = empty_table();
        table.volume_nodes.push(VolumeNode {
            price: 4205.0,
            volume: 88_171.0,
            significance: "VERY_HIGH".to_string(),
            note: "fixture".to_string(),
        });
        assert_eq!(check_volume_profile(4215.0, &table).len(), 1);
        assert_eq!(check_volume_profile(4195.0, &table).len(), 1);
        assert!(check_volume_profile(4216.0, &table).is_empty());
        assert!(approx_eq(total(&check_volume_profile(4205.0, &table)), 4.0));
    }

    #[test]
    fn liquidity_levels_score_each_side_and_skip_zone_list() {
        let mut table = empty_table();
        table.liquidity = vec![
            LiquidityLevel {
                price: 4122.0,
                side: LiquiditySide::EqualHighs,
                touches: 3,
                note: "Strong magnet".to_string(),
            },
            LiquidityLevel {
                price: 4126.0,
                side: LiquiditySide::EqualLows,
                touches: 2,
                note: "fixture".to_string(),
            },
        ];
        let signals = check_liquidity_zones(4124.0, &table);
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].category, SignalCategory::EqualHighs);
        assert_eq!(signals[1].category, SignalCategory::EqualLows);
        assert!(approx_eq(total(&signals), 6.0));
        assert!(signals.iter().all(|s| s.zone_label.is_none()));
        assert!(check_liquidity_zones(4132.0, &table).is_empty());
    }

    #[test]
    fn session_levels_need_refreshed_slot() {
        let mut table = empty_table();
        assert!(check_session_levels(4200.0, &table).is_empty());

        table.previous_day = Some(SessionLevels {
            high: 4203.0,
            low: 4199.0,
            close: 4201.0,
        });
        // Both within three points
        let signals = check_session_levels(4201.0, &table);
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].zone_label.as_deref(), Some("PDH"));
        assert_eq!(signals[1].zone_label.as_deref(), Some("PDL"));
        assert!(approx_eq(total(&signals), 6.0));

        let signals = check_session_levels(4206.0, &table);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].category, SignalCategory::PreviousDayHigh);
        assert!(check_session_levels(4207.0, &table).is_empty());
    }

    #[test]
    fn only_zone_tiers_carry_a_direction() {
        let mut table = ReferenceTable::default();
        table.previous_day = Some(SessionLevels {
            high: 4203.0,
            low: 4199.0,
            close: 4201.0,
        });
        for price in [3300.0, 3930.0, 4000.0, 4097.0, 4124.0, 4201.0, 4246.0, 4356.0] {
            for (name, matcher) in LEVEL_MATCHERS {
                for signal in matcher(price, &table) {
                    let zone_tier = matches!(
                        signal.category,
                        SignalCategory::DailyZone | SignalCategory::HourlyZone
                    );
                    assert_eq!(
                        zone_tier,
                        signal.bias != SignalBias::Neutral,
                        "{} at {}: {:?}",
                        name,
                        price,
                        signal.category
                    );
                }
            }
        }
    }

    #[test]
    fn weights_come_from_the_table() {
        let mut table = empty_table();
        table.weights.order_block = 9.0;
        table.order_blocks.push(OrderBlock {
            price: 4000.0,
            polarity: Polarity::Bullish,
            date: "2025-11-17".to_string(),
            strength: "strong".to_string(),
            evidence: "fixture".to_string(),
        });
        let signals = check_order_blocks(4000.0, &table);
        assert_eq!(signals[0].weight, 9.0);
        // The weight is reported, never scored
        assert!(approx_eq(total(&signals), 4.0));
    }

    #[test]
    fn every_matcher_is_silent_on_an_empty_table() {
        let table = empty_table();
        for (name, matcher) in LEVEL_MATCHERS {
            assert!(matcher(4000.0, &table).is_empty(), "{} emitted", name);
        }
    }
}
