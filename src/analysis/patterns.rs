//! Bar-pattern detectors. They look at the tail of the intraday series only,
//! never at price levels. Too few bars is a no-op.

use crate::config::SCORING;
use crate::domain::bar::Bar;
use crate::domain::reference_table::ReferenceTable;
use crate::domain::signal::{DetectedPattern, PatternKind};
use crate::utils::maths_utils::{get_min, mean, tail};

pub type PatternDetector = fn(&[Bar], &ReferenceTable) -> Vec<DetectedPattern>;

pub const PATTERN_DETECTORS: [(&str, PatternDetector); 2] = [
    ("wick_rejection", detect_wick_rejection),
    ("liquidity_grab", detect_liquidity_grab),
];

fn is_rejection(wick: f64, body: f64, min_wick_size: f64, ratio: f64) -> bool {
    wick > min_wick_size && (body == 0.0 || wick / body >= ratio)
}

/// Wick rejection on the last bar.
/// A bullish (lower) wick may be validated by volume; the bearish side never is.
pub fn detect_wick_rejection(bars: &[Bar], table: &ReferenceTable) -> Vec<DetectedPattern> {
    let settings = &SCORING.patterns;
    let rules = &table.wick_rejection;
    let mut found = Vec::new();

    if bars.len() < settings.min_bars_wick_rejection {
        return found;
    }
    let Some(last) = bars.last() else {
        return found;
    };

    let body = last.body();
    let lower_wick = last.lower_wick();
    let upper_wick = last.upper_wick();

    if is_rejection(lower_wick, body, rules.min_wick_size, rules.wick_to_body_ratio) {
        found.push(DetectedPattern::new(
            PatternKind::BullishWick,
            format!("Lower wick {:.1}", lower_wick),
            SCORING.points.bullish_wick,
        ));

        let volumes: Vec<f64> = tail(bars, settings.volume_window).iter().map(|b| b.volume).collect();
        if let Some(avg_volume) = mean(&volumes) {
            if last.volume > avg_volume * settings.volume_multiplier {
                found.push(DetectedPattern::new(
                    PatternKind::HighVolume,
                    "Validation",
                    SCORING.points.high_volume_validation,
                ));
            }
        }
    }

    if is_rejection(upper_wick, body, rules.min_wick_size, rules.wick_to_body_ratio) {
        found.push(DetectedPattern::new(
            PatternKind::BearishWick,
            format!("Upper wick {:.1}", upper_wick),
            SCORING.points.bearish_wick,
        ));
    }

    found
}

/// Bullish sweep and reclaim of the prior two bars' low. There is no bearish twin.
pub fn detect_liquidity_grab(bars: &[Bar], _table: &ReferenceTable) -> Vec<DetectedPattern> {
    let settings = &SCORING.patterns;
    if bars.len() < settings.min_bars_liquidity_grab {
        return Vec::new();
    }

    let recent = tail(bars, settings.min_bars_liquidity_grab);
    let Some((last, prior)) = recent.split_last() else {
        return Vec::new();
    };
    let prior_lows: Vec<f64> = prior.iter().map(|b| b.low).collect();
    let Some(prior_low) = get_min(&prior_lows) else {
        return Vec::new();
    };

    if last.low < prior_low - settings.sweep_distance && last.close > prior_low {
        vec![DetectedPattern::new(
            PatternKind::LiquidityGrabBull,
            "Sweep & Reclaim",
            SCORING.points.liquidity_grab,
        )]
    } else {
        Vec::new()
    }
}
