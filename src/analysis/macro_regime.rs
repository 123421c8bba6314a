//! Coarse macro regime: where the instrument sits in its recent daily range,
//! read against the trend of a correlated secondary series.

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::SCORING;
use crate::domain::bar::Bar;
use crate::domain::reference_table::ConfluenceWeights;
use crate::domain::signal::{ConfluenceSignal, SignalBias, SignalCategory};
use crate::models::analysis::{MacroContext, MacroRegime};
use crate::utils::maths_utils::{get_max, get_min, mean, position_in_range, tail};

/// Classifier output: the context always, a signal only for the two directional regimes
#[derive(Debug, Clone, PartialEq)]
pub struct MacroReading {
    pub context: MacroContext,
    pub signal: Option<ConfluenceSignal>,
}

/// Returns `None` when the primary daily series is missing or empty.
pub fn classify_macro_regime(
    daily: &[Bar],
    secondary_daily: Option<&[Bar]>,
    weights: &ConfluenceWeights,
) -> Option<MacroReading> {
    let settings = &SCORING.macro_regime;
    let last_close = daily.last()?.close;

    let window = tail(daily, settings.window);
    let highs: Vec<f64> = window.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = window.iter().map(|b| b.low).collect();
    let range_position = match (get_min(&lows), get_max(&highs)) {
        (Some(low), Some(high)) => {
            position_in_range(last_close, low, high, settings.neutral_position)
        }
        _ => settings.neutral_position,
    };

    let secondary_bearish = secondary_daily
        .and_then(|bars| {
            let last = bars.last()?.close;
            let closes: Vec<f64> = tail(bars, settings.window).iter().map(|b| b.close).collect();
            mean(&closes).map(|avg| last < avg)
        })
        .unwrap_or(false);

    let regime = if range_position > settings.bull_position && secondary_bearish {
        MacroRegime::StrongBull
    } else if range_position < settings.bear_position && !secondary_bearish {
        MacroRegime::StrongBear
    } else {
        MacroRegime::Neutral
    };

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_macro_inputs {
        log::info!(
            "Macro inputs: position {:.3}, secondary bearish {} -> {}",
            range_position,
            secondary_bearish,
            regime
        );
    }

    let signal = match regime {
        MacroRegime::Neutral => None,
        MacroRegime::StrongBull | MacroRegime::StrongBear => {
            let weight = weights.weight_for(SignalCategory::MacroAlignment);
            Some(ConfluenceSignal {
                category: SignalCategory::MacroAlignment,
                name: regime.to_string(),
                detail: "Range position + secondary correlation".to_string(),
                bias: SignalBias::Neutral,
                weight,
                score_contribution: weight,
                zone_label: None,
            })
        }
    };

    Some(MacroReading {
        context: MacroContext {
            regime,
            range_position,
            secondary_bearish,
        },
        signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn bar(high: f64, low: f64, close: f64) -> Bar {
        Bar::new(Utc::now(), close, high, low, close, 1.0)
    }

    /// Daily series closing at `last_close` inside a fixed 100..200 range
    fn primary(last_close: f64) -> Vec<Bar> {
        vec![bar(200.0, 150.0, 180.0), bar(160.0, 100.0, 120.0), bar(190.0, 110.0, last_close)]
    }

    fn secondary(closes: &[f64]) -> Vec<Bar> {
        closes.iter().map(|&c| bar(c + 1.0, c - 1.0, c)).collect()
    }

    #[test]
    fn missing_primary_returns_none() {
        let weights = ConfluenceWeights::default();
        assert!(classify_macro_regime(&[], None, &weights).is_none());
    }

    #[test]
    fn absent_secondary_is_neutral_in_upper_range() {
        let weights = ConfluenceWeights::default();
        let reading = classify_macro_regime(&primary(190.0), None, &weights).unwrap();
        assert_eq!(reading.context.regime, MacroRegime::Neutral);
        assert!(!reading.context.secondary_bearish);
        assert!(approx_eq(reading.context.range_position, 0.9));
        assert!(reading.signal.is_none());
    }

    #[test]
    fn strong_bull_needs_bearish_secondary() {
        let weights = ConfluenceWeights::default();
        let dxy = secondary(&[105.0, 104.0, 103.0, 100.0]);
        let reading = classify_macro_regime(&primary(170.0), Some(&dxy), &weights).unwrap();
        assert_eq!(reading.context.regime, MacroRegime::StrongBull);
        assert!(reading.context.secondary_bearish);
        let signal = reading.signal.unwrap();
        assert_eq!(signal.category, SignalCategory::MacroAlignment);
        assert_eq!(signal.score_contribution, 6.0);
        assert_eq!(signal.name, "STRONG_BULL");
    }

    #[test]
    fn strong_bear_in_lower_range_without_secondary() {
        let weights = ConfluenceWeights::default();
        let reading = classify_macro_regime(&primary(120.0), None, &weights).unwrap();
        assert_eq!(reading.context.regime, MacroRegime::StrongBear);
        assert_eq!(reading.signal.map(|s| s.score_contribution), Some(6.0));
    }

    #[test]
    fn degenerate_range_sits_at_midpoint() {
        let weights = ConfluenceWeights::default();
        let flat = vec![bar(50.0, 50.0, 50.0), bar(50.0, 50.0, 50.0)];
        let reading = classify_macro_regime(&flat, None, &weights).unwrap();
        assert!(approx_eq(reading.context.range_position, 0.5));
        assert_eq!(reading.context.regime, MacroRegime::Neutral);
    }

    #[test]
    fn window_is_capped_at_fifty_bars() {
        let weights = ConfluenceWeights::default();
        // An old extreme low outside the window must not widen the range
        let mut bars = vec![bar(300.0, 0.0, 150.0)];
        bars.extend((0..50).map(|_| bar(200.0, 100.0, 150.0)));
        bars.push(bar(200.0, 100.0, 180.0));
        let reading = classify_macro_regime(&bars, None, &weights).unwrap();
        assert!(approx_eq(reading.context.range_position, 0.8));
    }

    #[test]
    fn empty_secondary_counts_as_not_bearish() {
        let weights = ConfluenceWeights::default();
        let empty: Vec<Bar> = Vec::new();
        let reading = classify_macro_regime(&primary(120.0), Some(&empty), &weights).unwrap();
        assert!(!reading.context.secondary_bearish);
        assert_eq!(reading.context.regime, MacroRegime::StrongBear);
    }
}
