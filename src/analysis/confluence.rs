//! Final stage of an evaluation: pure functions of the accumulated state.

use crate::config::SCORING;
use crate::domain::signal::{ConfluenceSignal, SignalBias};
use crate::models::analysis::{
    Action, Confidence, ConfluenceTier, Recommendation, TradeDirection, TradeSetup,
};

/// Step function of the score, highest threshold first
pub fn classify_tier(score: f64) -> ConfluenceTier {
    let tiers = &SCORING.tiers;
    if score >= tiers.extreme {
        ConfluenceTier::Extreme
    } else if score >= tiers.very_high {
        ConfluenceTier::VeryHigh
    } else if score >= tiers.high {
        ConfluenceTier::High
    } else {
        ConfluenceTier::Moderate
    }
}

/// LONG when any signal is supportive, SHORT otherwise (including no signals at all).
pub fn infer_direction(signals: &[ConfluenceSignal]) -> TradeDirection {
    if signals.iter().any(|s| s.bias == SignalBias::Supportive) {
        TradeDirection::Long
    } else {
        TradeDirection::Short
    }
}

/// Fixed-offset plan around `price`, only once the score reaches the activation threshold
pub fn build_trade_setup(
    price: f64,
    score: f64,
    signals: &[ConfluenceSignal],
) -> Option<TradeSetup> {
    let plan = &SCORING.trade_plan;
    if score < plan.activation_score {
        return None;
    }

    let direction = infer_direction(signals);
    let (stop, target) = match direction {
        TradeDirection::Long => (price - plan.stop_offset, price + plan.target_offset),
        TradeDirection::Short => (price + plan.stop_offset, price - plan.target_offset),
    };

    Some(TradeSetup {
        direction,
        entry: price,
        stop,
        target,
        reason: format!("Confluence Score {:.1}", score),
    })
}

/// Action ladder. Deliberately separate from the tier ladder.
pub fn recommend(score: f64) -> Recommendation {
    let cuts = &SCORING.recommendation;
    if score >= cuts.killer_execution {
        Recommendation {
            action: Action::KillerExecution,
            confidence: Confidence::Extreme,
        }
    } else if score >= cuts.prepare_entry {
        Recommendation {
            action: Action::PrepareEntry,
            confidence: Confidence::High,
        }
    } else {
        Recommendation::default()
    }
}
