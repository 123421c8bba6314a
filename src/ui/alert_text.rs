use itertools::Itertools;

use crate::config::SCORING;
use crate::models::Analysis;
use crate::ui::utils::{format_price, rule};
use crate::utils::time_utils::{format_clock, format_date};

const ALERT_WIDTH: usize = 60;

/// Console alert for one evaluation
pub fn format_alert(analysis: &Analysis) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(rule('=', ALERT_WIDTH));
    lines.push("🦁 ZONE CONFLUENCE: COMPLETE ANALYSIS".to_string());
    let time_quality = analysis
        .time_quality
        .as_ref()
        .map(|q| q.to_string())
        .unwrap_or_else(|| "Normal".to_string());
    lines.push(format!(
        "⏰ {} {} | ⏳ {}",
        format_date(analysis.timestamp),
        format_clock(analysis.timestamp),
        time_quality
    ));
    lines.push(rule('=', ALERT_WIDTH));

    lines.push(format!("\n💰 PRICE: {}", format_price(analysis.price)));
    lines.push(format!(
        "📊 SCORE: {:.1}/{:.0} ({})",
        analysis.confluence_score, SCORING.report_scale, analysis.confluence_level
    ));

    match &analysis.macro_context {
        Some(context) => lines.push(format!(
            "\n🌍 MACRO: {} (Range Pos: {:.2})",
            context.regime, context.range_position
        )),
        None => lines.push("\n🌍 MACRO: N/A".to_string()),
    }

    if !analysis.zones.is_empty() {
        lines.push("\n📍 ZONES HIT:".to_string());
        lines.push(analysis.zones.iter().map(|z| format!("   • {}", z)).join("\n"));
    }

    if !analysis.patterns.is_empty() {
        lines.push("\n⚡ PATTERNS:".to_string());
        lines.push(
            analysis
                .patterns
                .iter()
                .map(|p| format!("   • {}: {}", p.kind, p.note))
                .join("\n"),
        );
    }

    lines.push(format!("\n{}", rule('-', ALERT_WIDTH)));
    lines.push(format!(
        "🎯 DECISION: {} ({})",
        analysis.recommendation.action, analysis.recommendation.confidence
    ));
    if let Some(setup) = &analysis.trade_setup {
        lines.push(format!(
            "   Plan: {} @ {:.1} (Stop: {:.1}, Target: {:.1})",
            setup.direction, setup.entry, setup.stop, setup.target
        ));
    }
    lines.push(rule('-', ALERT_WIDTH));

    lines.join("\n")
}
