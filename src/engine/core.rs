use chrono::{DateTime, Utc};

use crate::analysis::{
    LEVEL_MATCHERS, LevelMatcher, PATTERN_DETECTORS, build_trade_setup, classify_macro_regime,
    classify_tier, classify_time_quality, recommend,
};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::MarketData;
use crate::domain::ReferenceTable;
use crate::models::Analysis;

/// Owns the reference table and runs one evaluation at a time.
/// The previous-day slot is the only part of the table that changes between runs.
pub struct ConfluenceEngine {
    table: ReferenceTable,
}

impl ConfluenceEngine {
    pub fn new(table: ReferenceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Score `price` against the table and the bars in `data`.
    pub fn evaluate(&mut self, price: f64, timestamp: DateTime<Utc>, data: &MarketData) -> Analysis {
        self.evaluate_with(price, timestamp, data, &LEVEL_MATCHERS)
    }

    /// Same as `evaluate`, with an explicit matcher list.
    pub fn evaluate_with(
        &mut self,
        price: f64,
        timestamp: DateTime<Utc>,
        data: &MarketData,
        matchers: &[(&str, LevelMatcher)],
    ) -> Analysis {
        // 1. Session levels must be in place before any matcher reads the table
        self.table.update_session_levels(&data.daily);
        let table = &self.table;

        // 2. Macro regime, then levels and patterns, all against the same snapshot
        let macro_reading =
            classify_macro_regime(&data.daily, data.secondary_daily.as_deref(), &table.weights);
        let macro_signal = macro_reading.as_ref().and_then(|reading| reading.signal.clone());

        let level_signals = matchers
            .iter()
            .flat_map(|(_, matcher)| matcher(price, table));
        let patterns = PATTERN_DETECTORS
            .iter()
            .flat_map(|(_, detect)| detect(&data.intraday, table));

        // 3. Fold everything into one accumulator
        let mut analysis = macro_signal.into_iter().chain(level_signals).fold(
            Analysis::new(price, timestamp),
            |mut acc, signal| {
                acc.record_signal(signal);
                acc
            },
        );
        for pattern in patterns {
            analysis.record_pattern(pattern);
        }

        // 4. Finalize from the accumulated state only
        let score = analysis.confluence_score;
        analysis.macro_context = macro_reading.map(|reading| reading.context);
        analysis.confluence_level = classify_tier(score);
        analysis.trade_setup = build_trade_setup(price, score, &analysis.confluences);
        analysis.recommendation = recommend(score);
        analysis.time_quality = Some(classify_time_quality(timestamp, &table.time_patterns));

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_signal_trace {
            log::info!(
                "🎯 Evaluated {:.2}: {} signals, {} patterns, score {:.1} ({})",
                price,
                analysis.confluences.len(),
                analysis.patterns.len(),
                score,
                analysis.confluence_level
            );
        }

        analysis
    }
}
