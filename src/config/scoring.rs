//! Scoring configuration: tolerances, flat contributions and the threshold ladders.

/// Proximity bands, one per point-like category (absolute price units)
pub struct ToleranceSettings {
    pub round_number: f64,
    pub order_block: f64,
    pub volume_node: f64,
    pub liquidity_level: f64,
    pub session_level: f64,
}

/// Flat score added per match for categories that do not score by priority
pub struct FlatPoints {
    pub round_number_major: f64,
    pub order_block: f64,
    pub volume_node: f64,
    pub liquidity_level: f64,
    pub session_level: f64,
    pub bullish_wick: f64,
    pub high_volume_validation: f64,
    pub bearish_wick: f64,
    pub liquidity_grab: f64,
}

/// Settings for the macro regime classifier
pub struct MacroSettings {
    /// Number of most recent daily bars used for the range and the secondary mean
    pub window: usize,
    /// Range position above which a bullish regime is possible
    pub bull_position: f64,
    /// Range position below which a bearish regime is possible
    pub bear_position: f64,
    /// Position reported when the range is degenerate
    pub neutral_position: f64,
}

/// Settings for the bar-pattern detectors
pub struct PatternSettings {
    pub min_bars_wick_rejection: usize,
    pub min_bars_liquidity_grab: usize,
    /// Trailing bars averaged for the volume validation (includes the last bar)
    pub volume_window: usize,
    /// Last-bar volume must exceed the mean by this multiple
    pub volume_multiplier: f64,
    /// Minimum undercut of the prior low for a sweep
    pub sweep_distance: f64,
}

/// Score cut points for the tier label. Evaluated highest first.
pub struct TierThresholds {
    pub extreme: f64,
    pub very_high: f64,
    pub high: f64,
}

/// Score cut points for the action. Kept apart from the tier ladder on purpose.
pub struct RecommendationThresholds {
    pub killer_execution: f64,
    pub prepare_entry: f64,
}

pub struct TradePlanSettings {
    /// Minimum score before a plan is generated
    pub activation_score: f64,
    pub stop_offset: f64,
    pub target_offset: f64,
}

/// The Master Scoring Configuration
pub struct ScoringConfig {
    /// Multiplier applied to hourly zone and FVG priorities
    pub priority_multiplier: f64,
    pub tolerance: ToleranceSettings,
    pub points: FlatPoints,
    pub macro_regime: MacroSettings,
    pub patterns: PatternSettings,
    pub tiers: TierThresholds,
    pub recommendation: RecommendationThresholds,
    pub trade_plan: TradePlanSettings,
    /// Nominal score ceiling shown in reports
    pub report_scale: f64,
}

pub const SCORING: ScoringConfig = ScoringConfig {
    priority_multiplier: 0.8,

    tolerance: ToleranceSettings {
        round_number: 5.0,
        order_block: 5.0,
        volume_node: 10.0,
        liquidity_level: 5.0,
        session_level: 3.0,
    },

    points: FlatPoints {
        round_number_major: 4.0,
        order_block: 4.0,
        volume_node: 4.0,
        liquidity_level: 3.0,
        session_level: 3.0,
        bullish_wick: 3.0,
        high_volume_validation: 5.0,
        bearish_wick: 3.0,
        liquidity_grab: 4.0,
    },

    macro_regime: MacroSettings {
        window: 50,
        bull_position: 0.6,
        bear_position: 0.4,
        neutral_position: 0.5,
    },

    patterns: PatternSettings {
        min_bars_wick_rejection: 2,
        min_bars_liquidity_grab: 3,
        volume_window: 20,
        volume_multiplier: 1.5,
        sweep_distance: 1.0,
    },

    tiers: TierThresholds {
        extreme: 20.0,
        very_high: 15.0,
        high: 10.0,
    },

    recommendation: RecommendationThresholds {
        killer_execution: 18.0,
        prepare_entry: 12.0,
    },

    trade_plan: TradePlanSettings {
        activation_score: 10.0,
        stop_offset: 5.0,
        target_offset: 15.0,
    },

    report_scale: 30.0,
};
