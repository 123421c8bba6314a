//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit one line per confluence signal and pattern as they are recorded.
    pub print_signal_trace: bool,
    /// Emit the macro regime inputs (range position, secondary trend).
    pub print_macro_inputs: bool,
    /// Emit which market-data provider was tried and which one succeeded.
    pub print_data_source: bool,
    /// Emit table loading and validation details.
    pub print_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_signal_trace: false,
    print_macro_inputs: false,
    print_data_source: true,
    print_serde: false,
};
