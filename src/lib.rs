#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// The engine
pub mod engine;

// Re-export commonly used types
pub use data::{MarketData, fetch_market_data};
pub use domain::{Bar, ReferenceTable};
pub use engine::ConfluenceEngine;
pub use models::Analysis;
pub use ui::format_alert;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reference-level table (JSON). The built-in table is used when omitted.
    #[arg(long)]
    pub levels: Option<PathBuf>,

    /// Market data snapshot (JSON). Defaults to the persistence directory.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Use the demo market as primary source instead of the data file
    #[arg(long, default_value_t = false)]
    pub demo: bool,

    /// Evaluate this price instead of the latest intraday close
    #[arg(long)]
    pub price: Option<f64>,

    /// Print the analysis as JSON instead of the text alert
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Load the table named on the command line, or fall back to the built-in one.
pub fn load_reference_table(args: &Cli) -> anyhow::Result<ReferenceTable> {
    match &args.levels {
        Some(path) => ReferenceTable::load_from_path(path),
        None => Ok(ReferenceTable::default()),
    }
}
