// Console output
pub mod alert_text;
pub mod utils;

// Re-export the formatter
pub use alert_text::format_alert;
