// Market data providers and loading
pub mod demo;
pub mod json_file;
pub mod market_data;
pub mod pre_main_async;

// Re-export commonly used types
pub use demo::DemoSource;
pub use json_file::{JsonFileSource, MarketDataFile};
pub use market_data::{MarketData, MarketDataSource, get_market_data_async};
pub use pre_main_async::fetch_market_data;
