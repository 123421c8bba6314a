// Small numeric and time helpers shared by the analysis modules
pub mod maths_utils;
pub mod time_utils;

pub use time_utils::TimeUtils;
