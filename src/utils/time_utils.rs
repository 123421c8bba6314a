use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_S * 60 * 5;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const CLOCK_FORMAT: &str = "%H:%M:%S";

    /// Hour of day (0..24) and weekday (Monday = 0) on a session clock that sits
    /// `utc_offset_hours` away from UTC.
    pub fn session_hour_and_weekday(timestamp: DateTime<Utc>, utc_offset_hours: i32) -> (u32, u32) {
        let shifted = timestamp + Duration::hours(utc_offset_hours as i64);
        (shifted.hour(), shifted.weekday().num_days_from_monday())
    }
}

pub fn format_clock(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TimeUtils::CLOCK_FORMAT).to_string()
}

pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn session_clock_applies_offset_across_midnight() {
        // Saturday 02:30 UTC is Friday 21:30 at UTC-5
        let ts = Utc.with_ymd_and_hms(2025, 12, 6, 2, 30, 0).unwrap();
        assert_eq!(TimeUtils::session_hour_and_weekday(ts, -5), (21, 4));
        assert_eq!(TimeUtils::session_hour_and_weekday(ts, 0), (2, 5));
    }

    #[test]
    fn formats_clock_and_date() {
        let ts = Utc.with_ymd_and_hms(2025, 12, 5, 9, 5, 7).unwrap();
        assert_eq!(format_clock(ts), "09:05:07");
        assert_eq!(format_date(ts), "2025-12-05");
    }
}
