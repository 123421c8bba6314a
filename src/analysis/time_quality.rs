use chrono::{DateTime, Utc};

use crate::domain::levels::TimePatterns;
use crate::models::analysis::TimeQuality;
use crate::utils::TimeUtils;

/// Label the session-clock hour of `timestamp`.
/// Prime windows are checked first, then avoid windows; first match wins.
pub fn classify_time_quality(timestamp: DateTime<Utc>, patterns: &TimePatterns) -> TimeQuality {
    let (hour, weekday) = TimeUtils::session_hour_and_weekday(timestamp, patterns.utc_offset_hours);

    if let Some(window) = patterns.best_times.iter().find(|w| w.covers(hour, weekday)) {
        return TimeQuality::Prime {
            name: window.name.clone(),
            quality: window.quality.clone(),
        };
    }
    if let Some(window) = patterns.avoid_times.iter().find(|w| w.covers(hour, weekday)) {
        return TimeQuality::Avoid {
            name: window.name.clone(),
        };
    }
    TimeQuality::OffPeak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference_table::ReferenceTable;
    use chrono::TimeZone;

    fn patterns() -> TimePatterns {
        ReferenceTable::default().time_patterns
    }

    // 2025-12-05 is a Friday
    fn utc(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, day, hour, 30, 0).unwrap()
    }

    #[test]
    fn first_prime_window_wins() {
        // 14:30 UTC is 09:30 on the session clock: NY Open and Overlap both cover it
        let quality = classify_time_quality(utc(3, 14), &patterns());
        assert_eq!(
            quality,
            TimeQuality::Prime {
                name: "NY Open".to_string(),
                quality: "EXCELLENT".to_string()
            }
        );
        assert_eq!(quality.to_string(), "✅ NY Open (EXCELLENT)");
    }

    #[test]
    fn wrapping_avoid_window() {
        // 03:30 UTC is 22:30 the previous evening
        assert_eq!(
            classify_time_quality(utc(3, 3), &patterns()),
            TimeQuality::Avoid {
                name: "Asian Session".to_string()
            }
        );
        // 06:30 UTC is 01:30, still inside the wrapped window
        assert!(matches!(
            classify_time_quality(utc(3, 6), &patterns()),
            TimeQuality::Avoid { .. }
        ));
    }

    #[test]
    fn weekday_restricted_window() {
        // 20:30 UTC is 15:30 on the session clock
        assert_eq!(
            classify_time_quality(utc(5, 20), &patterns()),
            TimeQuality::Avoid {
                name: "Late Friday".to_string()
            }
        );
        assert_eq!(classify_time_quality(utc(3, 20), &patterns()), TimeQuality::OffPeak);
    }

    #[test]
    fn no_windows_means_off_peak() {
        let empty = TimePatterns {
            utc_offset_hours: 0,
            best_times: Vec::new(),
            avoid_times: Vec::new(),
        };
        let quality = classify_time_quality(utc(3, 9), &empty);
        assert_eq!(quality, TimeQuality::OffPeak);
        assert_eq!(quality.to_string(), "⚠️ Off-Peak");
    }
}
