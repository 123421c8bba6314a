//! Deterministic demo market: price resting on hourly support just above $4200,
//! a high-volume hammer one bar back, and a steady daily uptrend.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::data::market_data::{MarketData, MarketDataSource};
use crate::domain::Bar;
use crate::utils::TimeUtils;

/// Close time of the last intraday bar (2025-12-05 15:00 UTC)
const DEMO_LAST_BAR_MS: i64 = 1_764_946_800_000;
/// Open time of the last daily bar (2025-12-05 00:00 UTC)
const DEMO_LAST_DAY_MS: i64 = 1_764_892_800_000;

const INTRADAY_BARS: usize = 20;
const DAILY_BARS: usize = 50;

pub struct DemoSource;

impl DemoSource {
    pub fn generate() -> MarketData {
        MarketData {
            daily: daily_bars(),
            intraday: intraday_bars(),
            secondary_daily: None,
        }
    }
}

#[async_trait]
impl MarketDataSource for DemoSource {
    async fn fetch_market_data(&self) -> Result<MarketData> {
        Ok(Self::generate())
    }

    fn signature(&self) -> &'static str {
        "Demo Data"
    }
}

fn at_ms(ms: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::milliseconds(ms)
}

fn intraday_bars() -> Vec<Bar> {
    let first_ms = DEMO_LAST_BAR_MS - (INTRADAY_BARS as i64 - 1) * TimeUtils::MS_IN_5_MIN;
    let mut bars: Vec<Bar> = (0..INTRADAY_BARS - 2)
        .map(|i| {
            let open = 4199.0 + 0.25 * (i % 4) as f64;
            let close = open + 0.5;
            let volume = 1000.0 + 50.0 * (i % 5) as f64;
            Bar::new(
                at_ms(first_ms + i as i64 * TimeUtils::MS_IN_5_MIN),
                open,
                close + 0.5,
                open - 0.5,
                close,
                volume,
            )
        })
        .collect();

    // Hammer at support, then a continuation bar
    let hammer_ms = DEMO_LAST_BAR_MS - TimeUtils::MS_IN_5_MIN;
    bars.push(Bar::new(at_ms(hammer_ms), 4201.0, 4202.0, 4198.0, 4201.5, 5000.0));
    bars.push(Bar::new(at_ms(DEMO_LAST_BAR_MS), 4201.5, 4204.0, 4201.5, 4203.5, 3000.0));
    bars
}

fn daily_bars() -> Vec<Bar> {
    let first_ms = DEMO_LAST_DAY_MS - (DAILY_BARS as i64 - 1) * TimeUtils::MS_IN_D;
    (0..DAILY_BARS)
        .map(|i| {
            let open = 4100.0 + 2.0 * i as f64;
            let close = open + 2.0;
            Bar::new(
                at_ms(first_ms + i as i64 * TimeUtils::MS_IN_D),
                open,
                close + 5.0,
                open - 5.0,
                close,
                50_000.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_of_the_demo_market() {
        let data = DemoSource::generate();
        assert_eq!(data.intraday.len(), INTRADAY_BARS);
        assert_eq!(data.daily.len(), DAILY_BARS);
        assert!(data.secondary_daily.is_none());
        assert_eq!(data.current_price(), Some(4203.5));

        let hammer = data.intraday[INTRADAY_BARS - 2];
        assert_eq!(hammer.lower_wick(), 3.0);
        assert_eq!(hammer.volume, 5000.0);

        let prev_day = data.daily[DAILY_BARS - 2];
        assert_eq!((prev_day.open, prev_day.high, prev_day.low, prev_day.close), (4196.0, 4203.0, 4191.0, 4198.0));
    }

    #[test]
    fn series_are_oldest_first_and_well_formed() {
        let data = DemoSource::generate();
        for series in [&data.intraday, &data.daily] {
            assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
            assert!(series.iter().all(|b| b.low <= b.open.min(b.close) && b.high >= b.open.max(b.close)));
        }
        assert_eq!(data.intraday.last().unwrap().timestamp.timestamp_millis(), DEMO_LAST_BAR_MS);
    }

    #[tokio::test]
    async fn provider_returns_the_same_market() {
        let data = DemoSource.fetch_market_data().await.unwrap();
        assert_eq!(data, DemoSource::generate());
        assert_eq!(DemoSource.signature(), "Demo Data");
    }
}
