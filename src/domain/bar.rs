use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarType {
    Bullish,
    Bearish,
}

/// One OHLCV bar. Series of bars are always ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn get_type(&self) -> BarType {
        if self.close >= self.open {
            BarType::Bullish
        } else {
            BarType::Bearish
        }
    }

    // Returns the low and high of the bar body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            BarType::Bullish => (self.open, self.close),
            BarType::Bearish => (self.close, self.open),
        }
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.body_range().1
    }

    pub fn lower_wick(&self) -> f64 {
        self.body_range().0 - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hammer_geometry() {
        let bar = Bar::new(Utc::now(), 4201.0, 4202.0, 4197.0, 4201.5, 2000.0);
        assert_eq!(bar.get_type(), BarType::Bullish);
        assert!(approx_eq(bar.body(), 0.5));
        assert!(approx_eq(bar.lower_wick(), 4.0));
        assert!(approx_eq(bar.upper_wick(), 0.5));
    }

    #[test]
    fn bearish_body_range_is_ordered() {
        let bar = Bar::new(Utc::now(), 110.0, 112.0, 100.0, 105.0, 1.0);
        assert_eq!(bar.get_type(), BarType::Bearish);
        assert_eq!(bar.body_range(), (105.0, 110.0));
        assert!(approx_eq(bar.upper_wick(), 2.0));
        assert!(approx_eq(bar.lower_wick(), 5.0));
    }
}
