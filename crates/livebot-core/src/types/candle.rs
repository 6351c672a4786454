//! OHLCV candle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Decimal places kept on a finalized candle's volume.
pub const VOLUME_DECIMALS: u32 = 6;

/// A completed fixed-duration OHLCV candle. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Window start timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Opening mid price
    pub open: f64,
    /// Highest mid price
    pub high: f64,
    /// Lowest mid price
    pub low: f64,
    /// Closing mid price
    pub close: f64,
    /// Summed mid size, rounded to [`VOLUME_DECIMALS`] places
    pub volume: f64,
}

impl Candle {
    /// Create a new candle, rounding the volume to the fixed precision.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        let scale = 10f64.powi(VOLUME_DECIMALS as i32);
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: (volume * scale).round() / scale,
        }
    }

    /// Calculate the candle's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if the candle is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Get the window start as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }
}

/// Append-only chronological candle history for one symbol.
///
/// Owned exclusively by the aggregator; everyone else reads snapshots.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    /// Symbol identifier
    pub symbol: String,
    candles: VecDeque<Candle>,
}

impl CandleSeries {
    /// Create a new empty series.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            candles: VecDeque::new(),
        }
    }

    /// Append a candle. The series only ever grows.
    pub fn push(&mut self, candle: Candle) {
        self.candles.push_back(candle);
    }

    /// Get the number of candles.
    #[inline]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get the last candle.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.back()
    }

    /// Get a candle by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Clone the history into an ordered Vec, oldest first.
    pub fn snapshot(&self) -> Vec<Candle> {
        self.candles.iter().copied().collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Get an iterator over the candles.
    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_rounding() {
        let candle = Candle::new(0, 1.0, 2.0, 0.5, 1.5, 0.123456789);
        assert!((candle.volume - 0.123457).abs() < 1e-12);
    }

    #[test]
    fn test_candle_shape() {
        let candle = Candle::new(1000, 100.0, 110.0, 95.0, 105.0, 3.0);
        assert!((candle.range() - 15.0).abs() < 1e-9);
        assert!(candle.is_bullish());
        assert_eq!(candle.datetime().timestamp_millis(), 1000);
    }

    #[test]
    fn test_series_append_only() {
        let mut series = CandleSeries::new("BTC/USD");
        series.push(Candle::new(1, 1.0, 1.0, 1.0, 1.0, 1.0));
        series.push(Candle::new(2, 2.0, 2.0, 2.0, 2.0, 1.0));

        let snap = series.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].timestamp, 1);
        assert_eq!(series.last().unwrap().timestamp, 2);
        assert_eq!(series.closes(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_series_never_shrinks() {
        let mut series = CandleSeries::new("BTC/USD");
        for i in 0..1000 {
            let before = series.len();
            series.push(Candle::new(i, 1.0, 1.0, 1.0, 1.0, 1.0));
            assert_eq!(series.len(), before + 1);
        }
        assert_eq!(series.get(0).unwrap().timestamp, 0);
    }
}
