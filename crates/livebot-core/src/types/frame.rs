//! Indicator-augmented candle history.

use super::Candle;

/// Candle history with derived indicator columns aligned 1:1 with it.
///
/// Positions before an indicator's warm-up length hold `None` rather
/// than a value, so consumers never index past a defined range.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    pub candles: Vec<Candle>,
    pub rsi: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub ema_fast: Vec<Option<f64>>,
    pub ema_mid: Vec<Option<f64>>,
    pub ema_slow: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Number of rows in the frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if the frame is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Close price of the most recent candle.
    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    /// RSI at the most recent candle, if warmed up.
    pub fn last_rsi(&self) -> Option<f64> {
        self.rsi.last().copied().flatten()
    }

    /// RSI at the second-to-last candle, if warmed up.
    pub fn prev_rsi(&self) -> Option<f64> {
        let n = self.rsi.len();
        if n < 2 {
            return None;
        }
        self.rsi[n - 2]
    }

    /// ATR at the most recent candle, if warmed up.
    pub fn last_atr(&self) -> Option<f64> {
        self.atr.last().copied().flatten()
    }
}
