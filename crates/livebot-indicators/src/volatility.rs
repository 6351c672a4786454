//! Volatility indicators.

use livebot_core::Indicator;

/// Average True Range (ATR).
///
/// Measures volatility as the Wilder-smoothed average of the true
/// range. The first defined value sits at index `period` (true range
/// needs a previous close).
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Compute ATR from full OHLC data, aligned with the input.
    pub fn compute_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len());
        let mut out = vec![None; len.min(self.warmup())];
        if len <= self.period {
            return out;
        }

        let mut tr = Vec::with_capacity(len - 1);
        for i in 1..len {
            let high_low = high[i] - low[i];
            let high_close = (high[i] - close[i - 1]).abs();
            let low_close = (low[i] - close[i - 1]).abs();
            tr.push(high_low.max(high_close).max(low_close));
        }

        out.extend(Self::wilder_smooth(&tr, self.period).into_iter().map(Some));
        out
    }

    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        let period_f64 = period as f64;
        let mut result = Vec::with_capacity(values.len() - period + 1);

        let mut atr: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(atr);

        for &value in &values[period..] {
            atr = (atr * (period_f64 - 1.0) + value) / period_f64;
            result.push(atr);
        }

        result
    }
}

impl Indicator for Atr {
    /// Approximate ATR from close prices only, using close-to-close
    /// moves as the true range.
    fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; data.len().min(self.warmup())];
        if data.len() <= self.period {
            return out;
        }

        let tr: Vec<f64> = data.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
        out.extend(Self::wilder_smooth(&tr, self.period).into_iter().map(Some));
        out
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "ATR"
    }
}
