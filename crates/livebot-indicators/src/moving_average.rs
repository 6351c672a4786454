//! Moving average indicators.

use livebot_core::Indicator;

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay,
/// seeded with the SMA of the first `period` values. The first defined
/// value sits at index `period - 1`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; data.len().min(self.warmup())];
        if data.len() < self.period {
            return out;
        }

        let initial_sma: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        out.push(Some(initial_sma));

        let mut ema = initial_sma;
        let one_minus_mult = 1.0 - self.multiplier;
        for &price in &data[self.period..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            out.push(Some(ema));
        }

        out
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
