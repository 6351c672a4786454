//! Momentum indicators.

use livebot_core::Indicator;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes using
/// Wilder's smoothing. The first defined value sits at index `period`
/// (it needs `period + 1` prices).
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let period_f64 = period as f64;
        let mut result = Vec::with_capacity(values.len() - period + 1);

        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }
}

impl Indicator for Rsi {
    fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; data.len().min(self.warmup())];
        if data.len() <= self.period {
            return out;
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);
        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        out.extend(
            avg_gains
                .iter()
                .zip(avg_losses.iter())
                .map(|(&gain, &loss)| {
                    if loss == 0.0 {
                        Some(100.0)
                    } else {
                        Some(100.0 - (100.0 / (1.0 + gain / loss)))
                    }
                }),
        );
        out
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_alignment() {
        let rsi = Rsi::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let out = rsi.compute(&data);

        assert_eq!(out.len(), data.len());
        assert!(out[..3].iter().all(Option::is_none));
        assert!(out[3..].iter().all(Option::is_some));
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let rsi = Rsi::new(3);
        let data: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let out = rsi.compute(&data);
        assert!((out.last().unwrap().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_flat_alternation_is_50() {
        // Equal gains and losses should hover at 50.
        let rsi = Rsi::new(2);
        let data = vec![100.0, 101.0, 100.0, 101.0, 100.0, 101.0, 100.0, 101.0];
        let out = rsi.compute(&data);
        let last = out.last().unwrap().unwrap();
        assert!((last - 50.0).abs() < 5.0, "rsi was {last}");
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        let out = rsi.compute(&[1.0, 2.0, 3.0]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(Option::is_none));
    }
}
