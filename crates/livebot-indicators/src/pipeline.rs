//! Indicator pipeline: candles in, augmented frame out.

use livebot_core::error::IndicatorError;
use livebot_core::{Candle, Indicator, IndicatorFrame};
use serde::{Deserialize, Serialize};

use crate::{Atr, Ema, Rsi};

/// Periods for every indicator the pipeline computes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub atr: usize,
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: 14,
            atr: 14,
            ema_fast: 20,
            ema_mid: 50,
            ema_slow: 100,
        }
    }
}

/// Pure mapping from an ordered candle history to the same history with
/// aligned indicator columns attached.
#[derive(Debug, Clone)]
pub struct IndicatorPipeline {
    rsi: Rsi,
    atr: Atr,
    ema_fast: Ema,
    ema_mid: Ema,
    ema_slow: Ema,
}

impl IndicatorPipeline {
    /// Build a pipeline from configured periods.
    pub fn new(periods: &IndicatorPeriods) -> Self {
        Self {
            rsi: Rsi::new(periods.rsi),
            atr: Atr::new(periods.atr),
            ema_fast: Ema::new(periods.ema_fast),
            ema_mid: Ema::new(periods.ema_mid),
            ema_slow: Ema::new(periods.ema_slow),
        }
    }

    /// Longest warm-up across all columns; the frame's last row is fully
    /// defined once the history reaches `warmup() + 1` candles.
    pub fn warmup(&self) -> usize {
        self.rsi
            .warmup()
            .max(self.atr.warmup())
            .max(self.ema_fast.warmup())
            .max(self.ema_mid.warmup())
            .max(self.ema_slow.warmup())
    }

    /// Compute all indicator columns over the history.
    ///
    /// Fails only when the history is too short for the RSI column to
    /// have a single defined value; other columns simply stay `None`
    /// where undefined.
    pub fn augment(&self, candles: &[Candle]) -> Result<IndicatorFrame, IndicatorError> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

        self.rsi.validate_data(&closes)?;

        Ok(IndicatorFrame {
            candles: candles.to_vec(),
            rsi: self.rsi.compute(&closes),
            atr: self.atr.compute_ohlc(&highs, &lows, &closes),
            ema_fast: self.ema_fast.compute(&closes),
            ema_mid: self.ema_mid.compute(&closes),
            ema_slow: self.ema_slow.compute(&closes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 100.0 + (i % 7) as f64;
                Candle::new(i as i64 * 300_000, base, base + 1.0, base - 1.0, base + 0.5, 1.0)
            })
            .collect()
    }

    #[test]
    fn test_augment_aligns_all_columns() {
        let pipeline = IndicatorPipeline::new(&IndicatorPeriods::default());
        let history = candles(120);
        let frame = pipeline.augment(&history).unwrap();

        assert_eq!(frame.len(), history.len());
        assert_eq!(frame.rsi.len(), history.len());
        assert_eq!(frame.atr.len(), history.len());
        assert_eq!(frame.ema_slow.len(), history.len());

        // Slowest column defines the frame-wide warm-up.
        assert!(frame.ema_slow[98].is_none());
        assert!(frame.ema_slow[99].is_some());
        assert!(frame.last_rsi().is_some());
        assert!(frame.last_atr().is_some());
    }

    #[test]
    fn test_augment_rejects_tiny_history() {
        let pipeline = IndicatorPipeline::new(&IndicatorPeriods::default());
        let err = pipeline.augment(&candles(5)).unwrap_err();
        assert!(matches!(err, IndicatorError::InsufficientData { .. }));
    }

    #[test]
    fn test_pipeline_warmup_is_slowest_column() {
        let pipeline = IndicatorPipeline::new(&IndicatorPeriods::default());
        assert_eq!(pipeline.warmup(), 99);
    }
}
