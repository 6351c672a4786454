//! RSI reversal detector.
//!
//! Emits a buy when RSI crosses up out of the oversold zone and a sell
//! when it crosses down out of the overbought zone. Confidence is
//! tiered by how deep the RSI excursion went.

use livebot_core::error::BotError;
use livebot_core::{IndicatorFrame, Signal, SignalDetector, SignalKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the RSI reversal detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiReversalConfig {
    /// Oversold threshold (buy on crossing up through this)
    pub oversold: f64,
    /// Overbought threshold (sell on crossing down through this)
    pub overbought: f64,
}

impl Default for RsiReversalConfig {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl RsiReversalConfig {
    /// Validate threshold ordering and range.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.overbought <= self.oversold {
            return Err(BotError::Config(
                "overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(BotError::Config(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// RSI reversal signal detector.
pub struct RsiReversalDetector {
    config: RsiReversalConfig,
    /// Deepest RSI excursion seen while in a zone, for confidence.
    extreme_rsi: Option<f64>,
}

impl RsiReversalDetector {
    /// Create a detector with the given thresholds.
    pub fn new(config: RsiReversalConfig) -> Self {
        Self {
            config,
            extreme_rsi: None,
        }
    }

    fn confidence(&self, extreme: f64) -> f64 {
        // Deeper excursions mean more conviction in the reversal.
        if extreme <= 20.0 || extreme >= 80.0 {
            0.9
        } else if extreme <= 30.0 || extreme >= 70.0 {
            0.7
        } else {
            0.5
        }
    }
}

impl SignalDetector for RsiReversalDetector {
    fn detect(&mut self, frame: &IndicatorFrame) -> Option<Signal> {
        let rsi = frame.last_rsi()?;
        let prev = frame.prev_rsi()?;
        let price = frame.last_close()?;

        // Track the deepest excursion while inside a zone.
        if rsi < self.config.oversold || rsi > self.config.overbought {
            let extreme = match self.extreme_rsi {
                Some(e) if rsi < self.config.oversold => e.min(rsi),
                Some(e) => e.max(rsi),
                None => rsi,
            };
            self.extreme_rsi = Some(extreme);
        }

        let signal = if prev < self.config.oversold && rsi >= self.config.oversold {
            Some(SignalKind::Buy)
        } else if prev > self.config.overbought && rsi <= self.config.overbought {
            Some(SignalKind::Sell)
        } else {
            None
        };

        let kind = signal?;
        let extreme = self.extreme_rsi.take().unwrap_or(prev);
        let confidence = self.confidence(extreme);
        debug!(%kind, rsi, prev, confidence, "rsi reversal detected");

        Some(Signal {
            kind,
            confidence,
            price,
            rsi,
        })
    }

    fn reset(&mut self) {
        self.extreme_rsi = None;
    }

    fn name(&self) -> &str {
        "rsi-reversal"
    }
}
