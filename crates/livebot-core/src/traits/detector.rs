//! Signal detector trait definition.

use crate::types::{IndicatorFrame, Signal};

/// Trait for signal detection heuristics.
///
/// Detectors receive the full indicator-augmented history once per
/// completed candle and may keep internal state between calls.
pub trait SignalDetector: Send + Sync {
    /// Inspect the augmented history and optionally emit a signal.
    fn detect(&mut self, frame: &IndicatorFrame) -> Option<Signal>;

    /// Reset any internal state.
    fn reset(&mut self);

    /// Get the detector name.
    fn name(&self) -> &str;
}
