//! Signal detection heuristics.

mod rsi_reversal;

pub use rsi_reversal::{RsiReversalConfig, RsiReversalDetector};
