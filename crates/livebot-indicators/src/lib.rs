//! Technical indicators over candle history.
//!
//! Unlike batch indicator libraries that return truncated vectors,
//! every indicator here produces a series aligned 1:1 with its input:
//! positions before the warm-up length are `None`. That lets the
//! signal pipeline index indicator columns by candle position without
//! offset bookkeeping.

pub mod momentum;
pub mod moving_average;
pub mod pipeline;
pub mod volatility;

pub use momentum::Rsi;
pub use moving_average::Ema;
pub use pipeline::{IndicatorPeriods, IndicatorPipeline};
pub use volatility::Atr;
