//! Core data types for the live bot.

mod account;
mod candle;
mod frame;
mod quote;
mod signal;

pub use account::{AccountSnapshot, Position};
pub use candle::{Candle, CandleSeries, VOLUME_DECIMALS};
pub use frame::IndicatorFrame;
pub use quote::Quote;
pub use signal::{Signal, SignalKind};
