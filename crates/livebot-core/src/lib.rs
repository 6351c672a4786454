//! Core types and traits for the live bot.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Quote, Candle, CandleSeries)
//! - Indicator-augmented history (IndicatorFrame)
//! - Account reporting types
//! - Boundary traits for quote sources, brokers, notifiers, and detectors

pub mod error;
pub mod traits;
pub mod types;

pub use error::{BotError, BotResult};
pub use traits::*;
pub use types::*;
