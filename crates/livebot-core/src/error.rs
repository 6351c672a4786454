//! Error types for the live bot.
//!
//! Every external-call boundary gets its own error enum so that the
//! engine can classify failures explicitly (recoverable vs. fatal)
//! instead of relying on where a catch block happens to sit.

use thiserror::Error;

/// Top-level bot error.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Startup failure: {0}")]
    Startup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Quote/market data errors. Always recoverable: the engine treats a
/// failed fetch the same as an unavailable quote.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Broker account/position errors.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Notification delivery errors. Best-effort: callers log and continue.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notifier not started")]
    NotStarted,

    #[error("Notifier channel closed")]
    Closed,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for bot operations.
pub type BotResult<T> = Result<T, BotError>;
