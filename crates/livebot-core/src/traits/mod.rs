//! Boundary traits for the live bot.

mod broker;
mod detector;
mod indicator;
mod notifier;
mod quote_source;

pub use broker::Broker;
pub use detector::SignalDetector;
pub use indicator::Indicator;
pub use notifier::Notifier;
pub use quote_source::QuoteSource;
