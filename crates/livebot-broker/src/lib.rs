//! Broker account reporting clients.

mod alpaca;

pub use alpaca::{AlpacaBroker, AlpacaCredentials};
