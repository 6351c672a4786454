//! Broker trait definition.

use crate::error::BrokerError;
use crate::types::{AccountSnapshot, Position};
use async_trait::async_trait;

/// Trait for broker account reporting.
///
/// The bot only reads account and position state for status updates;
/// order placement is deliberately absent from this surface.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Get the current account summary.
    async fn account(&self) -> Result<AccountSnapshot, BrokerError>;

    /// Get all open positions.
    async fn positions(&self) -> Result<Vec<Position>, BrokerError>;

    /// Get the broker name.
    fn name(&self) -> &str;
}
