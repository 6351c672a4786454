//! Notifier trait definition.

use crate::error::NotifyError;
use crate::types::{AccountSnapshot, Position, Signal};
use async_trait::async_trait;

/// Trait for best-effort event delivery.
///
/// All sends are fire-and-forget from the engine's perspective: a
/// returned error is logged by the caller and never interrupts the
/// loop. Implementations must not retry implicitly, and callers must
/// not assume delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Start the delivery channel. Called once before the loop.
    async fn start(&mut self) -> Result<(), NotifyError>;

    /// Announce the Collecting -> TradingEnabled transition.
    async fn send_trading_enabled(&self, candle_count: usize) -> Result<(), NotifyError>;

    /// Forward a detected signal, with account equity when available.
    async fn send_signal(
        &self,
        signal: &Signal,
        equity: Option<rust_decimal::Decimal>,
    ) -> Result<(), NotifyError>;

    /// Forward a periodic account/positions status update.
    async fn send_account_update(
        &self,
        account: &AccountSnapshot,
        positions: &[Position],
    ) -> Result<(), NotifyError>;

    /// Close the delivery channel, draining queued messages with
    /// bounded effort.
    async fn close(&mut self) -> Result<(), NotifyError>;
}
