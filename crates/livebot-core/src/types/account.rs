//! Account reporting types.
//!
//! The bot reads these for status updates only; it never mutates
//! positions or places orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time account summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Total equity
    pub equity: Decimal,
    /// Total portfolio value (cash + market value of positions)
    pub portfolio_value: Decimal,
    /// Available cash
    pub cash: Decimal,
}

/// An open position, as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Symbol
    pub symbol: String,
    /// Signed quantity (positive long, negative short)
    pub quantity: Decimal,
    /// Average entry price
    pub avg_entry_price: Decimal,
    /// Current market price
    pub current_price: Decimal,
    /// Market value (quantity * current_price)
    pub market_value: Decimal,
    /// Unrealized profit/loss
    pub unrealized_pnl: Decimal,
}

impl Position {
    /// Check if this is a long position.
    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_side() {
        let position = Position {
            symbol: "BTC/USD".to_string(),
            quantity: dec!(0.5),
            avg_entry_price: dec!(60000),
            current_price: dec!(61000),
            market_value: dec!(30500),
            unrealized_pnl: dec!(500),
        };
        assert!(position.is_long());
    }
}
