//! Real-time quote type.

use serde::{Deserialize, Serialize};

/// A single bid/ask quote observed for one symbol.
///
/// Quotes are ephemeral: the aggregator consumes them immediately and
/// only their mid price and mid size survive into a candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Best bid price
    pub bid: f64,
    /// Best ask price
    pub ask: f64,
    /// Bid size
    pub bid_size: f64,
    /// Ask size
    pub ask_size: f64,
    /// Observation timestamp (Unix milliseconds)
    pub timestamp: i64,
}

impl Quote {
    /// Get the mid price (average of bid and ask).
    #[inline]
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Get the mid size (average of bid and ask size).
    #[inline]
    pub fn mid_size(&self) -> f64 {
        (self.bid_size + self.ask_size) / 2.0
    }

    /// Get the spread.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_calculations() {
        let quote = Quote {
            symbol: "BTC/USD".to_string(),
            bid: 99.0,
            ask: 101.0,
            bid_size: 2.0,
            ask_size: 4.0,
            timestamp: 1000,
        };

        assert!((quote.mid() - 100.0).abs() < 1e-9);
        assert!((quote.mid_size() - 3.0).abs() < 1e-9);
        assert!((quote.spread() - 2.0).abs() < 1e-9);
    }
}
