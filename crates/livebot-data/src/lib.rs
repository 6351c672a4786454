//! Live market data: incremental candle aggregation and quote sources.

mod aggregator;
mod alpaca;

pub use aggregator::CandleAggregator;
pub use alpaca::AlpacaQuoteClient;
