//! Quote source trait definition.

use crate::error::DataError;
use crate::types::Quote;
use async_trait::async_trait;

/// Trait for latest-quote providers.
///
/// `Ok(None)` means no quote is currently available, which is not an
/// error; the caller skips the tick. Transport failures surface as
/// `DataError` and the engine degrades them to "unavailable".
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the latest quote for a symbol.
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
