//! Alpaca latest-quote REST client.

use async_trait::async_trait;
use chrono::DateTime;
use livebot_core::error::DataError;
use livebot_core::{Quote, QuoteSource};
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";

#[derive(Debug, Deserialize)]
struct AlpacaLatestQuote {
    bp: f64,
    bs: f64,
    ap: f64,
    #[serde(rename = "as")]
    ask_size: f64,
    t: String,
}

#[derive(Debug, Deserialize)]
struct AlpacaLatestQuotesResponse {
    quotes: HashMap<String, AlpacaLatestQuote>,
}

/// Latest-quote client for the Alpaca crypto data API.
pub struct AlpacaQuoteClient {
    client: Client,
    data_url: String,
}

impl AlpacaQuoteClient {
    /// Create a new client with API credentials.
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, DataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key)
                .map_err(|e| DataError::Connection(e.to_string()))?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(api_secret)
                .map_err(|e| DataError::Connection(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            data_url: DEFAULT_DATA_URL.to_string(),
        })
    }

    /// Override the data API base URL (used for tests).
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = url.into();
        self
    }

    fn parse_quote(symbol: &str, raw: AlpacaLatestQuote) -> Quote {
        let timestamp = DateTime::parse_from_rfc3339(&raw.t)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0);
        Quote {
            symbol: symbol.to_string(),
            bid: raw.bp,
            ask: raw.ap,
            bid_size: raw.bs,
            ask_size: raw.ask_size,
            timestamp,
        }
    }
}

#[async_trait]
impl QuoteSource for AlpacaQuoteClient {
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, DataError> {
        let url = format!("{}/v1beta3/crypto/us/latest/quotes", self.data_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("symbols", symbol)])
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("{}: {}", status, text)));
        }

        let mut data: AlpacaLatestQuotesResponse = resp
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let quote = data
            .quotes
            .remove(symbol)
            .map(|raw| Self::parse_quote(symbol, raw));
        debug!(symbol, found = quote.is_some(), "fetched latest quote");
        Ok(quote)
    }

    fn name(&self) -> &str {
        "Alpaca Crypto Data"
    }
}
