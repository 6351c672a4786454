//! Alpaca account/positions REST client.
//!
//! Read-only: the bot reports account state, it never trades.

use async_trait::async_trait;
use livebot_core::error::BrokerError;
use livebot_core::{AccountSnapshot, Broker, Position};
use reqwest::{header, Client};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::debug;

/// Alpaca API credentials and environment selection.
#[derive(Debug, Clone)]
pub struct AlpacaCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub paper: bool,
}

impl AlpacaCredentials {
    /// Create credentials directly.
    pub fn new(api_key: String, api_secret: String, paper: bool) -> Self {
        Self {
            api_key,
            api_secret,
            paper,
        }
    }

    /// Load from environment variables.
    pub fn from_env(key_var: &str, secret_var: &str, paper: bool) -> Result<Self, BrokerError> {
        let api_key = std::env::var(key_var)
            .map_err(|_| BrokerError::Configuration(format!("{key_var} not set")))?;
        let api_secret = std::env::var(secret_var)
            .map_err(|_| BrokerError::Configuration(format!("{secret_var} not set")))?;
        Ok(Self::new(api_key, api_secret, paper))
    }

    pub fn base_url(&self) -> &str {
        if self.paper {
            "https://paper-api.alpaca.markets"
        } else {
            "https://api.alpaca.markets"
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlpacaAccount {
    cash: String,
    portfolio_value: String,
    equity: String,
}

#[derive(Debug, Deserialize)]
struct AlpacaPosition {
    symbol: String,
    qty: String,
    avg_entry_price: String,
    current_price: String,
    market_value: String,
    unrealized_pl: String,
}

/// Alpaca broker client.
pub struct AlpacaBroker {
    credentials: AlpacaCredentials,
    client: Client,
    base_url: String,
}

impl AlpacaBroker {
    /// Create a new Alpaca broker client.
    pub fn new(credentials: AlpacaCredentials) -> Result<Self, BrokerError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(&credentials.api_key)
                .map_err(|e| BrokerError::Configuration(e.to_string()))?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(&credentials.api_secret)
                .map_err(|e| BrokerError::Configuration(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BrokerError::Connection(e.to_string()))?;

        let base_url = credentials.base_url().to_string();
        Ok(Self {
            credentials,
            client,
            base_url,
        })
    }

    /// Override the API base URL (used for tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn parse_decimal(value: &str) -> Decimal {
        value.parse().unwrap_or(dec!(0))
    }

    fn parse_position(p: AlpacaPosition) -> Position {
        Position {
            symbol: p.symbol,
            quantity: Self::parse_decimal(&p.qty),
            avg_entry_price: Self::parse_decimal(&p.avg_entry_price),
            current_price: Self::parse_decimal(&p.current_price),
            market_value: Self::parse_decimal(&p.market_value),
            unrealized_pnl: Self::parse_decimal(&p.unrealized_pl),
        }
    }
}

#[async_trait]
impl Broker for AlpacaBroker {
    async fn account(&self) -> Result<AccountSnapshot, BrokerError> {
        let url = format!("{}/v2/account", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BrokerError::Connection(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BrokerError::Authentication("invalid API keys".into()));
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BrokerError::Api(format!("{}: {}", status, text)));
        }

        let account: AlpacaAccount = resp
            .json()
            .await
            .map_err(|e| BrokerError::Api(e.to_string()))?;

        debug!(equity = %account.equity, "fetched account snapshot");
        Ok(AccountSnapshot {
            equity: Self::parse_decimal(&account.equity),
            portfolio_value: Self::parse_decimal(&account.portfolio_value),
            cash: Self::parse_decimal(&account.cash),
        })
    }

    async fn positions(&self) -> Result<Vec<Position>, BrokerError> {
        let url = format!("{}/v2/positions", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BrokerError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(BrokerError::Api(format!("{}: {}", status, text)));
        }

        let positions: Vec<AlpacaPosition> = resp
            .json()
            .await
            .map_err(|e| BrokerError::Api(e.to_string()))?;
        Ok(positions.into_iter().map(Self::parse_position).collect())
    }

    fn name(&self) -> &str {
        if self.credentials.paper {
            "Alpaca Paper"
        } else {
            "Alpaca Live"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_selection() {
        let paper = AlpacaCredentials::new("k".into(), "s".into(), true);
        let live = AlpacaCredentials::new("k".into(), "s".into(), false);
        assert!(paper.base_url().contains("paper-api"));
        assert!(!live.base_url().contains("paper-api"));
    }

    #[test]
    fn test_parse_position_payload() {
        let raw: AlpacaPosition = serde_json::from_str(
            r#"{"symbol":"BTCUSD","qty":"0.25","avg_entry_price":"60000","current_price":"61000","market_value":"15250","unrealized_pl":"250"}"#,
        )
        .unwrap();

        let position = AlpacaBroker::parse_position(raw);
        assert_eq!(position.symbol, "BTCUSD");
        assert_eq!(position.quantity, dec!(0.25));
        assert_eq!(position.unrealized_pnl, dec!(250));
        assert!(position.is_long());
    }

    #[test]
    fn test_malformed_number_defaults_to_zero() {
        assert_eq!(AlpacaBroker::parse_decimal("not-a-number"), dec!(0));
    }
}
