//! Discord webhook notifier.
//!
//! Events are handed to a worker task over a bounded channel so that
//! the trading loop never waits on Discord. Delivery failures are
//! logged inside the worker and swallowed; there are no retries and no
//! delivery guarantee.

use async_trait::async_trait;
use livebot_core::error::NotifyError;
use livebot_core::{AccountSnapshot, Notifier, Position, Signal};
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const QUEUE_DEPTH: usize = 64;
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
enum Event {
    TradingEnabled {
        candle_count: usize,
    },
    Signal {
        signal: Signal,
        equity: Option<Decimal>,
    },
    AccountUpdate {
        account: AccountSnapshot,
        positions: Vec<Position>,
    },
}

impl Event {
    fn render(&self) -> String {
        match self {
            Event::TradingEnabled { candle_count } => format!(
                "**TRADING ENABLED**\nCollected {candle_count} candles; signal evaluation is live."
            ),
            Event::Signal { signal, equity } => {
                let mut msg = format!(
                    "**SIGNAL: {}**\nPrice: ${:.2}\nConfidence: {:.0}%\nRSI: {:.1}",
                    signal.kind,
                    signal.price,
                    signal.confidence * 100.0,
                    signal.rsi,
                );
                if let Some(equity) = equity {
                    msg.push_str(&format!("\nEquity: ${equity}"));
                }
                msg
            }
            Event::AccountUpdate { account, positions } => {
                let mut msg = format!(
                    "**Account update**\nEquity: ${}\nPortfolio value: ${}\nCash: ${}",
                    account.equity, account.portfolio_value, account.cash,
                );
                if positions.is_empty() {
                    msg.push_str("\nNo open positions.");
                } else {
                    for p in positions {
                        msg.push_str(&format!(
                            "\n{}: {} @ ${} (P/L ${})",
                            p.symbol, p.quantity, p.avg_entry_price, p.unrealized_pnl,
                        ));
                    }
                }
                msg
            }
        }
    }
}

/// Discord webhook notification sink.
pub struct DiscordNotifier {
    webhook_url: String,
    tx: Option<mpsc::Sender<Event>>,
    worker: Option<JoinHandle<()>>,
}

impl DiscordNotifier {
    /// Create a notifier for the given webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            tx: None,
            worker: None,
        }
    }

    /// Hand an event to the worker without ever waiting on it. A full
    /// queue drops the event: delivery is best-effort and the trading
    /// loop must not stall behind a slow webhook.
    fn enqueue(&self, event: Event) -> Result<(), NotifyError> {
        let tx = self.tx.as_ref().ok_or(NotifyError::NotStarted)?;
        match tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(?event, "notification queue full; dropping event");
                Err(NotifyError::Api("notification queue full".into()))
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(NotifyError::Closed),
        }
    }

    async fn deliver(client: &reqwest::Client, webhook_url: &str, event: Event) {
        let payload = serde_json::json!({ "content": event.render() });
        let result = client.post(webhook_url).json(&payload).send().await;
        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => warn!(status = %resp.status(), "discord rejected notification"),
            Err(err) => warn!(error = %err, "discord notification failed"),
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn start(&mut self) -> Result<(), NotifyError> {
        if self.webhook_url.is_empty() {
            return Err(NotifyError::Connection("webhook URL is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Connection(e.to_string()))?;

        let (tx, mut rx) = mpsc::channel(QUEUE_DEPTH);
        let webhook_url = self.webhook_url.clone();
        let worker = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                Self::deliver(&client, &webhook_url, event).await;
            }
        });

        self.tx = Some(tx);
        self.worker = Some(worker);
        info!("discord notifier started");
        Ok(())
    }

    async fn send_trading_enabled(&self, candle_count: usize) -> Result<(), NotifyError> {
        self.enqueue(Event::TradingEnabled { candle_count })
    }

    async fn send_signal(
        &self,
        signal: &Signal,
        equity: Option<Decimal>,
    ) -> Result<(), NotifyError> {
        self.enqueue(Event::Signal {
            signal: signal.clone(),
            equity,
        })
    }

    async fn send_account_update(
        &self,
        account: &AccountSnapshot,
        positions: &[Position],
    ) -> Result<(), NotifyError> {
        self.enqueue(Event::AccountUpdate {
            account: account.clone(),
            positions: positions.to_vec(),
        })
    }

    async fn close(&mut self) -> Result<(), NotifyError> {
        // Dropping the sender lets the worker drain the queue and exit.
        self.tx = None;
        if let Some(worker) = self.worker.take() {
            if tokio::time::timeout(CLOSE_TIMEOUT, worker).await.is_err() {
                warn!("discord notifier did not drain in time");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livebot_core::SignalKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_trading_enabled() {
        let msg = Event::TradingEnabled { candle_count: 100 }.render();
        assert!(msg.contains("TRADING ENABLED"));
        assert!(msg.contains("100 candles"));
    }

    #[test]
    fn test_render_signal_with_and_without_equity() {
        let signal = Signal {
            kind: SignalKind::Buy,
            confidence: 0.9,
            price: 60000.0,
            rsi: 28.4,
        };

        let with = Event::Signal {
            signal: signal.clone(),
            equity: Some(dec!(100000)),
        }
        .render();
        assert!(with.contains("BUY"));
        assert!(with.contains("90%"));
        assert!(with.contains("Equity: $100000"));

        let without = Event::Signal {
            signal,
            equity: None,
        }
        .render();
        assert!(!without.contains("Equity"));
    }

    #[test]
    fn test_render_account_update() {
        let account = AccountSnapshot {
            equity: dec!(100000),
            portfolio_value: dec!(100500),
            cash: dec!(70000),
        };
        let positions = vec![Position {
            symbol: "BTCUSD".to_string(),
            quantity: dec!(0.5),
            avg_entry_price: dec!(60000),
            current_price: dec!(61000),
            market_value: dec!(30500),
            unrealized_pnl: dec!(500),
        }];

        let msg = Event::AccountUpdate { account, positions }.render();
        assert!(msg.contains("Account update"));
        assert!(msg.contains("BTCUSD"));
        assert!(msg.contains("P/L $500"));
    }

    #[tokio::test]
    async fn test_full_queue_drops_event_without_blocking() {
        let mut notifier = DiscordNotifier::new("https://example.invalid/webhook");
        // A one-slot channel with no worker draining it.
        let (tx, _rx) = mpsc::channel(1);
        tx.try_send(Event::TradingEnabled { candle_count: 1 }).unwrap();
        notifier.tx = Some(tx);

        // Returns immediately with an error instead of awaiting space.
        let err = notifier.send_trading_enabled(2).await.unwrap_err();
        assert!(matches!(err, NotifyError::Api(_)));
    }

    #[tokio::test]
    async fn test_send_before_start_fails() {
        let notifier = DiscordNotifier::new("https://example.invalid/webhook");
        let err = notifier.send_trading_enabled(10).await.unwrap_err();
        assert!(matches!(err, NotifyError::NotStarted));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let mut notifier = DiscordNotifier::new("https://example.invalid/webhook");
        notifier.start().await.unwrap();
        notifier.close().await.unwrap();
        notifier.close().await.unwrap();
        // Sends after close fail like sends before start.
        let err = notifier.send_trading_enabled(10).await.unwrap_err();
        assert!(matches!(err, NotifyError::NotStarted));
    }
}
