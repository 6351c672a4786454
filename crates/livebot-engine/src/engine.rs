//! The orchestration loop.
//!
//! One logical worker sequences everything: poll a quote, feed the
//! aggregator, gate on history size, and dispatch completed candles to
//! the indicator pipeline, detector, and notifier. External calls are
//! synchronous steps within an iteration; their failures are classified
//! per boundary and never tear the loop down.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use livebot_core::error::BotError;
use livebot_core::{Broker, BotResult, Notifier, QuoteSource, Signal, SignalDetector};
use livebot_data::CandleAggregator;
use livebot_indicators::IndicatorPipeline;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{LoopState, ShutdownSignal};

/// Resolved engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Instrument to aggregate
    pub symbol: String,
    /// Candle window duration
    pub candle_interval: ChronoDuration,
    /// Quote poll cadence
    pub poll_interval: std::time::Duration,
    /// Completed candles required before trading is enabled
    pub min_candles_required: usize,
    /// History length required before signal evaluation runs
    pub min_lookback: usize,
    /// Minimum gap between account status broadcasts
    pub status_cooldown: ChronoDuration,
    /// Report signals without any trade action
    pub log_signals_only: bool,
    /// Never touch a live account
    pub dry_run: bool,
}

/// Top-level driver owning the aggregator, loop state, and all
/// collaborators. All mutation happens inside `tick`; the `run` loop
/// only sequences ticks and sleeps.
pub struct TradingEngine {
    config: EngineConfig,
    quotes: Box<dyn QuoteSource>,
    broker: Box<dyn Broker>,
    pipeline: IndicatorPipeline,
    detector: Box<dyn SignalDetector>,
    notifier: Option<Box<dyn Notifier>>,
    aggregator: CandleAggregator,
    state: LoopState,
    last_status_update: DateTime<Utc>,
}

impl TradingEngine {
    pub fn new(
        config: EngineConfig,
        quotes: Box<dyn QuoteSource>,
        broker: Box<dyn Broker>,
        pipeline: IndicatorPipeline,
        detector: Box<dyn SignalDetector>,
        notifier: Option<Box<dyn Notifier>>,
    ) -> Self {
        let aggregator = CandleAggregator::new(config.symbol.clone(), config.candle_interval);
        Self {
            config,
            quotes,
            broker,
            pipeline,
            detector,
            notifier,
            aggregator,
            state: LoopState::Collecting,
            last_status_update: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of completed candles so far.
    pub fn history_len(&self) -> usize {
        self.aggregator.history_len()
    }

    /// One-time startup: bring the notifier up (best-effort) and probe
    /// the broker (fatal on failure, per the startup contract).
    pub async fn start(&mut self, now: DateTime<Utc>) -> BotResult<()> {
        info!(
            symbol = %self.config.symbol,
            interval_secs = self.config.candle_interval.num_seconds(),
            min_candles = self.config.min_candles_required,
            log_signals_only = self.config.log_signals_only,
            dry_run = self.config.dry_run,
            "starting live engine"
        );

        if let Some(notifier) = self.notifier.as_mut() {
            if let Err(err) = notifier.start().await {
                warn!(error = %err, "notifier failed to start; continuing without it");
                self.notifier = None;
            }
        }

        let account = self
            .broker
            .account()
            .await
            .map_err(|err| BotError::Startup(format!("broker unreachable: {err}")))?;
        info!(
            broker = self.broker.name(),
            portfolio_value = %account.portfolio_value,
            "connected to broker"
        );

        self.aggregator.begin(now);
        self.last_status_update = now;
        Ok(())
    }

    /// Drive the loop until shutdown is requested.
    pub async fn run(&mut self, shutdown: ShutdownSignal) -> BotResult<()> {
        self.start(Utc::now()).await?;
        info!(
            "collecting {} candles (~{} minutes)",
            self.config.min_candles_required,
            self.config.min_candles_required as i64 * self.config.candle_interval.num_minutes(),
        );

        while !shutdown.triggered() {
            self.tick(Utc::now()).await;
            if !shutdown.sleep(self.config.poll_interval).await {
                break;
            }
        }

        self.stop().await;
        Ok(())
    }

    /// One loop iteration at the given instant.
    pub async fn tick(&mut self, now: DateTime<Utc>) {
        if self.state.is_stopped() {
            return;
        }

        let quote = match self.quotes.latest_quote(&self.config.symbol).await {
            Ok(quote) => quote,
            Err(err) => {
                warn!(error = %err, "quote fetch failed; treating as unavailable");
                None
            }
        };

        let completed = self.aggregator.ingest(quote.as_ref(), now);
        if let Some(candle) = &completed {
            info!(
                n = self.aggregator.history_len(),
                open = candle.open,
                high = candle.high,
                low = candle.low,
                close = candle.close,
                volume = candle.volume,
                "candle completed"
            );
        }

        if self.state == LoopState::Collecting {
            let count = self.aggregator.history_len();
            if completed.is_some() && count < self.config.min_candles_required && count % 5 == 0 {
                info!(
                    "collection progress: {}/{} candles",
                    count, self.config.min_candles_required,
                );
            }
            if count >= self.config.min_candles_required && self.state.enable_trading() {
                info!(candles = count, "trading enabled");
                if let Some(notifier) = &self.notifier {
                    if let Err(err) = notifier.send_trading_enabled(count).await {
                        warn!(error = %err, "trading-enabled notification failed");
                    }
                }
            }
        }

        if self.state.is_trading_enabled() {
            if completed.is_some() {
                self.evaluate().await;
            }
            if now - self.last_status_update >= self.config.status_cooldown {
                self.send_status_update().await;
                self.last_status_update = now;
            }
        }
    }

    /// Evaluate the newest completed candle: indicators, then detection.
    async fn evaluate(&mut self) {
        let history = self.aggregator.snapshot();
        if history.len() < self.config.min_lookback {
            debug!(
                have = history.len(),
                need = self.config.min_lookback,
                "lookback not reached; skipping evaluation"
            );
            return;
        }

        let frame = match self.pipeline.augment(&history) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "indicator computation failed; skipping evaluation");
                return;
            }
        };

        if let (Some(close), Some(rsi)) = (frame.last_close(), frame.last_rsi()) {
            info!(price = close, rsi, "evaluated candle");
        }

        if let Some(signal) = self.detector.detect(&frame) {
            self.report_signal(signal).await;
        }
    }

    async fn report_signal(&mut self, signal: Signal) {
        info!(
            kind = %signal.kind,
            confidence = signal.confidence,
            price = signal.price,
            rsi = signal.rsi,
            "signal detected"
        );

        if let Some(notifier) = &self.notifier {
            let equity = self.fetch_equity().await;
            if let Err(err) = notifier.send_signal(&signal, equity).await {
                warn!(error = %err, "signal notification failed");
            }
        }

        if self.config.log_signals_only {
            info!("log-only mode; no trade action taken");
        }
    }

    /// Equity is decoration on the signal notification; a fetch failure
    /// must not suppress the notification itself.
    async fn fetch_equity(&self) -> Option<Decimal> {
        match self.broker.account().await {
            Ok(account) => Some(account.equity),
            Err(err) => {
                warn!(error = %err, "equity fetch failed; sending signal without it");
                None
            }
        }
    }

    async fn send_status_update(&mut self) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        let account = match self.broker.account().await {
            Ok(account) => account,
            Err(err) => {
                warn!(error = %err, "account fetch failed; skipping status update");
                return;
            }
        };
        let positions = match self.broker.positions().await {
            Ok(positions) => positions,
            Err(err) => {
                warn!(error = %err, "positions fetch failed; skipping status update");
                return;
            }
        };

        if let Err(err) = notifier.send_account_update(&account, &positions).await {
            warn!(error = %err, "status update notification failed");
        }
    }

    /// Transition to the terminal state and close the notifier with
    /// bounded effort. Any in-flight pending aggregate is discarded.
    pub async fn stop(&mut self) {
        self.state.stop();
        if let Some(mut notifier) = self.notifier.take() {
            if let Err(err) = notifier.close().await {
                warn!(error = %err, "notifier close failed");
            }
        }
        info!("engine stopped");
    }
}
