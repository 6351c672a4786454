//! Run command: wire up every collaborator and drive the loop.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use livebot_broker::{AlpacaBroker, AlpacaCredentials};
use livebot_config::load_config;
use livebot_data::AlpacaQuoteClient;
use livebot_engine::{EngineConfig, ShutdownSignal, TradingEngine};
use livebot_indicators::IndicatorPipeline;
use livebot_notify::DiscordNotifier;
use livebot_signal::RsiReversalDetector;

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config_path: &Path) -> Result<()> {
    let mut config = load_config(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(symbol) = args.symbol {
        config.engine.symbol = symbol;
    }
    if args.log_signals_only {
        config.engine.log_signals_only = true;
    }
    config.validate().context("invalid configuration")?;

    let credentials = AlpacaCredentials::from_env(
        &config.alpaca.api_key_env,
        &config.alpaca.api_secret_env,
        config.alpaca.paper,
    )
    .context("missing Alpaca credentials")?;

    let quotes = AlpacaQuoteClient::new(&credentials.api_key, &credentials.api_secret)
        .context("failed to build quote client")?;
    let broker = AlpacaBroker::new(credentials).context("failed to build broker client")?;
    let pipeline = IndicatorPipeline::new(&config.indicators);
    let detector = RsiReversalDetector::new(config.detector.clone());

    let notifier: Option<Box<dyn livebot_core::Notifier>> = if config.discord.enabled {
        Some(Box::new(DiscordNotifier::new(config.discord.webhook_url.clone())))
    } else {
        info!("discord notifications disabled");
        None
    };

    let engine_config = EngineConfig {
        symbol: config.engine.symbol.clone(),
        candle_interval: chrono::Duration::seconds(config.engine.candle_interval_secs as i64),
        poll_interval: std::time::Duration::from_secs(config.engine.poll_interval_secs),
        min_candles_required: config.engine.min_candles_required,
        min_lookback: config.engine.min_lookback,
        status_cooldown: chrono::Duration::seconds(
            config.engine.status_update_cooldown_secs as i64,
        ),
        log_signals_only: config.engine.log_signals_only,
        dry_run: config.engine.dry_run,
    };

    let mut engine = TradingEngine::new(
        engine_config,
        Box::new(quotes),
        Box::new(broker),
        pipeline,
        Box::new(detector),
        notifier,
    );

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_ctrl_c();

    engine.run(shutdown).await?;
    Ok(())
}
