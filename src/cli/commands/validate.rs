//! Validate configuration command.

use anyhow::Result;
use livebot_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = load_config(config_path)?;
    config.validate()?;

    println!("Configuration is valid!");
    println!();
    println!("Symbol: {}", config.engine.symbol);
    println!("Candle interval: {}s", config.engine.candle_interval_secs);
    println!("Poll interval: {}s", config.engine.poll_interval_secs);
    println!("Min candles required: {}", config.engine.min_candles_required);
    println!("Min lookback: {}", config.engine.min_lookback);
    println!("Log level: {}", config.logging.level);
    println!("Alpaca paper mode: {}", config.alpaca.paper);
    println!("Discord enabled: {}", config.discord.enabled);

    Ok(())
}
