//! Configuration structures.

use livebot_core::error::BotError;
use livebot_indicators::IndicatorPeriods;
use livebot_signal::RsiReversalConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub alpaca: AlpacaSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub indicators: IndicatorPeriods,
    #[serde(default)]
    pub detector: RsiReversalConfig,
    #[serde(default)]
    pub discord: DiscordSettings,
}

impl AppConfig {
    /// Cross-field sanity checks, run before the engine starts.
    pub fn validate(&self) -> Result<(), BotError> {
        let engine = &self.engine;
        if engine.symbol.is_empty() {
            return Err(BotError::Config("engine.symbol must be set".into()));
        }
        if engine.candle_interval_secs == 0 {
            return Err(BotError::Config(
                "engine.candle_interval_secs must be positive".into(),
            ));
        }
        if engine.poll_interval_secs == 0 {
            return Err(BotError::Config(
                "engine.poll_interval_secs must be positive".into(),
            ));
        }
        if engine.poll_interval_secs >= engine.candle_interval_secs {
            return Err(BotError::Config(
                "engine.poll_interval_secs must be shorter than the candle interval".into(),
            ));
        }
        if engine.min_candles_required == 0 {
            return Err(BotError::Config(
                "engine.min_candles_required must be positive".into(),
            ));
        }

        let periods = [
            self.indicators.rsi,
            self.indicators.atr,
            self.indicators.ema_fast,
            self.indicators.ema_mid,
            self.indicators.ema_slow,
        ];
        // Indicator constructors require a positive period; catch a zero
        // here so it surfaces as a config diagnostic, not a panic.
        if periods.contains(&0) {
            return Err(BotError::Config(
                "indicator periods must be at least 1".into(),
            ));
        }

        // The lookback gate must cover the slowest indicator, otherwise
        // evaluation would run on frames whose last row is undefined.
        let slowest = periods.into_iter().max().unwrap_or(1);
        if engine.min_lookback < slowest {
            return Err(BotError::Config(format!(
                "engine.min_lookback ({}) must cover the slowest indicator period ({})",
                engine.min_lookback, slowest,
            )));
        }

        self.detector.validate()?;

        if self.discord.enabled && self.discord.webhook_url.is_empty() {
            return Err(BotError::Config(
                "discord.webhook_url must be set when discord.enabled".into(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Alpaca API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlpacaSettings {
    pub api_key_env: String,
    pub api_secret_env: String,
    pub paper: bool,
}

impl Default for AlpacaSettings {
    fn default() -> Self {
        Self {
            api_key_env: "ALPACA_API_KEY".to_string(),
            api_secret_env: "ALPACA_API_SECRET".to_string(),
            paper: true,
        }
    }
}

/// Orchestration loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Instrument to aggregate
    pub symbol: String,
    /// Candle window duration in seconds
    pub candle_interval_secs: u64,
    /// Quote poll cadence in seconds
    pub poll_interval_secs: u64,
    /// Completed candles required before trading is enabled
    pub min_candles_required: usize,
    /// History length required before signal evaluation runs
    pub min_lookback: usize,
    /// Minimum seconds between account status broadcasts
    pub status_update_cooldown_secs: u64,
    /// Report signals without any trade action
    pub log_signals_only: bool,
    /// Never touch a live account
    pub dry_run: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            symbol: "BTC/USD".to_string(),
            candle_interval_secs: 300,
            poll_interval_secs: 5,
            min_candles_required: 100,
            min_lookback: 100,
            status_update_cooldown_secs: 300,
            log_signals_only: true,
            dry_run: true,
        }
    }
}

/// Discord notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordSettings {
    pub enabled: bool,
    pub webhook_url: String,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_poll_must_be_shorter_than_window() {
        let mut config = AppConfig::default();
        config.engine.poll_interval_secs = 600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lookback_must_cover_slowest_indicator() {
        let mut config = AppConfig::default();
        config.engine.min_lookback = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_indicator_period_rejected() {
        // A zero period would panic inside the indicator constructors.
        let mut config = AppConfig::default();
        config.indicators.rsi = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.indicators.ema_slow = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discord_requires_webhook() {
        let mut config = AppConfig::default();
        config.discord.enabled = true;
        assert!(config.validate().is_err());
        config.discord.webhook_url = "https://discord.com/api/webhooks/1/x".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let raw = r#"
            [engine]
            symbol = "ETH/USD"
            candle_interval_secs = 60
            poll_interval_secs = 2
            min_candles_required = 120
            min_lookback = 120
            status_update_cooldown_secs = 600
            log_signals_only = true
            dry_run = true

            [indicators]
            rsi = 14
            atr = 14
            ema_fast = 20
            ema_mid = 50
            ema_slow = 100
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.engine.symbol, "ETH/USD");
        assert_eq!(config.engine.min_candles_required, 120);
        assert!(config.validate().is_ok());
    }
}
