//! Loop state machine.

use std::fmt;

/// Lifecycle state of the orchestration loop.
///
/// Transitions are monotonic and one-directional:
/// `Collecting -> TradingEnabled -> Stopped`, with `Stopped` reachable
/// from either prior state and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Accumulating candle history; no evaluation yet.
    #[default]
    Collecting,
    /// Enough history collected; signal evaluation is live.
    TradingEnabled,
    /// Terminal: shutdown requested.
    Stopped,
}

impl LoopState {
    /// Attempt the Collecting -> TradingEnabled transition.
    /// Returns true only on the transition itself, so callers can fire
    /// one-shot side effects exactly once.
    pub fn enable_trading(&mut self) -> bool {
        if *self == LoopState::Collecting {
            *self = LoopState::TradingEnabled;
            true
        } else {
            false
        }
    }

    /// Move to the terminal state.
    pub fn stop(&mut self) {
        *self = LoopState::Stopped;
    }

    pub fn is_trading_enabled(&self) -> bool {
        *self == LoopState::TradingEnabled
    }

    pub fn is_stopped(&self) -> bool {
        *self == LoopState::Stopped
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopState::Collecting => write!(f, "collecting"),
            LoopState::TradingEnabled => write!(f, "trading-enabled"),
            LoopState::Stopped => write!(f, "stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_fires_once() {
        let mut state = LoopState::Collecting;
        assert!(state.enable_trading());
        assert!(!state.enable_trading());
        assert!(state.is_trading_enabled());
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut state = LoopState::Collecting;
        state.stop();
        assert!(state.is_stopped());
        assert!(!state.enable_trading());
        assert!(state.is_stopped());
    }
}
