//! Orchestration loop: polling, aggregation, gating, and dispatch.

mod engine;
mod shutdown;
mod state;

pub use engine::{EngineConfig, TradingEngine};
pub use shutdown::ShutdownSignal;
pub use state::LoopState;
