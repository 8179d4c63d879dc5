//! TradeBridge Library
//!
//! Hands executed trades from a producing strategy to a polling MT5 agent
//! through a bounded FIFO queue, while tracking the net position and the
//! hedge size a companion hedger should hold.

pub mod bridge;
pub mod common;
pub mod config;
pub mod server;

// Re-export commonly used types
pub use bridge::{
    BridgeService, EnvLotMultiplier, FixedLotMultiplier, HedgeState, HedgeStateAggregator,
    HedgeUpdate, IngestStatus, LotMultiplierSource, QueueStats, TradeQueue,
};
pub use common::errors::{BridgeError, Result};
pub use common::types::{HealthResponse, StatusResponse, Trade, TradeAction};
pub use config::types::AppConfig;
