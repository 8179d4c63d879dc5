//! Types and errors shared across the bridge

pub mod errors;
pub mod types;

pub use errors::{BridgeError, Result};
pub use types::{ErrorResponse, HealthResponse, StatusResponse, Trade, TradeAction};
