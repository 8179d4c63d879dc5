//! Bridge core: bounded trade queue plus shared hedge state
//!
//! # Architecture
//!
//! ```text
//! producer ─ POST /log_trade ─▶ BridgeService::ingest
//!                                   │
//!                                   ├─▶ TradeQueue::try_enqueue ──(full)──▶ 503
//!                                   │
//!                                   └─▶ HedgeStateAggregator::update
//!                                             │
//!                                             └─ LotMultiplierSource::resolve
//!
//! consumer ─ GET /mt5/get_trade ─▶ BridgeService::next_trade ─▶ TradeQueue::try_dequeue
//! ```
//!
//! # Components
//!
//! - [`TradeQueue`]: fixed-capacity FIFO with try-only insert and remove
//! - [`HedgeStateAggregator`]: net position and target hedge size under one lock
//! - [`LotMultiplierSource`]: where the lot multiplier comes from
//! - [`BridgeService`]: the operations the HTTP layer calls

pub mod hedge;
pub mod lot_multiplier;
pub mod queue;
pub mod service;

pub use hedge::{HedgeState, HedgeStateAggregator, HedgeUpdate};
pub use lot_multiplier::{
    parse_lot_multiplier, BoxedLotMultiplierSource, EnvLotMultiplier, FixedLotMultiplier,
    LotMultiplierSource, DEFAULT_LOT_MULTIPLIER, DEFAULT_LOT_MULTIPLIER_VAR,
};
pub use queue::{QueueStats, TradeQueue, DEFAULT_QUEUE_CAPACITY};
pub use service::{BridgeService, IngestStatus};
