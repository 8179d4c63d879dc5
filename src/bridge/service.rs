//! Operations exposed to the transport: ingest, dequeue, health, trade results
//!
//! One [`BridgeService`] is built at startup and shared by every request
//! handler. Queue insert and hedge update are two separate steps: two
//! concurrent ingests may enqueue in one order and update the hedge in the
//! other, which is fine because the hedge state is a running total.

use tracing::{debug, info, instrument, warn};

use super::hedge::{HedgeState, HedgeStateAggregator, HedgeUpdate};
use super::lot_multiplier::{BoxedLotMultiplierSource, EnvLotMultiplier};
use super::queue::{QueueStats, TradeQueue};
use crate::common::errors::{BridgeError, Result};
use crate::common::types::{HealthResponse, Trade};
use crate::config::types::AppConfig;

/// Coarse result of an ingest attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStatus {
    Accepted,
    QueueFull,
    Malformed,
}

impl<T> From<&Result<T>> for IngestStatus {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => IngestStatus::Accepted,
            Err(BridgeError::QueueFull) => IngestStatus::QueueFull,
            Err(_) => IngestStatus::Malformed,
        }
    }
}

pub struct BridgeService {
    queue: TradeQueue,
    hedge: HedgeStateAggregator,
}

impl BridgeService {
    pub fn new(queue: TradeQueue, hedge: HedgeStateAggregator) -> Self {
        Self { queue, hedge }
    }

    /// Build the service from configuration, reading the multiplier from the environment
    pub fn from_config(config: &AppConfig) -> Self {
        let source: BoxedLotMultiplierSource = Box::new(EnvLotMultiplier::new(
            config.hedge.lot_multiplier_var.clone(),
            config.hedge.default_lot_multiplier,
        ));
        Self::new(
            TradeQueue::with_capacity(config.queue.capacity),
            HedgeStateAggregator::with_source(source),
        )
    }

    /// Decode a trade from a request body and submit it
    ///
    /// A body that fails to decode leaves the queue and hedge state untouched.
    pub fn ingest(&self, body: &[u8]) -> Result<HedgeUpdate> {
        let trade = Trade::from_json(body)?;
        self.submit(trade)
    }

    /// Enqueue a decoded trade; on success fold its action into the hedge state
    #[instrument(skip(self, trade), fields(id = %trade.id, action = %trade.action))]
    pub fn submit(&self, trade: Trade) -> Result<HedgeUpdate> {
        let action = trade.action.clone();

        if let Err(rejected) = self.queue.try_enqueue(trade) {
            warn!(
                id = %rejected.id,
                capacity = self.queue.capacity(),
                "Trade queue full, rejecting trade"
            );
            return Err(BridgeError::QueueFull);
        }

        let update = self.hedge.update(&action);
        debug!(queue_size = self.queue.size(), "Trade queued");
        Ok(update)
    }

    /// Hand the oldest pending trade to the consumer, if any
    pub fn next_trade(&self) -> Option<Trade> {
        let trade = self.queue.try_dequeue()?;
        info!(
            id = %trade.id,
            base_id = %trade.base_id,
            action = %trade.action,
            contract_num = trade.contract_num,
            total_quantity = trade.total_quantity,
            "Sending trade to consumer"
        );
        Some(trade)
    }

    /// Liveness snapshot; only touches the queue, never the hedge lock
    pub fn health(&self) -> HealthResponse {
        HealthResponse::healthy(self.queue.size())
    }

    /// Accept an execution report from the consumer
    ///
    /// Reports are logged and discarded; they do not affect queue or hedge state.
    pub fn record_trade_result(&self, body: &[u8]) -> Result<serde_json::Value> {
        let report: serde_json::Value = serde_json::from_slice(body)?;
        info!(result = %report, "Received trade result from consumer");
        Ok(report)
    }

    pub fn hedge_state(&self) -> HedgeState {
        self.hedge.snapshot()
    }

    pub fn queue_stats(&self) -> QueueStats {
        self.queue.stats()
    }

    pub fn multiplier_description(&self) -> String {
        self.hedge.multiplier_source().describe()
    }
}
