//! Process-wide hedge state
//!
//! Net position is the running count of accepted Buy minus Sell contracts.
//! Target hedge size is `net_position × lot_multiplier`, recomputed on every
//! accepted trade. Both values live behind one lock and are always read and
//! written together.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::lot_multiplier::{BoxedLotMultiplierSource, LotMultiplierSource};
use crate::common::types::TradeAction;

/// Net position and the hedge size derived from it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HedgeState {
    pub net_position: i64,
    pub target_hedge_size: Decimal,
}

/// Outcome of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HedgeUpdate {
    pub net_position: i64,
    pub previous_target: Decimal,
    pub target: Decimal,
}

impl HedgeUpdate {
    pub fn changed(&self) -> bool {
        self.previous_target != self.target
    }
}

pub struct HedgeStateAggregator {
    state: Mutex<HedgeState>,
    multiplier: BoxedLotMultiplierSource,
}

/// `net_position × multiplier`, clamped to the decimal range on overflow
fn target_hedge_size(net_position: i64, multiplier: Decimal) -> Decimal {
    Decimal::from(net_position)
        .checked_mul(multiplier)
        .unwrap_or_else(|| {
            let saturated = if (net_position < 0) != multiplier.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            };
            warn!(
                net_position,
                multiplier = %multiplier,
                saturated = %saturated,
                "Target hedge size out of range, saturating"
            );
            saturated
        })
}

impl HedgeStateAggregator {
    pub fn new(multiplier: impl LotMultiplierSource + 'static) -> Self {
        Self::with_source(Box::new(multiplier))
    }

    pub fn with_source(multiplier: BoxedLotMultiplierSource) -> Self {
        Self {
            state: Mutex::new(HedgeState::default()),
            multiplier,
        }
    }

    /// Apply one trade action and recompute the target hedge size
    ///
    /// The multiplier is resolved while the lock is held so the stored target
    /// always matches the stored net position. Both values are computed before
    /// either is written; a product outside the decimal range saturates.
    pub fn update(&self, action: &TradeAction) -> HedgeUpdate {
        let mut state = self.state.lock();

        let net_position = state.net_position.saturating_add(action.position_delta());
        let multiplier = self.multiplier.resolve();
        let previous_target = state.target_hedge_size;
        let target = target_hedge_size(net_position, multiplier);

        state.net_position = net_position;
        if target != previous_target {
            info!(
                action = %action,
                net_position,
                from = %previous_target,
                to = %target,
                "Adjusting hedge"
            );
            state.target_hedge_size = target;
        } else {
            debug!(
                action = %action,
                net_position,
                target = %target,
                "Hedge unchanged"
            );
        }

        HedgeUpdate {
            net_position,
            previous_target,
            target,
        }
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> HedgeState {
        *self.state.lock()
    }

    pub fn multiplier_source(&self) -> &dyn LotMultiplierSource {
        self.multiplier.as_ref()
    }
}
