//! Lot multiplier lookup
//!
//! The multiplier is read as a floating-point override and kept as a decimal
//! so that hedge sizes like `3 × 0.1` come out exact.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tracing::warn;

/// Multiplier applied when no usable override is configured
pub const DEFAULT_LOT_MULTIPLIER: Decimal = dec!(0.05);

/// Environment variable the EA lot multiplier is read from by default
pub const DEFAULT_LOT_MULTIPLIER_VAR: &str = "EA_LOT_MULTIPLIER";

/// Source of the lot multiplier used to turn net position into hedge size
///
/// Implementations are consulted on every accepted trade and must not cache
/// unless they are deliberately static.
#[cfg_attr(test, mockall::automock)]
pub trait LotMultiplierSource: Send + Sync {
    /// Current multiplier; never fails
    fn resolve(&self) -> Decimal;

    /// Short description for startup logs
    fn describe(&self) -> String;
}

/// Boxed multiplier source
pub type BoxedLotMultiplierSource = Box<dyn LotMultiplierSource>;

/// Parse an override value, falling back to `default` when absent or not a number
///
/// Anything `f64` accepts is a valid override. Plain decimal text is taken
/// exactly; values outside the decimal range clamp to `Decimal::MAX`/`MIN`
/// (or zero for magnitudes below its precision). `NaN` has no decimal
/// counterpart and falls back.
pub fn parse_lot_multiplier(raw: Option<&str>, default: Decimal) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    let Ok(value) = raw.parse::<f64>() else {
        return default;
    };
    if value.is_nan() {
        return default;
    }

    if let Ok(exact) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return exact;
    }
    if let Some(converted) = Decimal::from_f64_retain(value) {
        return converted;
    }

    let clamped = if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    warn!(raw, clamped = %clamped, "Lot multiplier outside decimal range, clamping");
    clamped
}

/// Reads the multiplier from an environment variable on each call
#[derive(Debug, Clone)]
pub struct EnvLotMultiplier {
    var: String,
    default: Decimal,
}

impl EnvLotMultiplier {
    pub fn new(var: impl Into<String>, default: Decimal) -> Self {
        Self {
            var: var.into(),
            default,
        }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvLotMultiplier {
    fn default() -> Self {
        Self::new(DEFAULT_LOT_MULTIPLIER_VAR, DEFAULT_LOT_MULTIPLIER)
    }
}

impl LotMultiplierSource for EnvLotMultiplier {
    fn resolve(&self) -> Decimal {
        let raw = std::env::var(&self.var).ok();
        parse_lot_multiplier(raw.as_deref(), self.default)
    }

    fn describe(&self) -> String {
        format!("env {} (default {})", self.var, self.default)
    }
}

/// Constant multiplier
#[derive(Debug, Clone, Copy)]
pub struct FixedLotMultiplier(pub Decimal);

impl LotMultiplierSource for FixedLotMultiplier {
    fn resolve(&self) -> Decimal {
        self.0
    }

    fn describe(&self) -> String {
        format!("fixed {}", self.0)
    }
}
