//! Trade record and wire-level response bodies shared by the core and the server

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Direction of an executed contract
///
/// Only `Buy` and `Sell` move the net position. Any other string is kept
/// verbatim so the consumer receives exactly what the producer sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeAction {
    Buy,
    Sell,
    Other(String),
}

impl TradeAction {
    /// Net position delta contributed by one contract with this action
    pub fn position_delta(&self) -> i64 {
        match self {
            TradeAction::Buy => 1,
            TradeAction::Sell => -1,
            TradeAction::Other(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TradeAction::Buy => "Buy",
            TradeAction::Sell => "Sell",
            TradeAction::Other(raw) => raw,
        }
    }
}

/// An absent action decodes as an empty `Other`, which moves nothing
impl Default for TradeAction {
    fn default() -> Self {
        TradeAction::Other(String::new())
    }
}

impl From<String> for TradeAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Buy" => TradeAction::Buy,
            "Sell" => TradeAction::Sell,
            _ => TradeAction::Other(raw),
        }
    }
}

impl From<&str> for TradeAction {
    fn from(raw: &str) -> Self {
        TradeAction::from(raw.to_string())
    }
}

impl From<TradeAction> for String {
    fn from(action: TradeAction) -> Self {
        match action {
            TradeAction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single executed contract, as logged by the producer
///
/// Multi-contract trades arrive as several records sharing `base_id`, each
/// carrying its 1-based `contract_num` and the parent's `total_quantity`.
/// None of these relationships are enforced here.
///
/// Absent fields decode to their zero value (empty string, 0, Unix epoch)
/// so producers that only send a subset of the fields are still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trade {
    /// Unique trade identifier
    pub id: String,
    /// Identifier shared by all contracts of one logical trade
    pub base_id: String,
    /// Execution time, with the producer's offset kept as sent
    #[serde(with = "execution_time")]
    pub time: DateTime<FixedOffset>,
    /// Buy/Sell
    pub action: TradeAction,
    /// Quantity of this contract record, normally 1
    pub quantity: f64,
    /// Entry price
    pub price: f64,
    /// Total contracts in the parent trade
    pub total_quantity: i64,
    /// Which contract this is (1-based)
    pub contract_num: i64,
}

impl Trade {
    /// Decode a trade from a raw JSON request body
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

impl Default for Trade {
    fn default() -> Self {
        Self {
            id: String::new(),
            base_id: String::new(),
            time: DateTime::<Utc>::default().into(),
            action: TradeAction::default(),
            quantity: 0.0,
            price: 0.0,
            total_quantity: 0,
            contract_num: 0,
        }
    }
}

/// Execution timestamps arrive either as RFC 3339 or as a naive ISO-8601
/// string without an offset; the latter is taken as UTC. An explicit offset
/// is preserved through the round trip.
mod execution_time {
    use super::*;

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(time: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<DateTime<FixedOffset>, String> {
        if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
            return Ok(time);
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
            .map(|naive| naive.and_utc().into())
            .map_err(|e| format!("invalid trade time {raw:?}: {e}"))
    }
}

/// `{"status": "..."}` body used for simple acknowledgements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }

    pub fn no_trade() -> Self {
        Self {
            status: "no_trade".to_string(),
        }
    }
}

/// Liveness check body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub queue_size: usize,
}

impl HealthResponse {
    pub fn healthy(queue_size: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            queue_size,
        }
    }
}

/// Error body for endpoints that answer in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
