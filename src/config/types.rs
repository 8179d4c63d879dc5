//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::{BridgeError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listening socket
    #[serde(default)]
    pub server: ServerConfig,
    /// Pending trade buffer
    #[serde(default)]
    pub queue: QueueConfig,
    /// Hedge sizing
    #[serde(default)]
    pub hedge: HedgeConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Reject values the bridge cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.queue.capacity == 0 {
            return Err(BridgeError::Configuration(
                "queue.capacity must be greater than 0".to_string(),
            ));
        }
        if self.hedge.lot_multiplier_var.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "hedge.lot_multiplier_var must not be empty".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "server.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind; loopback by default
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Trade queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum number of pending trades before producers get backpressure
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_queue_capacity(),
        }
    }
}

fn default_queue_capacity() -> usize {
    crate::bridge::queue::DEFAULT_QUEUE_CAPACITY
}

/// Hedge sizing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Environment variable consulted on every trade for the lot multiplier
    #[serde(default = "default_lot_multiplier_var")]
    pub lot_multiplier_var: String,
    /// Multiplier used when the variable is unset or unparsable
    #[serde(
        default = "default_lot_multiplier",
        with = "rust_decimal::serde::str"
    )]
    pub default_lot_multiplier: Decimal,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            lot_multiplier_var: default_lot_multiplier_var(),
            default_lot_multiplier: default_lot_multiplier(),
        }
    }
}

fn default_lot_multiplier_var() -> String {
    "EA_LOT_MULTIPLIER".to_string()
}

fn default_lot_multiplier() -> Decimal {
    dec!(0.05)
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
