//! Layered configuration: defaults, TOML file, environment

pub mod loader;
pub mod types;

pub use loader::{load_config, load_with_dotenv};
pub use types::{AppConfig, AppSettings, HedgeConfig, QueueConfig, ServerConfig};
