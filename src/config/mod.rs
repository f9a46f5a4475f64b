#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, Command, RemoveTarget};
pub use toml_config::{AppConfig, LoggingConfig, PrinterConfig, RedisConfig};
