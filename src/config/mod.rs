//! Service configuration

pub mod search_config;

pub use search_config::{ConfigError, RefreshConfig, SearchConfig, SourceConfig, StartupMode};
