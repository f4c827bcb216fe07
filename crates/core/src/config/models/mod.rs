pub mod app_config;
pub mod logging;
pub mod rollup;

pub use app_config::AppConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use rollup::{RollupConfig, ROLLUP_SERVER_URL_ENV};
