pub mod config;
pub mod errors;
pub mod logging;

pub use self::config::{
    AppConfig, LogFormat, LoggingConfig, RollupConfig, ROLLUP_SERVER_URL_ENV,
};
pub use errors::*;
pub use logging::init_logging;

/// Result alias for rollup server interaction.
pub type RollupResult<T> = std::result::Result<T, RollupError>;
