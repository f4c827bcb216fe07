//! Configuration for the roster backend.
//!
//! Sources are layered from lowest to highest priority:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `ROSTER__<SECTION>__<KEY>` environment variables
//! 4. `ROLLUP_HTTP_SERVER_URL`, the variable the rollup node sets for every dapp

pub mod models;

pub use models::{AppConfig, LogFormat, LoggingConfig, RollupConfig, ROLLUP_SERVER_URL_ENV};
