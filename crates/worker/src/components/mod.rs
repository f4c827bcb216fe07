pub mod http_client;
pub mod rollup_server;

pub use http_client::HttpRollupServer;
pub use rollup_server::RollupServer;
