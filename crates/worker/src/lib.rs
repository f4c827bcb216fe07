pub mod components;
pub mod poll_loop;

pub use components::{HttpRollupServer, RollupServer};
pub use poll_loop::{Cycle, PollLoop};
