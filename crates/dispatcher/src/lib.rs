//! Request routing and the roster state machine.
//!
//! Handlers are synchronous and side-effect free apart from the roster they
//! are given; every message for the rollup server comes back as an
//! [`OutboundEvent`](roster_domain::OutboundEvent) for the caller to send.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{dispatch, handle_advance, handle_inspect, DispatchOutcome};
