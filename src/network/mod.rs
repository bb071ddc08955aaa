//! Network module.
//!
//! Contains the Gateway (the readiness-driven multiplexer), the transport
//! seam it runs on, and the idle/keepalive policy.

mod gateway;
mod idle;
#[cfg(test)]
mod mock;
mod poller;
mod transport;

pub use gateway::Gateway;
pub use poller::MioTransport;
