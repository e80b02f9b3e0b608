//! `citycard-gateway` — the remote boundary of the client.
//!
//! One operation per domain action, each a single independent call: no
//! retries, no caching, no idempotency guarantees. Two implementations
//! ship: [`HttpGateway`] for the real backend and [`InMemoryGateway`],
//! a faithful local simulation used by tests and the demo binary.

pub mod api;
pub mod error;
pub mod http;
pub mod memory;

pub use api::Gateway;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpGateway;
pub use memory::InMemoryGateway;
