//! Gateway error taxonomy.
//!
//! The controller folds all of these into one generic user-visible
//! failure; the distinction exists for logging and tests.

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network unreachable, DNS failure, connection reset.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-2xx response. The body follows no guaranteed schema.
    #[error("server rejected request: status {status}")]
    Server { status: u16, body: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}
