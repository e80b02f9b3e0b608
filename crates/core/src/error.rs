//! Domain error model.
//!
//! Deterministic, local failures only: validation that blocks a
//! submission before it reaches the network, and domain-level
//! rejections computed from the loaded snapshot. Transport failures
//! live in the gateway layer.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation. Field-scoped so the UI can attach the
    /// message to the offending input.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced entity is not in the current snapshot.
    #[error("not found")]
    NotFound,

    /// Transit-card payment exceeds the known balance. Rejected locally,
    /// before any gateway call.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
