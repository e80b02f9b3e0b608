//! `citycard-core` — shared foundation for the City Card client.
//!
//! Typed identifiers and the domain error model. Nothing here touches
//! the network or the UI.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{EntityId, UserId};
