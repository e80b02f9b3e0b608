//! `citycard-widgets` — the dashboard composition engine.
//!
//! Given the current user snapshot, the ephemeral weather and
//! gov-services loads, and the stored widget configuration, computes
//! the ordered list of sections to render. Preconditions are always
//! evaluated against the current snapshot, never a cached decision, so
//! a widget whose backing entity disappeared stops rendering on the
//! next compose.

pub mod engine;
pub mod section;

pub use engine::{compose, ordered};
pub use section::DashboardSection;
