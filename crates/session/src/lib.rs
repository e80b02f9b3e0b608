//! `citycard-session` — the session/profile controller.
//!
//! Owns the application state: the user snapshot, the dependent
//! weather/gov loads, and the transient notices. Leaf views never
//! mutate state directly; every change goes through a controller
//! operation, and every successful mutation re-fetches the full
//! snapshot through the named `refresh_snapshot` operation.

pub mod controller;
pub mod notice;

pub use controller::{ProfileView, SessionController, SessionState};
pub use notice::{NOTICE_TTL, Notice, NoticeKind, NoticeLog};
