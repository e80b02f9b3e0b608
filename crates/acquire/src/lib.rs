//! `citycard-acquire` — "have vs. create" acquisition flows.
//!
//! Each entity kind that can be acquired branches at dialog time: the
//! user either supplies a real-world identifier ("have") or asks for a
//! new one ("create"). Both branches resolve to one canonical payload
//! type before anything touches the gateway, so the gateway contract
//! stays uniform.
//!
//! Validation failures are field-scoped and block submission; they
//! never reach the network.

pub mod forms;
pub mod passport;
pub mod transit;

pub use forms::{NewBankCard, NewIntercom, NewVehicle};
pub use passport::{NewPassport, PassportAcquisition};
pub use transit::{NewTransitCard, TransitAcquisition};
