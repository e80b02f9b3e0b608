//! `citycard-domain` — entity definitions for the City Card client.
//!
//! Pure data plus the validation predicates and balance arithmetic the
//! flows depend on. All money amounts are integer kopecks; `u64` makes
//! "balance never negative" structural rather than checked.

pub mod bank;
pub mod city;
pub mod gov;
pub mod intercom;
pub mod passport;
pub mod snapshot;
pub mod transit;
pub mod user;
pub mod vehicle;
pub mod weather;
pub mod widget;

pub use bank::BankCard;
pub use city::City;
pub use gov::{BenefitRecord, GovServices, TaxRecord};
pub use intercom::Intercom;
pub use passport::Passport;
pub use snapshot::UserSnapshot;
pub use transit::{CardKind, TransitCard};
pub use user::{NewUser, ProfileUpdate};
pub use vehicle::{Fine, Vehicle};
pub use weather::{WeatherIcon, WeatherSnapshot};
pub use widget::{WidgetConfig, WidgetKind};
