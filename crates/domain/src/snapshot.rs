//! The full user aggregate as returned by one gateway fetch.
//!
//! Treated as an atomic, immutable value: after every mutating
//! operation the whole snapshot is re-fetched and replaced wholesale.
//! There is no partial or incremental update of sub-entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use citycard_core::{EntityId, UserId};

use crate::bank::BankCard;
use crate::city::City;
use crate::intercom::Intercom;
use crate::passport::Passport;
use crate::transit::TransitCard;
use crate::vehicle::Vehicle;
use crate::widget::WidgetConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: UserId,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_city: Option<City>,
    /// At most one passport per user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<Passport>,
    #[serde(default)]
    pub transit_cards: Vec<TransitCard>,
    #[serde(default)]
    pub bank_cards: Vec<BankCard>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub intercoms: Vec<Intercom>,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

impl UserSnapshot {
    pub fn transit_card(&self, id: EntityId) -> Option<&TransitCard> {
        self.transit_cards.iter().find(|c| c.id == id)
    }

    pub fn vehicle(&self, id: EntityId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// First bank card participating in the loyalty program, if any.
    pub fn loyalty_card(&self) -> Option<&BankCard> {
        self.bank_cards.iter().find(|c| c.is_loyalty_card())
    }

    /// Whether any vehicle carries at least one unpaid fine.
    pub fn has_unpaid_fines(&self) -> bool {
        self.vehicles.iter().any(|v| v.unpaid_count() > 0)
    }
}
