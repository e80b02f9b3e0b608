//! Render-list items. Each section is self-contained: the view layer
//! needs nothing beyond the section value to draw it.

use serde::Serialize;

use citycard_core::UserId;
use citycard_domain::{
    BankCard, City, GovServices, Intercom, Passport, TransitCard, WeatherSnapshot,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum DashboardSection {
    /// The city card itself. Always first-class, never hidden.
    MainCard {
        holder: String,
        user_id: UserId,
    },
    /// Weather for the chosen city.
    Weather {
        city: City,
        weather: WeatherSnapshot,
    },
    /// Shown in place of the weather widget until a city is chosen.
    CityPrompt,
    TransitCard {
        card: TransitCard,
    },
    BankCard {
        card: BankCard,
    },
    /// Loyalty bonus points of the first qualifying bank card.
    Bonus {
        points: u64,
    },
    /// Unpaid fines across all vehicles.
    Fines {
        total: u64,
        count: usize,
    },
    GovServices {
        services: GovServices,
    },
    Passport {
        passport: Passport,
    },
    Intercom {
        intercom: Intercom,
    },
}
