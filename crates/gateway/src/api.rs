//! The gateway contract: one async operation per domain action.
//!
//! Every call is fire-and-forget from the gateway's perspective; the
//! session controller owns what happens after (notably the full
//! snapshot re-fetch following each mutation). No operation retries.

use citycard_core::{EntityId, UserId};
use citycard_domain::{
    City, Fine, GovServices, NewUser, ProfileUpdate, UserSnapshot, WeatherSnapshot, WidgetConfig,
};
use citycard_acquire::{NewBankCard, NewIntercom, NewPassport, NewTransitCard, NewVehicle};

use crate::error::GatewayResult;

#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Create an account keyed by phone number.
    async fn register(&self, user: &NewUser) -> GatewayResult<UserId>;

    /// Phone-only login; returns the session identity.
    async fn login(&self, phone: &str) -> GatewayResult<UserId>;

    /// Fetch the full user aggregate as one atomic value.
    async fn fetch_snapshot(&self, user_id: UserId) -> GatewayResult<UserSnapshot>;

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> GatewayResult<()>;

    async fn add_passport(&self, user_id: UserId, passport: &NewPassport)
    -> GatewayResult<EntityId>;

    async fn add_transit_card(
        &self,
        user_id: UserId,
        card: &NewTransitCard,
    ) -> GatewayResult<EntityId>;

    /// Increase a transit-card balance by `amount` kopecks; returns the
    /// new balance.
    async fn top_up_transit_card(&self, card_id: EntityId, amount: u64) -> GatewayResult<u64>;

    /// Decrease a transit-card balance by `amount` kopecks; the backend
    /// rejects the call when the balance is insufficient.
    async fn pay_with_transit_card(&self, card_id: EntityId, amount: u64) -> GatewayResult<u64>;

    async fn add_bank_card(&self, user_id: UserId, card: &NewBankCard) -> GatewayResult<EntityId>;

    async fn add_vehicle(&self, user_id: UserId, vehicle: &NewVehicle) -> GatewayResult<EntityId>;

    /// Ordered fine list for one vehicle, newest first.
    async fn fetch_fines(&self, vehicle_id: EntityId) -> GatewayResult<Vec<Fine>>;

    async fn fetch_weather(&self, city: City) -> GatewayResult<WeatherSnapshot>;

    async fn set_weather_city(&self, user_id: UserId, city: City) -> GatewayResult<()>;

    async fn fetch_gov_services(&self, user_id: UserId) -> GatewayResult<GovServices>;

    async fn add_intercom(&self, user_id: UserId, intercom: &NewIntercom)
    -> GatewayResult<EntityId>;

    /// Replace the stored widget configuration wholesale.
    async fn save_widget_config(
        &self,
        user_id: UserId,
        widgets: &[WidgetConfig],
    ) -> GatewayResult<()>;
}
