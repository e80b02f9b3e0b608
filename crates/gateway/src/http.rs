//! HTTP gateway.
//!
//! The backend exposes a single endpoint base; the operation is
//! selected by an `action` query parameter and payloads travel as
//! camelCase JSON bodies. Non-2xx responses carry no guaranteed error
//! schema, so the body is kept as opaque text.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use citycard_core::{EntityId, UserId};
use citycard_domain::{
    City, Fine, GovServices, NewUser, ProfileUpdate, UserSnapshot, WeatherSnapshot, WidgetConfig,
};
use citycard_acquire::{NewBankCard, NewIntercom, NewPassport, NewTransitCard, NewVehicle};

use crate::api::Gateway;
use crate::error::{GatewayError, GatewayResult};

pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, action: &str) -> String {
        format!("{}?action={}", self.base_url, action)
    }

    fn query_url(&self, action: &str, params: &[(&str, String)]) -> String {
        let mut url = self.url(action);
        for (key, value) in params {
            url.push_str(&format!("&{key}={value}"));
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> GatewayResult<T> {
        let resp = self
            .client
            .get(self.query_url(action, params))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        decode(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        action: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let resp = self
            .client
            .post(self.url(action))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        decode(resp).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        action: &str,
        body: &B,
    ) -> GatewayResult<T> {
        let resp = self
            .client
            .put(self.url(action))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> GatewayResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "gateway call rejected");
        return Err(GatewayError::Server {
            status: status.as_u16(),
            body,
        });
    }
    resp.json()
        .await
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

/// A payload wrapped with the owning user's id, the way the backend
/// expects mutating bodies.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WithUser<'a, T: Serialize> {
    user_id: UserId,
    #[serde(flatten)]
    payload: &'a T,
}

mod wire {
    use serde::Deserialize;

    use citycard_core::{EntityId, UserId};
    use citycard_domain::{Fine, WeatherIcon, WeatherSnapshot};

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserIdResponse {
        pub user_id: UserId,
    }

    #[derive(Deserialize)]
    pub struct IdResponse {
        pub id: EntityId,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceResponse {
        pub new_balance: u64,
    }

    #[derive(Deserialize)]
    pub struct FinesResponse {
        pub fines: Vec<Fine>,
    }

    /// Weather as the backend relays it: the provider's raw condition
    /// id, not an icon. The icon class is derived client-side.
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WeatherResponse {
        pub temp: i32,
        pub condition: String,
        pub condition_id: u16,
    }

    impl WeatherResponse {
        pub fn into_snapshot(self) -> WeatherSnapshot {
            WeatherSnapshot {
                temp: self.temp,
                condition: self.condition,
                icon: WeatherIcon::from_condition_id(self.condition_id),
            }
        }
    }

    #[derive(Deserialize)]
    pub struct Ack {
        #[allow(dead_code)]
        pub success: bool,
    }
}

impl Gateway for HttpGateway {
    async fn register(&self, user: &NewUser) -> GatewayResult<UserId> {
        let resp: wire::UserIdResponse = self.post("register", user).await?;
        Ok(resp.user_id)
    }

    async fn login(&self, phone: &str) -> GatewayResult<UserId> {
        let resp: wire::UserIdResponse = self.post("login", &json!({ "phone": phone })).await?;
        Ok(resp.user_id)
    }

    async fn fetch_snapshot(&self, user_id: UserId) -> GatewayResult<UserSnapshot> {
        self.get("user-data", &[("userId", user_id.to_string())])
            .await
    }

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> GatewayResult<()> {
        let _: wire::Ack = self
            .put(
                "update-user",
                &WithUser {
                    user_id,
                    payload: update,
                },
            )
            .await?;
        Ok(())
    }

    async fn add_passport(
        &self,
        user_id: UserId,
        passport: &NewPassport,
    ) -> GatewayResult<EntityId> {
        let resp: wire::IdResponse = self
            .post(
                "add-passport",
                &WithUser {
                    user_id,
                    payload: passport,
                },
            )
            .await?;
        Ok(resp.id)
    }

    async fn add_transit_card(
        &self,
        user_id: UserId,
        card: &NewTransitCard,
    ) -> GatewayResult<EntityId> {
        let resp: wire::IdResponse = self
            .post(
                "add-podorozhnik",
                &WithUser {
                    user_id,
                    payload: card,
                },
            )
            .await?;
        Ok(resp.id)
    }

    async fn top_up_transit_card(&self, card_id: EntityId, amount: u64) -> GatewayResult<u64> {
        let resp: wire::BalanceResponse = self
            .post(
                "podorozhnik-topup",
                &json!({ "cardId": card_id, "amount": amount }),
            )
            .await?;
        Ok(resp.new_balance)
    }

    async fn pay_with_transit_card(&self, card_id: EntityId, amount: u64) -> GatewayResult<u64> {
        let resp: wire::BalanceResponse = self
            .post(
                "podorozhnik-pay",
                &json!({ "cardId": card_id, "amount": amount }),
            )
            .await?;
        Ok(resp.new_balance)
    }

    async fn add_bank_card(&self, user_id: UserId, card: &NewBankCard) -> GatewayResult<EntityId> {
        let resp: wire::IdResponse = self
            .post(
                "add-bank-card",
                &WithUser {
                    user_id,
                    payload: card,
                },
            )
            .await?;
        Ok(resp.id)
    }

    async fn add_vehicle(&self, user_id: UserId, vehicle: &NewVehicle) -> GatewayResult<EntityId> {
        let resp: wire::IdResponse = self
            .post(
                "add-vehicle",
                &WithUser {
                    user_id,
                    payload: vehicle,
                },
            )
            .await?;
        Ok(resp.id)
    }

    async fn fetch_fines(&self, vehicle_id: EntityId) -> GatewayResult<Vec<Fine>> {
        let resp: wire::FinesResponse = self
            .get("get-fines", &[("vehicleId", vehicle_id.to_string())])
            .await?;
        Ok(resp.fines)
    }

    async fn fetch_weather(&self, city: City) -> GatewayResult<WeatherSnapshot> {
        let resp: wire::WeatherResponse = self
            .get("weather", &[("city", city.code().to_string())])
            .await?;
        Ok(resp.into_snapshot())
    }

    async fn set_weather_city(&self, user_id: UserId, city: City) -> GatewayResult<()> {
        let _: wire::Ack = self
            .post("set-weather-city", &json!({ "userId": user_id, "city": city }))
            .await?;
        Ok(())
    }

    async fn fetch_gov_services(&self, user_id: UserId) -> GatewayResult<GovServices> {
        self.get("gosuslugi", &[("userId", user_id.to_string())])
            .await
    }

    async fn add_intercom(
        &self,
        user_id: UserId,
        intercom: &NewIntercom,
    ) -> GatewayResult<EntityId> {
        let resp: wire::IdResponse = self
            .post(
                "add-intercom",
                &WithUser {
                    user_id,
                    payload: intercom,
                },
            )
            .await?;
        Ok(resp.id)
    }

    async fn save_widget_config(
        &self,
        user_id: UserId,
        widgets: &[WidgetConfig],
    ) -> GatewayResult<()> {
        let _: wire::Ack = self
            .post("widgets", &json!({ "userId": user_id, "widgets": widgets }))
            .await?;
        Ok(())
    }
}
