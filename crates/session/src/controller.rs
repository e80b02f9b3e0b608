//! The controller itself.
//!
//! State machine per page load: `Uninitialized → Loading → Ready` or
//! `→ Failed`. The snapshot is an immutable value replaced wholesale on
//! every refresh; there is no optimistic mutation and therefore nothing
//! to roll back when a call fails. Concurrent mutations are not
//! serialized: with two in flight, the last snapshot fetch to resolve
//! wins.

use citycard_core::{DomainError, DomainResult, EntityId, UserId};
use citycard_domain::{
    City, Fine, GovServices, ProfileUpdate, UserSnapshot, WeatherSnapshot, WidgetConfig,
};
use citycard_acquire::{NewBankCard, NewIntercom, NewPassport, NewTransitCard, NewVehicle};
use citycard_gateway::{Gateway, GatewayError};
use citycard_widgets::DashboardSection;

use crate::notice::NoticeLog;

/// Everything the dashboard needs, assembled from one snapshot fetch
/// plus the dependent loads.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub snapshot: UserSnapshot,
    /// Present iff the user has chosen a city and the load succeeded.
    pub weather: Option<WeatherSnapshot>,
    /// Present iff the gov-services load succeeded.
    pub gov: Option<GovServices>,
}

#[derive(Debug)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Ready(ProfileView),
    Failed,
}

pub struct SessionController<G: Gateway> {
    gateway: G,
    user_id: UserId,
    state: SessionState,
    notices: NoticeLog,
    snapshot_refreshes: u64,
}

impl<G: Gateway> SessionController<G> {
    /// The caller must already hold a session identity; without one the
    /// login surface takes over before a controller exists.
    pub fn new(gateway: G, user_id: UserId) -> Self {
        Self {
            gateway,
            user_id,
            state: SessionState::Uninitialized,
            notices: NoticeLog::new(),
            snapshot_refreshes: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn snapshot(&self) -> Option<&UserSnapshot> {
        match &self.state {
            SessionState::Ready(view) => Some(&view.snapshot),
            _ => None,
        }
    }

    pub fn notices(&mut self) -> &mut NoticeLog {
        &mut self.notices
    }

    /// How many times `refresh_snapshot` has run. One per successful
    /// mutation, plus the initial load.
    pub fn snapshot_refreshes(&self) -> u64 {
        self.snapshot_refreshes
    }

    /// Ordered dashboard render list for the current state. Empty while
    /// not `Ready`.
    pub fn sections(&self) -> Vec<DashboardSection> {
        match &self.state {
            SessionState::Ready(view) => citycard_widgets::compose(
                &view.snapshot,
                view.weather.as_ref(),
                view.gov.as_ref(),
            ),
            _ => Vec::new(),
        }
    }

    /// Initial load on page entry.
    pub async fn start(&mut self) {
        self.refresh_snapshot().await;
    }

    /// The named re-fetch operation: pulls the full snapshot and re-runs
    /// the dependent loads. On failure the prior `Ready` state survives
    /// untouched; only a first load can end in `Failed`.
    pub async fn refresh_snapshot(&mut self) {
        self.snapshot_refreshes += 1;
        let prior = std::mem::replace(&mut self.state, SessionState::Loading);

        match self.gateway.fetch_snapshot(self.user_id).await {
            Ok(snapshot) => {
                tracing::debug!(user = %self.user_id, "snapshot refreshed");
                let weather = self.load_weather(&snapshot).await;
                let gov = self.load_gov_services().await;
                self.state = SessionState::Ready(ProfileView {
                    snapshot,
                    weather,
                    gov,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "snapshot fetch failed");
                self.notices.error("Ошибка загрузки данных");
                self.state = match prior {
                    ready @ SessionState::Ready(_) => ready,
                    _ => SessionState::Failed,
                };
            }
        }
    }

    /// Dependent load: weather, only when a city is chosen.
    async fn load_weather(&mut self, snapshot: &UserSnapshot) -> Option<WeatherSnapshot> {
        let city = snapshot.weather_city?;
        match self.gateway.fetch_weather(city).await {
            Ok(weather) => Some(weather),
            Err(err) => {
                tracing::warn!(error = %err, %city, "weather load failed");
                self.notices.error("Ошибка загрузки погоды");
                None
            }
        }
    }

    /// Dependent load: taxes and benefits. The user id is always known
    /// here, so this runs on every refresh.
    async fn load_gov_services(&mut self) -> Option<GovServices> {
        match self.gateway.fetch_gov_services(self.user_id).await {
            Ok(gov) => Some(gov),
            Err(err) => {
                tracing::warn!(error = %err, "gov-services load failed");
                self.notices.error("Ошибка загрузки Госуслуг");
                None
            }
        }
    }

    /// On-demand fine list for one vehicle. `None` means the load
    /// failed (a notice was recorded).
    pub async fn fines(&mut self, vehicle_id: EntityId) -> Option<Vec<Fine>> {
        match self.gateway.fetch_fines(vehicle_id).await {
            Ok(fines) => Some(fines),
            Err(err) => {
                tracing::warn!(error = %err, "fines load failed");
                self.notices.error("Ошибка загрузки штрафов");
                None
            }
        }
    }

    pub async fn update_profile(&mut self, update: ProfileUpdate) -> DomainResult<()> {
        if update.is_empty() {
            return Err(DomainError::validation("profile", "nothing to update"));
        }
        match self.gateway.update_profile(self.user_id, &update).await {
            Ok(()) => self.complete_mutation("Профиль обновлен").await,
            Err(err) => self.report_failure("Ошибка обновления профиля", err),
        }
        Ok(())
    }

    pub async fn add_passport(&mut self, passport: NewPassport) -> DomainResult<()> {
        match self.gateway.add_passport(self.user_id, &passport).await {
            Ok(_) => self.complete_mutation("Паспорт добавлен").await,
            Err(err) => self.report_failure("Ошибка добавления паспорта", err),
        }
        Ok(())
    }

    pub async fn add_transit_card(&mut self, card: NewTransitCard) -> DomainResult<()> {
        match self.gateway.add_transit_card(self.user_id, &card).await {
            Ok(_) => self.complete_mutation("Подорожник добавлен").await,
            Err(err) => self.report_failure("Ошибка добавления карты", err),
        }
        Ok(())
    }

    pub async fn top_up_transit_card(&mut self, card_id: EntityId, amount: u64) -> DomainResult<()> {
        match self.gateway.top_up_transit_card(card_id, amount).await {
            Ok(_) => {
                self.complete_mutation(format!("Пополнено {} ₽", amount / 100))
                    .await
            }
            Err(err) => self.report_failure("Ошибка пополнения", err),
        }
        Ok(())
    }

    /// Pay a fare from a transit card. The balance is already known
    /// from the loaded snapshot, so an insufficient balance is rejected
    /// here, distinctly, before any gateway call.
    pub async fn pay_with_transit_card(
        &mut self,
        card_id: EntityId,
        amount: u64,
    ) -> DomainResult<()> {
        let card = self
            .snapshot()
            .and_then(|s| s.transit_card(card_id))
            .ok_or_else(DomainError::not_found)?;
        card.paid(amount)?;

        match self.gateway.pay_with_transit_card(card_id, amount).await {
            Ok(_) => self.complete_mutation("Оплата прошла").await,
            Err(err) => self.report_failure("Ошибка оплаты", err),
        }
        Ok(())
    }

    pub async fn add_bank_card(&mut self, card: NewBankCard) -> DomainResult<()> {
        match self.gateway.add_bank_card(self.user_id, &card).await {
            Ok(_) => self.complete_mutation("Банковская карта добавлена").await,
            Err(err) => self.report_failure("Ошибка добавления карты", err),
        }
        Ok(())
    }

    pub async fn add_vehicle(&mut self, vehicle: NewVehicle) -> DomainResult<()> {
        match self.gateway.add_vehicle(self.user_id, &vehicle).await {
            Ok(_) => self.complete_mutation("Автомобиль добавлен").await,
            Err(err) => self.report_failure("Ошибка добавления автомобиля", err),
        }
        Ok(())
    }

    pub async fn add_intercom(&mut self, intercom: NewIntercom) -> DomainResult<()> {
        match self.gateway.add_intercom(self.user_id, &intercom).await {
            Ok(_) => self.complete_mutation("Домофон добавлен").await,
            Err(err) => self.report_failure("Ошибка добавления домофона", err),
        }
        Ok(())
    }

    pub async fn set_weather_city(&mut self, city: City) -> DomainResult<()> {
        match self.gateway.set_weather_city(self.user_id, city).await {
            Ok(()) => self.complete_mutation("Город выбран").await,
            Err(err) => self.report_failure("Ошибка выбора города", err),
        }
        Ok(())
    }

    pub async fn save_widgets(&mut self, widgets: Vec<WidgetConfig>) -> DomainResult<()> {
        match self.gateway.save_widget_config(self.user_id, &widgets).await {
            Ok(()) => self.complete_mutation("Виджеты сохранены").await,
            Err(err) => self.report_failure("Ошибка сохранения виджетов", err),
        }
        Ok(())
    }

    /// Success tail shared by every mutation: one notice, then exactly
    /// one snapshot refresh.
    async fn complete_mutation(&mut self, message: impl Into<String>) {
        self.notices.success(message);
        self.refresh_snapshot().await;
    }

    /// Remote failures all collapse into one generic notice naming the
    /// attempted action; transport vs server is a log-level detail.
    fn report_failure(&mut self, message: &str, err: GatewayError) {
        tracing::warn!(error = %err, "{message}");
        self.notices.error(message);
    }
}
