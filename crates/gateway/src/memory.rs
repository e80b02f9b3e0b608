//! In-memory gateway.
//!
//! A faithful local simulation of the backend: assigns ids, enforces
//! insufficient-funds on payment, replaces the widget configuration
//! wholesale. Deterministic where the real backend rolls dice (weather,
//! gov services, fine seeding), so session tests can assert exact
//! outcomes. Also drives the demo binary's offline mode.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;

use citycard_core::{EntityId, UserId};
use citycard_domain::{
    BankCard, BenefitRecord, City, Fine, GovServices, Intercom, NewUser, Passport, ProfileUpdate,
    TaxRecord, TransitCard, UserSnapshot, Vehicle, WeatherIcon, WeatherSnapshot, WidgetConfig,
};
use citycard_acquire::{NewBankCard, NewIntercom, NewPassport, NewTransitCard, NewVehicle};

use crate::api::Gateway;
use crate::error::{GatewayError, GatewayResult};

/// Bonus points granted when an added bank card qualifies for the
/// loyalty program.
const LOYALTY_GRANT: u64 = 1000;

#[derive(Default)]
struct State {
    users: HashMap<UserId, UserSnapshot>,
    phone_index: HashMap<String, UserId>,
}

#[derive(Default)]
pub struct InMemoryGateway {
    state: Mutex<State>,
    offline: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable network: every subsequent call fails
    /// with a transport error until flipped back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Attach a fine to a vehicle, the way the backend's fine lookup
    /// would discover one.
    pub fn insert_fine(&self, vehicle_id: EntityId, fine: Fine) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        for user in state.users.values_mut() {
            if let Some(vehicle) = user.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
                vehicle.fines.push(fine);
                return;
            }
        }
    }

    fn check_online(&self) -> GatewayResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport(
                "network unreachable (simulated)".to_string(),
            ));
        }
        Ok(())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> GatewayResult<T>) -> GatewayResult<T> {
        self.check_online()?;
        let mut state = self
            .state
            .lock()
            .map_err(|_| GatewayError::Transport("state lock poisoned".to_string()))?;
        f(&mut state)
    }
}

fn not_found() -> GatewayError {
    GatewayError::Server {
        status: 404,
        body: r#"{"error": "User not found"}"#.to_string(),
    }
}

fn user_of(state: &mut State, user_id: UserId) -> GatewayResult<&mut UserSnapshot> {
    state.users.get_mut(&user_id).ok_or_else(not_found)
}

fn card_of(state: &mut State, card_id: EntityId) -> GatewayResult<&mut TransitCard> {
    state
        .users
        .values_mut()
        .flat_map(|u| u.transit_cards.iter_mut())
        .find(|c| c.id == card_id)
        .ok_or_else(not_found)
}

impl Gateway for InMemoryGateway {
    async fn register(&self, user: &NewUser) -> GatewayResult<UserId> {
        self.with_state(|state| {
            if state.phone_index.contains_key(&user.phone) {
                return Err(GatewayError::Server {
                    status: 409,
                    body: r#"{"error": "Phone already registered"}"#.to_string(),
                });
            }
            let id = UserId::new();
            let snapshot = UserSnapshot {
                id,
                phone: user.phone.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                middle_name: user.middle_name.clone(),
                email: None,
                birth_date: user.birth_date,
                weather_city: None,
                passport: None,
                transit_cards: Vec::new(),
                bank_cards: Vec::new(),
                vehicles: Vec::new(),
                intercoms: Vec::new(),
                widgets: Vec::new(),
            };
            state.phone_index.insert(user.phone.clone(), id);
            state.users.insert(id, snapshot);
            Ok(id)
        })
    }

    async fn login(&self, phone: &str) -> GatewayResult<UserId> {
        self.with_state(|state| state.phone_index.get(phone).copied().ok_or_else(not_found))
    }

    async fn fetch_snapshot(&self, user_id: UserId) -> GatewayResult<UserSnapshot> {
        self.with_state(|state| user_of(state, user_id).map(|u| u.clone()))
    }

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> GatewayResult<()> {
        self.with_state(|state| {
            let user = user_of(state, user_id)?;
            if let Some(v) = &update.first_name {
                user.first_name = v.clone();
            }
            if let Some(v) = &update.last_name {
                user.last_name = v.clone();
            }
            if let Some(v) = &update.middle_name {
                user.middle_name = Some(v.clone());
            }
            if let Some(v) = &update.email {
                user.email = Some(v.clone());
            }
            if let Some(v) = update.birth_date {
                user.birth_date = Some(v);
            }
            Ok(())
        })
    }

    async fn add_passport(
        &self,
        user_id: UserId,
        passport: &NewPassport,
    ) -> GatewayResult<EntityId> {
        self.with_state(|state| {
            let user = user_of(state, user_id)?;
            if user.passport.is_some() {
                return Err(GatewayError::Server {
                    status: 409,
                    body: r#"{"error": "Passport already on file"}"#.to_string(),
                });
            }
            let id = EntityId::new();
            user.passport = Some(Passport {
                id,
                series: passport.series.clone(),
                number: passport.number.clone(),
                issued_by: passport.issued_by.clone(),
                issued_date: passport.issued_date,
            });
            Ok(id)
        })
    }

    async fn add_transit_card(
        &self,
        user_id: UserId,
        card: &NewTransitCard,
    ) -> GatewayResult<EntityId> {
        self.with_state(|state| {
            let user = user_of(state, user_id)?;
            let id = EntityId::new();
            user.transit_cards.push(TransitCard {
                id,
                card_number: card.card_number.clone(),
                balance: card.balance,
                kind: card.kind,
            });
            Ok(id)
        })
    }

    async fn top_up_transit_card(&self, card_id: EntityId, amount: u64) -> GatewayResult<u64> {
        self.with_state(|state| {
            let card = card_of(state, card_id)?;
            card.balance = card.balance.saturating_add(amount);
            Ok(card.balance)
        })
    }

    async fn pay_with_transit_card(&self, card_id: EntityId, amount: u64) -> GatewayResult<u64> {
        self.with_state(|state| {
            let card = card_of(state, card_id)?;
            if card.balance < amount {
                return Err(GatewayError::Server {
                    status: 400,
                    body: r#"{"error": "Insufficient funds"}"#.to_string(),
                });
            }
            card.balance -= amount;
            Ok(card.balance)
        })
    }

    async fn add_bank_card(&self, user_id: UserId, card: &NewBankCard) -> GatewayResult<EntityId> {
        self.with_state(|state| {
            let user = user_of(state, user_id)?;
            let id = EntityId::new();
            let mut bank_card = BankCard {
                id,
                card_number: card.card_number.clone(),
                bank_name: card.bank_name.clone(),
                balance: card.balance,
                bonus_balance: None,
            };
            if bank_card.is_loyalty_card() {
                bank_card.bonus_balance = Some(LOYALTY_GRANT);
            }
            user.bank_cards.push(bank_card);
            Ok(id)
        })
    }

    async fn add_vehicle(&self, user_id: UserId, vehicle: &NewVehicle) -> GatewayResult<EntityId> {
        self.with_state(|state| {
            let user = user_of(state, user_id)?;
            let id = EntityId::new();
            user.vehicles.push(Vehicle {
                id,
                plate_number: vehicle.plate_number.clone(),
                model: vehicle.model.clone(),
                fines: Vec::new(),
            });
            Ok(id)
        })
    }

    async fn fetch_fines(&self, vehicle_id: EntityId) -> GatewayResult<Vec<Fine>> {
        self.with_state(|state| {
            let vehicle = state
                .users
                .values()
                .flat_map(|u| u.vehicles.iter())
                .find(|v| v.id == vehicle_id)
                .ok_or_else(not_found)?;
            let mut fines = vehicle.fines.clone();
            fines.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(fines)
        })
    }

    async fn fetch_weather(&self, city: City) -> GatewayResult<WeatherSnapshot> {
        self.check_online()?;
        // Canned provider condition ids per city.
        let (temp, condition, condition_id) = match city {
            City::Spb => (5, "Облачно", 804),
            City::Msk => (3, "Небольшой дождь", 500),
            City::Sochi => (18, "Ясно", 800),
            City::Shushary => (4, "Пасмурно", 804),
        };
        Ok(WeatherSnapshot {
            temp,
            condition: condition.to_string(),
            icon: WeatherIcon::from_condition_id(condition_id),
        })
    }

    async fn set_weather_city(&self, user_id: UserId, city: City) -> GatewayResult<()> {
        self.with_state(|state| {
            user_of(state, user_id)?.weather_city = Some(city);
            Ok(())
        })
    }

    async fn fetch_gov_services(&self, user_id: UserId) -> GatewayResult<GovServices> {
        self.with_state(|state| {
            // Presence check only; the sample data is shared.
            user_of(state, user_id)?;
            Ok(sample_gov_services())
        })
    }

    async fn add_intercom(
        &self,
        user_id: UserId,
        intercom: &NewIntercom,
    ) -> GatewayResult<EntityId> {
        self.with_state(|state| {
            let user = user_of(state, user_id)?;
            let id = EntityId::new();
            user.intercoms.push(Intercom {
                id,
                address: intercom.address.clone(),
                city: intercom.city,
                code: intercom.code.clone(),
            });
            Ok(id)
        })
    }

    async fn save_widget_config(
        &self,
        user_id: UserId,
        widgets: &[WidgetConfig],
    ) -> GatewayResult<()> {
        self.with_state(|state| {
            user_of(state, user_id)?.widgets = widgets.to_vec();
            Ok(())
        })
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid constant date")
}

fn sample_gov_services() -> GovServices {
    GovServices {
        taxes: vec![TaxRecord {
            id: EntityId::from_uuid(uuid_from_tag(1)),
            kind: "Транспортный налог".to_string(),
            amount: 350_000,
            due_date: date(2025, 12, 1),
            paid: false,
        }],
        benefits: vec![BenefitRecord {
            id: EntityId::from_uuid(uuid_from_tag(2)),
            name: "Субсидия на оплату ЖКХ".to_string(),
            amount: 250_000,
            valid_until: date(2026, 12, 31),
        }],
    }
}

// Stable ids so repeated fetches return identical snapshots.
fn uuid_from_tag(tag: u128) -> uuid::Uuid {
    uuid::Uuid::from_u128(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(phone: &str) -> NewUser {
        NewUser {
            phone: phone.to_string(),
            first_name: "Анна".to_string(),
            last_name: "Иванова".to_string(),
            middle_name: None,
            birth_date: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trips_identity() {
        let gw = InMemoryGateway::new();
        let id = gw.register(&new_user("+79210000000")).await.unwrap();
        assert_eq!(gw.login("+79210000000").await.unwrap(), id);
        assert!(matches!(
            gw.login("+79219999999").await.unwrap_err(),
            GatewayError::Server { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected() {
        let gw = InMemoryGateway::new();
        gw.register(&new_user("+79210000000")).await.unwrap();
        assert!(matches!(
            gw.register(&new_user("+79210000000")).await.unwrap_err(),
            GatewayError::Server { status: 409, .. }
        ));
    }

    #[tokio::test]
    async fn pay_enforces_balance_like_the_backend() {
        let gw = InMemoryGateway::new();
        let user = gw.register(&new_user("+79210000000")).await.unwrap();
        let card = gw
            .add_transit_card(
                user,
                &NewTransitCard {
                    card_number: "9643000000001".to_string(),
                    kind: citycard_domain::CardKind::Virtual,
                    balance: 0,
                },
            )
            .await
            .unwrap();

        assert_eq!(gw.top_up_transit_card(card, 10_000).await.unwrap(), 10_000);
        assert_eq!(gw.pay_with_transit_card(card, 6_000).await.unwrap(), 4_000);
        assert!(matches!(
            gw.pay_with_transit_card(card, 6_000).await.unwrap_err(),
            GatewayError::Server { status: 400, .. }
        ));
    }

    #[tokio::test]
    async fn loyalty_card_gets_bonus_grant() {
        let gw = InMemoryGateway::new();
        let user = gw.register(&new_user("+79210000000")).await.unwrap();
        gw.add_bank_card(
            user,
            &NewBankCard::new("4276".to_string(), "Сбербанк".to_string(), 0).unwrap(),
        )
        .await
        .unwrap();
        let snap = gw.fetch_snapshot(user).await.unwrap();
        assert_eq!(snap.bank_cards[0].bonus_balance, Some(LOYALTY_GRANT));
    }

    #[tokio::test]
    async fn offline_mode_fails_with_transport_error() {
        let gw = InMemoryGateway::new();
        let user = gw.register(&new_user("+79210000000")).await.unwrap();
        gw.set_offline(true);
        assert!(matches!(
            gw.fetch_snapshot(user).await.unwrap_err(),
            GatewayError::Transport(_)
        ));
        gw.set_offline(false);
        assert!(gw.fetch_snapshot(user).await.is_ok());
    }
}
