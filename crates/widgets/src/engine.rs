//! Composition algorithm.
//!
//! The stored config is the ordering authority: entries are stable-
//! sorted by `order` and each entry expands to zero or more sections.
//! The stored `visible` flag governs only the fixed informational
//! widgets (weather, gov services); entity-derived widgets take their
//! visibility from the snapshot alone, and the main card always
//! renders.

use citycard_domain::widget::{WidgetConfig, WidgetKind, default_config};
use citycard_domain::{GovServices, UserSnapshot, WeatherSnapshot};

use crate::section::DashboardSection;

/// Stable-sort config entries by `order`, ties keeping their original
/// sequence.
pub fn ordered(configs: &[WidgetConfig]) -> Vec<&WidgetConfig> {
    let mut sorted: Vec<&WidgetConfig> = configs.iter().collect();
    sorted.sort_by_key(|w| w.order);
    sorted
}

/// Compute the ordered render list for the dashboard.
///
/// `weather` and `gov` are the dependent loads owned by the session
/// controller; either may still be absent.
pub fn compose(
    snapshot: &UserSnapshot,
    weather: Option<&WeatherSnapshot>,
    gov: Option<&GovServices>,
) -> Vec<DashboardSection> {
    // A fresh account has no stored config yet; fall back to the seed.
    let seeded;
    let configs = if snapshot.widgets.is_empty() {
        seeded = default_config();
        &seeded
    } else {
        &snapshot.widgets
    };

    let mut sections = Vec::new();
    for entry in ordered(configs) {
        expand(entry, snapshot, weather, gov, &mut sections);
    }
    sections
}

fn expand(
    entry: &WidgetConfig,
    snapshot: &UserSnapshot,
    weather: Option<&WeatherSnapshot>,
    gov: Option<&GovServices>,
    out: &mut Vec<DashboardSection>,
) {
    match entry.kind {
        WidgetKind::MainCard => out.push(DashboardSection::MainCard {
            holder: format!("{} {}", snapshot.first_name, snapshot.last_name),
            user_id: snapshot.id,
        }),
        WidgetKind::Weather => {
            if !entry.visible {
                return;
            }
            match (snapshot.weather_city, weather) {
                (Some(city), Some(w)) => out.push(DashboardSection::Weather {
                    city,
                    weather: w.clone(),
                }),
                // City chosen but the load has not resolved yet.
                (Some(_), None) => {}
                (None, _) => out.push(DashboardSection::CityPrompt),
            }
        }
        WidgetKind::Transit => {
            for card in &snapshot.transit_cards {
                out.push(DashboardSection::TransitCard { card: card.clone() });
            }
        }
        WidgetKind::BankCards => {
            for card in &snapshot.bank_cards {
                out.push(DashboardSection::BankCard { card: card.clone() });
            }
        }
        WidgetKind::Bonus => {
            if let Some(card) = snapshot.loyalty_card() {
                out.push(DashboardSection::Bonus {
                    points: card.bonus_balance.unwrap_or(0),
                });
            }
        }
        WidgetKind::Fines => {
            if snapshot.has_unpaid_fines() {
                out.push(DashboardSection::Fines {
                    total: snapshot.vehicles.iter().map(|v| v.unpaid_total()).sum(),
                    count: snapshot.vehicles.iter().map(|v| v.unpaid_count()).sum(),
                });
            }
        }
        WidgetKind::GovServices => {
            if !entry.visible {
                return;
            }
            if let Some(services) = gov {
                out.push(DashboardSection::GovServices {
                    services: services.clone(),
                });
            }
        }
        WidgetKind::Passport => {
            if let Some(passport) = &snapshot.passport {
                out.push(DashboardSection::Passport {
                    passport: passport.clone(),
                });
            }
        }
        WidgetKind::Intercoms => {
            for intercom in &snapshot.intercoms {
                out.push(DashboardSection::Intercom {
                    intercom: intercom.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use citycard_core::{EntityId, UserId};
    use citycard_domain::transit::CardKind;
    use citycard_domain::{BankCard, City, Fine, TransitCard, Vehicle};
    use proptest::prelude::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            id: UserId::new(),
            phone: "+79210000000".to_string(),
            first_name: "Анна".to_string(),
            last_name: "Иванова".to_string(),
            middle_name: None,
            email: None,
            birth_date: None,
            weather_city: None,
            passport: None,
            transit_cards: Vec::new(),
            bank_cards: Vec::new(),
            vehicles: Vec::new(),
            intercoms: Vec::new(),
            widgets: Vec::new(),
        }
    }

    fn bank_card(bank_name: &str, bonus: Option<u64>) -> BankCard {
        BankCard {
            id: EntityId::new(),
            card_number: "4276550012345678".to_string(),
            bank_name: bank_name.to_string(),
            balance: 100_000,
            bonus_balance: bonus,
        }
    }

    fn entry(kind: WidgetKind, visible: bool, order: i32) -> WidgetConfig {
        WidgetConfig {
            id: EntityId::new(),
            kind,
            visible,
            order,
        }
    }

    #[test]
    fn main_card_renders_even_when_marked_hidden() {
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::MainCard, false, 0)];
        let sections = compose(&snap, None, None);
        assert!(matches!(sections[0], DashboardSection::MainCard { .. }));
    }

    #[test]
    fn city_prompt_until_city_chosen_then_weather() {
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::Weather, true, 0)];

        let sections = compose(&snap, None, None);
        assert_eq!(sections, vec![DashboardSection::CityPrompt]);

        snap.weather_city = Some(City::Spb);
        let w = WeatherSnapshot {
            temp: 5,
            condition: "Облачно".to_string(),
            icon: citycard_domain::WeatherIcon::Cloud,
        };
        let sections = compose(&snap, Some(&w), None);
        assert_eq!(
            sections,
            vec![DashboardSection::Weather {
                city: City::Spb,
                weather: w
            }]
        );
    }

    #[test]
    fn weather_hidden_by_stored_flag() {
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::Weather, false, 0)];
        assert!(compose(&snap, None, None).is_empty());
    }

    #[test]
    fn bonus_requires_a_qualifying_card() {
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::Bonus, true, 0)];
        snap.bank_cards = vec![bank_card("ВТБ", Some(999))];
        assert!(compose(&snap, None, None).is_empty());

        snap.bank_cards.push(bank_card("Сбербанк", Some(120)));
        assert_eq!(
            compose(&snap, None, None),
            vec![DashboardSection::Bonus { points: 120 }]
        );
    }

    #[test]
    fn fines_sum_unpaid_only() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::Fines, true, 0)];
        snap.vehicles = vec![Vehicle {
            id: EntityId::new(),
            plate_number: "А123БВ178".to_string(),
            model: None,
            fines: vec![
                Fine {
                    id: EntityId::new(),
                    amount: 50_000,
                    date,
                    description: "Проезд на красный свет".to_string(),
                    paid: true,
                },
                Fine {
                    id: EntityId::new(),
                    amount: 30_000,
                    date,
                    description: "Нарушение правил парковки".to_string(),
                    paid: false,
                },
            ],
        }];
        assert_eq!(
            compose(&snap, None, None),
            vec![DashboardSection::Fines {
                total: 30_000,
                count: 1
            }]
        );
    }

    #[test]
    fn widget_disappears_when_last_entity_goes() {
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::Transit, true, 0)];
        snap.transit_cards = vec![TransitCard {
            id: EntityId::new(),
            card_number: "9643000000001".to_string(),
            balance: 100,
            kind: CardKind::Virtual,
        }];
        assert_eq!(compose(&snap, None, None).len(), 1);

        // Next snapshot no longer holds the card; recomputed, not cached.
        snap.transit_cards.clear();
        assert!(compose(&snap, None, None).is_empty());
    }

    #[test]
    fn entity_widgets_ignore_stored_visible_flag() {
        let mut snap = snapshot();
        snap.widgets = vec![entry(WidgetKind::Transit, false, 0)];
        snap.transit_cards = vec![TransitCard {
            id: EntityId::new(),
            card_number: "9643000000001".to_string(),
            balance: 100,
            kind: CardKind::Virtual,
        }];
        // Entity-derived: the card exists, so the section renders.
        assert_eq!(compose(&snap, None, None).len(), 1);
    }

    #[test]
    fn empty_config_falls_back_to_seed() {
        let snap = snapshot();
        let sections = compose(&snap, None, None);
        // Seed includes the main card and the weather slot (prompt).
        assert!(matches!(sections[0], DashboardSection::MainCard { .. }));
        assert!(sections.contains(&DashboardSection::CityPrompt));
    }

    proptest! {
        #[test]
        fn ordering_is_a_stable_sort(orders in proptest::collection::vec(0i32..5, 0..24)) {
            let configs: Vec<WidgetConfig> = orders
                .iter()
                .map(|&order| entry(WidgetKind::MainCard, true, order))
                .collect();
            let sorted = ordered(&configs);

            // Non-decreasing by order.
            prop_assert!(sorted.windows(2).all(|w| w[0].order <= w[1].order));

            // Ties keep original relative sequence: ids of equal-order
            // entries appear in input order.
            for value in 0..5 {
                let input: Vec<_> = configs
                    .iter()
                    .filter(|w| w.order == value)
                    .map(|w| w.id)
                    .collect();
                let output: Vec<_> = sorted
                    .iter()
                    .filter(|w| w.order == value)
                    .map(|w| w.id)
                    .collect();
                prop_assert_eq!(input, output);
            }
        }
    }
}
