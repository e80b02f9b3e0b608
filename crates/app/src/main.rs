//! `citycard` demo binary.
//!
//! Minimal argv dispatch, no CLI framework. The real backend is
//! reached through `CITYCARD_API_URL`; `--memory` swaps in the local
//! simulation instead (its state lives for one process, so memory mode
//! runs a scripted walkthrough rather than separate commands).

mod store;
mod telemetry;

use anyhow::{Context, bail};

use citycard_acquire::{NewBankCard, NewVehicle, TransitAcquisition};
use citycard_domain::{City, NewUser};
use citycard_gateway::{Gateway, HttpGateway, InMemoryGateway};
use citycard_session::{NoticeKind, SessionController, SessionState};
use citycard_widgets::DashboardSection;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(pos) = args.iter().position(|a| a == "--memory") {
        args.remove(pos);
        return memory_walkthrough().await;
    }

    let api_url =
        std::env::var("CITYCARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let gateway = HttpGateway::new(api_url);

    match args.first().map(String::as_str) {
        Some("register") => register(&gateway, &args[1..]).await,
        Some("login") => login(&gateway, &args[1..]).await,
        Some("dashboard") | None => dashboard(gateway).await,
        Some("logout") => {
            store::clear()?;
            println!("Вы вышли из аккаунта");
            Ok(())
        }
        Some(other) => bail!("unknown command: {other} (expected register|login|dashboard|logout)"),
    }
}

async fn register(gateway: &HttpGateway, args: &[String]) -> anyhow::Result<()> {
    let [phone, last_name, first_name, rest @ ..] = args else {
        bail!("usage: citycard register <phone> <last-name> <first-name> [middle-name]");
    };
    let user = NewUser {
        phone: phone.clone(),
        first_name: first_name.clone(),
        last_name: last_name.clone(),
        middle_name: rest.first().cloned(),
        birth_date: None,
    };
    user.validate()?;

    let user_id = gateway.register(&user).await.context("registration failed")?;
    store::save(user_id)?;
    tracing::info!(user = %user_id, "registered");
    println!("Аккаунт создан: {phone}");
    Ok(())
}

async fn login(gateway: &HttpGateway, args: &[String]) -> anyhow::Result<()> {
    let [phone] = args else {
        bail!("usage: citycard login <phone>");
    };
    let user_id = gateway.login(phone).await.context("login failed")?;
    store::save(user_id)?;
    println!("Вход выполнен: {phone}");
    Ok(())
}

async fn dashboard<G: Gateway>(gateway: G) -> anyhow::Result<()> {
    let user_id = store::load()?.context("not logged in (run `citycard login <phone>`)")?;

    let mut controller = SessionController::new(gateway, user_id);
    controller.start().await;
    render(&mut controller);
    Ok(())
}

/// Scripted walkthrough against the in-memory gateway: register, pick
/// a city, acquire a card, top it up, add a bank card and a vehicle,
/// then render the resulting dashboard.
async fn memory_walkthrough() -> anyhow::Result<()> {
    let gateway = InMemoryGateway::new();
    let user = NewUser {
        phone: "+79215551234".to_string(),
        first_name: "Анна".to_string(),
        last_name: "Иванова".to_string(),
        middle_name: None,
        birth_date: None,
    };
    let user_id = gateway.register(&user).await.context("registration failed")?;

    let mut controller = SessionController::new(gateway, user_id);
    controller.start().await;

    controller.set_weather_city(City::Spb).await?;
    controller
        .add_transit_card(TransitAcquisition::Create.resolve(&mut rand::thread_rng())?)
        .await?;
    if let Some(card) = controller.snapshot().and_then(|s| s.transit_cards.first()) {
        let card_id = card.id;
        controller.top_up_transit_card(card_id, 50_000).await?;
    }
    controller
        .add_bank_card(NewBankCard::new(
            "4276 1600 0000 0001".to_string(),
            "Сбербанк".to_string(),
            125_000,
        )?)
        .await?;
    controller
        .add_vehicle(NewVehicle::new(
            "А123БВ178".to_string(),
            Some("Lada Vesta".to_string()),
        )?)
        .await?;

    render(&mut controller);
    Ok(())
}

fn render<G: Gateway>(controller: &mut SessionController<G>) {
    match controller.state() {
        SessionState::Ready(_) => {}
        SessionState::Failed => {
            println!("Не удалось загрузить данные");
            return;
        }
        SessionState::Uninitialized | SessionState::Loading => return,
    }

    for section in controller.sections() {
        match section {
            DashboardSection::MainCard { holder, .. } => {
                println!("── Карта горожанина ── {holder}");
            }
            DashboardSection::Weather { city, weather } => {
                println!(
                    "Погода в {}: {}, {}°C",
                    city.display_name(),
                    weather.condition,
                    weather.temp
                );
            }
            DashboardSection::CityPrompt => {
                println!("Выберите город, чтобы видеть погоду");
            }
            DashboardSection::TransitCard { card } => {
                println!("Подорожник {}: {}", card.card_number, rubles(card.balance));
            }
            DashboardSection::BankCard { card } => {
                println!(
                    "{} •{}: {}",
                    card.bank_name,
                    card.masked_suffix(),
                    rubles(card.balance)
                );
            }
            DashboardSection::Bonus { points } => {
                println!("Бонусы: {points}");
            }
            DashboardSection::Fines { total, count } => {
                println!("Штрафы: {count} на {}", rubles(total));
            }
            DashboardSection::GovServices { services } => {
                println!(
                    "Госуслуги: налогов к оплате {}",
                    rubles(services.unpaid_tax_total())
                );
            }
            DashboardSection::Passport { passport } => {
                println!("Паспорт {} {}", passport.series, passport.number);
            }
            DashboardSection::Intercom { intercom } => {
                println!("Домофон: {}", intercom.address);
            }
        }
    }

    for notice in controller.notices().active() {
        let prefix = match notice.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✗",
        };
        println!("{prefix} {}", notice.message);
    }
}

fn rubles(kopecks: u64) -> String {
    format!("{}.{:02} ₽", kopecks / 100, kopecks % 100)
}
