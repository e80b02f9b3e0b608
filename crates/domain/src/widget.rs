//! Stored widget configuration: which dashboard sections the user wants
//! and in what order. The composition engine interprets it; this module
//! only defines the data and the default seed.

use serde::{Deserialize, Serialize};

use citycard_core::EntityId;

/// Tag identifying a dashboard widget family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// The city card itself. Always rendered.
    MainCard,
    /// Weather for the chosen city (or the "choose a city" prompt).
    Weather,
    /// One section per transit card held.
    Transit,
    /// One section per bank card held.
    BankCards,
    /// Loyalty bonus balance, only when a qualifying card exists.
    Bonus,
    /// Unpaid vehicle fines summary.
    Fines,
    /// Taxes and benefits snapshot.
    GovServices,
    /// Passport document card.
    Passport,
    /// One section per intercom entry.
    Intercoms,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 9] = [
        WidgetKind::MainCard,
        WidgetKind::Weather,
        WidgetKind::Transit,
        WidgetKind::BankCards,
        WidgetKind::Bonus,
        WidgetKind::Fines,
        WidgetKind::GovServices,
        WidgetKind::Passport,
        WidgetKind::Intercoms,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub id: EntityId,
    pub kind: WidgetKind,
    pub visible: bool,
    /// Render sequence. Ties are broken by original position (the sort
    /// is stable).
    pub order: i32,
}

/// Seed configuration for a fresh account: every kind, sequential
/// order, visible.
pub fn default_config() -> Vec<WidgetConfig> {
    WidgetKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| WidgetConfig {
            id: EntityId::new(),
            kind,
            visible: true,
            order: i as i32,
        })
        .collect()
}
