//! Transit-card acquisition.

use rand::Rng;
use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult};
use citycard_domain::CardKind;

/// Issuer prefix all Podorozhnik numbers start with.
const CARD_PREFIX: &str = "9643";

/// Canonical payload for the add-transit-card operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransitCard {
    pub card_number: String,
    pub kind: CardKind,
    /// Initial balance in kopecks. Always zero: the backend owns the
    /// real balance of an existing physical card.
    pub balance: u64,
}

/// Dialog outcome: the user already holds a card, or wants a virtual
/// one issued now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitAcquisition {
    Have { card_number: String },
    Create,
}

impl TransitAcquisition {
    /// Resolve the branch to the canonical payload.
    ///
    /// "Have" forwards the entered number verbatim after validation;
    /// "create" synthesizes a prefixed number with a 9-digit random
    /// suffix.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> DomainResult<NewTransitCard> {
        match self {
            TransitAcquisition::Have { card_number } => {
                if card_number.trim().is_empty() {
                    return Err(DomainError::validation("cardNumber", "must not be empty"));
                }
                Ok(NewTransitCard {
                    card_number,
                    kind: CardKind::Physical,
                    balance: 0,
                })
            }
            TransitAcquisition::Create => {
                let suffix: u32 = rng.gen_range(0..1_000_000_000);
                Ok(NewTransitCard {
                    card_number: format!("{CARD_PREFIX}{suffix:09}"),
                    kind: CardKind::Virtual,
                    balance: 0,
                })
            }
        }
    }
}
