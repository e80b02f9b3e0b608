//! Bank card. Display-only in this client: no mutation flow exists
//! beyond the initial add.

use serde::{Deserialize, Serialize};

use citycard_core::EntityId;

/// Substrings that mark a card as belonging to the loyalty program.
/// Case-insensitive containment match, kept verbatim from the backend.
/// Known to be fragile (false positives on unrelated bank names).
const LOYALTY_MARKERS: [&str; 2] = ["сбер", "sber"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCard {
    pub id: EntityId,
    pub card_number: String,
    pub bank_name: String,
    /// Balance in kopecks.
    pub balance: u64,
    /// Loyalty bonus points, if the issuing bank runs the program.
    pub bonus_balance: Option<u64>,
}

impl BankCard {
    /// Whether this card participates in the bonus program.
    pub fn is_loyalty_card(&self) -> bool {
        let name = self.bank_name.to_lowercase();
        LOYALTY_MARKERS.iter().any(|m| name.contains(m))
    }

    /// Last four characters for masked display. Char-based, since
    /// stored numbers are free-form text and may hold multi-byte
    /// separators.
    pub fn masked_suffix(&self) -> &str {
        let start = self
            .card_number
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(i, _)| i);
        &self.card_number[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(bank_name: &str) -> BankCard {
        BankCard {
            id: EntityId::new(),
            card_number: "4276550012345678".to_string(),
            bank_name: bank_name.to_string(),
            balance: 500_000,
            bonus_balance: None,
        }
    }

    #[test]
    fn cyrillic_marker_matches_case_insensitively() {
        assert!(card("Сбербанк").is_loyalty_card());
        assert!(card("СБЕР").is_loyalty_card());
    }

    #[test]
    fn latin_marker_matches() {
        assert!(card("SberBank").is_loyalty_card());
    }

    #[test]
    fn unrelated_bank_does_not_match() {
        assert!(!card("Тинькофф").is_loyalty_card());
        assert!(!card("VTB").is_loyalty_card());
    }

    #[test]
    fn masked_suffix_is_last_four() {
        assert_eq!(card("ВТБ").masked_suffix(), "5678");
    }

    #[test]
    fn masked_suffix_handles_multibyte_numbers() {
        let mut c = card("ВТБ");
        c.card_number = "аб1".to_string();
        assert_eq!(c.masked_suffix(), "аб1");
        c.card_number = "МИР •• 1234".to_string();
        assert_eq!(c.masked_suffix(), "1234");
        c.card_number = String::new();
        assert_eq!(c.masked_suffix(), "");
    }
}
