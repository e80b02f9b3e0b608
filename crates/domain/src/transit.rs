//! Transit card ("Podorozhnik"), a prepaid balance instrument.
//!
//! Top-up and payment are the only balance mutators. Payment against an
//! insufficient balance is a domain rejection decided from the loaded
//! snapshot, never sent to the gateway.

use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult, EntityId};

/// Physical card vs. a virtual one issued on the spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Physical,
    Virtual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitCard {
    pub id: EntityId,
    pub card_number: String,
    /// Balance in kopecks.
    pub balance: u64,
    pub kind: CardKind,
}

impl TransitCard {
    /// Balance after a top-up of `amount` kopecks.
    pub fn topped_up(&self, amount: u64) -> u64 {
        self.balance.saturating_add(amount)
    }

    /// Balance after paying `amount` kopecks. Fails with
    /// `InsufficientFunds` iff `amount > balance`; the balance is
    /// untouched on failure.
    pub fn paid(&self, amount: u64) -> DomainResult<u64> {
        if amount > self.balance {
            return Err(DomainError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        Ok(self.balance - amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn card(balance: u64) -> TransitCard {
        TransitCard {
            id: EntityId::new(),
            card_number: "9643000000001".to_string(),
            balance,
            kind: CardKind::Physical,
        }
    }

    #[test]
    fn payment_within_balance_succeeds() {
        assert_eq!(card(6000).paid(6000).unwrap(), 0);
        assert_eq!(card(6000).paid(100).unwrap(), 5900);
    }

    #[test]
    fn payment_over_balance_is_rejected_and_balance_unchanged() {
        let c = card(50);
        let err = c.paid(60).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientFunds {
                balance: 50,
                requested: 60
            }
        );
        assert_eq!(c.balance, 50);
    }

    proptest! {
        #[test]
        fn top_up_always_adds(balance in 0u64..1_000_000, amount in 0u64..1_000_000) {
            prop_assert_eq!(card(balance).topped_up(amount), balance + amount);
        }

        #[test]
        fn pay_succeeds_iff_amount_at_most_balance(
            balance in 0u64..1_000_000,
            amount in 0u64..1_000_000,
        ) {
            match card(balance).paid(amount) {
                Ok(rest) => {
                    prop_assert!(amount <= balance);
                    prop_assert_eq!(rest, balance - amount);
                }
                Err(_) => prop_assert!(amount > balance),
            }
        }
    }
}
