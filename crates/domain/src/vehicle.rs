//! Vehicle and its fines. Fines arrive from the backend lookup; the
//! paid flag is toggled externally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    pub id: EntityId,
    /// Amount in kopecks.
    pub amount: u64,
    pub date: NaiveDate,
    pub description: String,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: EntityId,
    pub plate_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub fines: Vec<Fine>,
}

impl Vehicle {
    pub fn unpaid_fines(&self) -> impl Iterator<Item = &Fine> {
        self.fines.iter().filter(|f| !f.paid)
    }

    /// Sum of unpaid fine amounts, kopecks.
    pub fn unpaid_total(&self) -> u64 {
        self.unpaid_fines().map(|f| f.amount).sum()
    }

    pub fn unpaid_count(&self) -> usize {
        self.unpaid_fines().count()
    }
}

pub fn validate_plate_number(plate: &str) -> DomainResult<()> {
    if plate.trim().is_empty() {
        return Err(DomainError::validation("plateNumber", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fine(amount: u64, paid: bool) -> Fine {
        Fine {
            id: EntityId::new(),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            description: "Превышение скорости на 20-40 км/ч".to_string(),
            paid,
        }
    }

    #[test]
    fn unpaid_total_ignores_paid_fines() {
        let v = Vehicle {
            id: EntityId::new(),
            plate_number: "А123БВ178".to_string(),
            model: None,
            fines: vec![fine(50_000, true), fine(30_000, false)],
        };
        assert_eq!(v.unpaid_total(), 30_000);
        assert_eq!(v.unpaid_count(), 1);
    }

    #[test]
    fn empty_plate_is_rejected() {
        assert!(validate_plate_number("").is_err());
        assert!(validate_plate_number("  ").is_err());
        assert!(validate_plate_number("А123БВ178").is_ok());
    }
}
