//! Government-services snapshot: taxes and benefits. Read-only on the
//! client; nothing here is mutated locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use citycard_core::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecord {
    pub id: EntityId,
    pub kind: String,
    /// Amount in kopecks.
    pub amount: u64,
    pub due_date: NaiveDate,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitRecord {
    pub id: EntityId,
    pub name: String,
    /// Amount in kopecks; zero for non-monetary benefits.
    pub amount: u64,
    pub valid_until: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GovServices {
    pub taxes: Vec<TaxRecord>,
    pub benefits: Vec<BenefitRecord>,
}

impl GovServices {
    pub fn unpaid_taxes(&self) -> impl Iterator<Item = &TaxRecord> {
        self.taxes.iter().filter(|t| !t.paid)
    }

    /// Sum of unpaid tax amounts, kopecks.
    pub fn unpaid_tax_total(&self) -> u64 {
        self.unpaid_taxes().map(|t| t.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaid_tax_total_skips_paid_records() {
        let due = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let gov = GovServices {
            taxes: vec![
                TaxRecord {
                    id: EntityId::new(),
                    kind: "Транспортный налог".to_string(),
                    amount: 350_000,
                    due_date: due,
                    paid: false,
                },
                TaxRecord {
                    id: EntityId::new(),
                    kind: "Земельный налог".to_string(),
                    amount: 120_000,
                    due_date: due,
                    paid: true,
                },
            ],
            benefits: Vec::new(),
        };
        assert_eq!(gov.unpaid_tax_total(), 350_000);
    }
}
