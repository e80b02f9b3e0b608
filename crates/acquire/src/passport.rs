//! Passport acquisition.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use citycard_core::DomainResult;
use citycard_domain::passport::{validate_issued_by, validate_number, validate_series};

/// Series used for documents issued through the "create" branch.
const ISSUED_SERIES: &str = "4024";
const ISSUED_BY: &str = "ОУФМС России по Санкт-Петербургу";

fn issued_date() -> NaiveDate {
    // Fixed issue date used by the synthetic document flow.
    NaiveDate::from_ymd_opt(2020, 1, 15).expect("valid constant date")
}

/// Canonical payload for the add-passport operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPassport {
    pub series: String,
    pub number: String,
    pub issued_by: String,
    pub issued_date: NaiveDate,
}

/// Dialog outcome for the passport document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassportAcquisition {
    Have {
        series: String,
        number: String,
        issued_by: String,
        issued_date: NaiveDate,
    },
    Create,
}

impl PassportAcquisition {
    /// Resolve the branch to the canonical payload.
    ///
    /// "Have" validates and forwards the entered fields verbatim;
    /// "create" synthesizes a fixed series with a zero-padded random
    /// 6-digit number.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> DomainResult<NewPassport> {
        match self {
            PassportAcquisition::Have {
                series,
                number,
                issued_by,
                issued_date,
            } => {
                validate_series(&series)?;
                validate_number(&number)?;
                validate_issued_by(&issued_by)?;
                Ok(NewPassport {
                    series,
                    number,
                    issued_by,
                    issued_date,
                })
            }
            PassportAcquisition::Create => {
                let number: u32 = rng.gen_range(0..1_000_000);
                Ok(NewPassport {
                    series: ISSUED_SERIES.to_string(),
                    number: format!("{number:06}"),
                    issued_by: ISSUED_BY.to_string(),
                    issued_date: issued_date(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citycard_core::DomainError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn create_always_yields_four_digit_series_and_six_digit_number() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let payload = PassportAcquisition::Create.resolve(&mut rng).unwrap();
            assert_eq!(payload.series.len(), 4);
            assert_eq!(payload.number.len(), 6);
            assert!(payload.number.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn have_round_trips_exact_values() {
        let date = NaiveDate::from_ymd_opt(2018, 6, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let payload = PassportAcquisition::Have {
            series: "4012".to_string(),
            number: "000042".to_string(),
            issued_by: "ГУ МВД".to_string(),
            issued_date: date,
        }
        .resolve(&mut rng)
        .unwrap();
        assert_eq!(payload.series, "4012");
        assert_eq!(payload.number, "000042");
        assert_eq!(payload.issued_by, "ГУ МВД");
        assert_eq!(payload.issued_date, date);
    }

    #[test]
    fn have_rejects_short_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = PassportAcquisition::Have {
            series: "40".to_string(),
            number: "000042".to_string(),
            issued_by: "ГУ МВД".to_string(),
            issued_date: NaiveDate::from_ymd_opt(2018, 6, 3).unwrap(),
        }
        .resolve(&mut rng)
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "series", .. }));
    }
}
