//! Passport document. A user holds at most one; the snapshot field is
//! `Option<Passport>`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult, EntityId};

pub const SERIES_LEN: usize = 4;
pub const NUMBER_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub id: EntityId,
    /// Exactly four ASCII digits.
    pub series: String,
    /// Exactly six ASCII digits, zero-padded.
    pub number: String,
    pub issued_by: String,
    pub issued_date: NaiveDate,
}

fn fixed_digits(field: &'static str, value: &str, len: usize) -> DomainResult<()> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(
            field,
            format!("must be exactly {len} digits"),
        ));
    }
    Ok(())
}

/// Validate a user-supplied series string.
pub fn validate_series(series: &str) -> DomainResult<()> {
    fixed_digits("series", series, SERIES_LEN)
}

/// Validate a user-supplied number string.
pub fn validate_number(number: &str) -> DomainResult<()> {
    fixed_digits("number", number, NUMBER_LEN)
}

pub fn validate_issued_by(issued_by: &str) -> DomainResult<()> {
    if issued_by.trim().is_empty() {
        return Err(DomainError::validation("issuedBy", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_must_be_four_digits() {
        assert!(validate_series("4024").is_ok());
        assert!(validate_series("402").is_err());
        assert!(validate_series("40245").is_err());
        assert!(validate_series("40a4").is_err());
    }

    #[test]
    fn number_must_be_six_digits() {
        assert!(validate_number("000042").is_ok());
        assert!(validate_number("42").is_err());
        assert!(validate_number("00004x").is_err());
    }

    #[test]
    fn issuer_must_not_be_blank() {
        let err = validate_issued_by("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "issuedBy", .. }));
    }
}
