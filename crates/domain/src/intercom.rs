//! Intercom entry: an address plus the door code to show on demand.

use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult, EntityId};

use crate::city::City;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intercom {
    pub id: EntityId,
    pub address: String,
    pub city: City,
    pub code: String,
}

pub fn validate_address(address: &str) -> DomainResult<()> {
    if address.trim().is_empty() {
        return Err(DomainError::validation("address", "must not be empty"));
    }
    Ok(())
}

pub fn validate_code(code: &str) -> DomainResult<()> {
    if code.trim().is_empty() {
        return Err(DomainError::validation("code", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_code_is_rejected() {
        let err = validate_code("").unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "code", .. }));
    }

    #[test]
    fn populated_fields_pass() {
        assert!(validate_address("ул. Ленина, д. 1").is_ok());
        assert!(validate_code("123#456").is_ok());
    }
}
