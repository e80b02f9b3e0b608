//! Account-holder profile fields and the payloads that mutate them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult};

/// Registration payload. Phone is the account key; the backend enforces
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl NewUser {
    pub fn validate(&self) -> DomainResult<()> {
        if self.phone.trim().is_empty() {
            return Err(DomainError::validation("phone", "must not be empty"));
        }
        if self.first_name.trim().is_empty() {
            return Err(DomainError::validation("firstName", "must not be empty"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DomainError::validation("lastName", "must not be empty"));
        }
        Ok(())
    }
}

/// Partial profile edit. Only populated fields are sent; the backend
/// updates column-by-column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.middle_name.is_none()
            && self.email.is_none()
            && self.birth_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_requires_phone_and_names() {
        let user = NewUser {
            phone: "".to_string(),
            first_name: "Анна".to_string(),
            last_name: "Иванова".to_string(),
            middle_name: None,
            birth_date: None,
        };
        let err = user.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "phone", .. }));
    }

    #[test]
    fn empty_update_is_detectable() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            email: Some("anna@example.com".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
