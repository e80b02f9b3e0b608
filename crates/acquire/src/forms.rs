//! Plain add-entity payloads with field validation.
//!
//! These entity kinds have no "create" branch: the user always enters
//! real identifying fields, so each is a validated constructor rather
//! than a tagged acquisition.

use serde::{Deserialize, Serialize};

use citycard_core::{DomainError, DomainResult};
use citycard_domain::City;
use citycard_domain::intercom::{validate_address, validate_code};
use citycard_domain::vehicle::validate_plate_number;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankCard {
    pub card_number: String,
    pub bank_name: String,
    /// Balance in kopecks as reported at add time.
    pub balance: u64,
}

impl NewBankCard {
    pub fn new(card_number: String, bank_name: String, balance: u64) -> DomainResult<Self> {
        if card_number.trim().is_empty() {
            return Err(DomainError::validation("cardNumber", "must not be empty"));
        }
        if bank_name.trim().is_empty() {
            return Err(DomainError::validation("bankName", "must not be empty"));
        }
        Ok(Self {
            card_number,
            bank_name,
            balance,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub plate_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl NewVehicle {
    pub fn new(plate_number: String, model: Option<String>) -> DomainResult<Self> {
        validate_plate_number(&plate_number)?;
        Ok(Self {
            plate_number,
            model: model.filter(|m| !m.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIntercom {
    pub address: String,
    pub city: City,
    pub code: String,
}

impl NewIntercom {
    pub fn new(address: String, city: City, code: String) -> DomainResult<Self> {
        validate_address(&address)?;
        validate_code(&code)?;
        Ok(Self {
            address,
            city,
            code,
        })
    }
}
