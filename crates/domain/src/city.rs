//! Cities the backend knows how to serve weather and intercoms for.

use serde::{Deserialize, Serialize};

/// Closed set of supported cities. The wire code is the short latin
/// form the backend keys its city map on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Spb,
    Msk,
    Sochi,
    Shushary,
}

impl City {
    /// Wire code used in query strings and request bodies.
    pub fn code(&self) -> &'static str {
        match self {
            City::Spb => "spb",
            City::Msk => "msk",
            City::Sochi => "sochi",
            City::Shushary => "shushary",
        }
    }

    /// Human-readable name shown on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Spb => "Санкт-Петербург",
            City::Msk => "Москва",
            City::Sochi => "Сочи",
            City::Shushary => "Шушары",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "spb" => Some(City::Spb),
            "msk" => Some(City::Msk),
            "sochi" => Some(City::Sochi),
            "shushary" => Some(City::Shushary),
            _ => None,
        }
    }
}

impl core::fmt::Display for City {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for city in [City::Spb, City::Msk, City::Sochi, City::Shushary] {
            assert_eq!(City::from_code(city.code()), Some(city));
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(City::from_code("ekb"), None);
    }
}
