//! Weather snapshot for the user's chosen city.
//!
//! Ephemeral: never persisted, discarded and re-fetched whenever the
//! city changes.

use serde::{Deserialize, Serialize};

/// Icon class derived from the provider's condition id ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Thunder,
    Rain,
    Snow,
    Sun,
    Cloud,
}

impl WeatherIcon {
    /// Map an OpenWeatherMap condition id to an icon class.
    pub fn from_condition_id(id: u16) -> Self {
        match id {
            0..300 => WeatherIcon::Thunder,
            300..600 => WeatherIcon::Rain,
            600..700 => WeatherIcon::Snow,
            800 => WeatherIcon::Sun,
            _ => WeatherIcon::Cloud,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Rounded temperature, degrees Celsius.
    pub temp: i32,
    pub condition: String,
    pub icon: WeatherIcon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_id_ranges_map_to_icons() {
        assert_eq!(WeatherIcon::from_condition_id(212), WeatherIcon::Thunder);
        assert_eq!(WeatherIcon::from_condition_id(501), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::from_condition_id(601), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::from_condition_id(800), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::from_condition_id(804), WeatherIcon::Cloud);
    }
}
