use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{comfort::Comfort, error::FetchError};

const ICON_URL_BASE: &str = "https://yastatic.net/weather/i/icons/funky/dark";

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FetchError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FetchError::InvalidRequest(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FetchError::InvalidRequest(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Current conditions as reported in the `fact` object of an informer response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherFact {
    /// Air temperature, °C.
    #[serde(rename = "temp")]
    pub temperature: i32,
    /// Apparent temperature, °C.
    pub feels_like: i32,
    /// Condition token such as `clear` or `light-rain`.
    #[serde(rename = "condition")]
    pub condition_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl WeatherFact {
    /// URL of the SVG icon for this fact, if the response named a non-empty one.
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_deref()
            .filter(|icon| !icon.is_empty())
            .map(|icon| format!("{ICON_URL_BASE}/{icon}.svg"))
    }
}

/// A fact enriched with presentation text, built once per successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub fact: WeatherFact,
    pub condition_label: String,
    pub comfort: Comfort,
    pub recommendation: String,
    pub fetched_at: DateTime<Utc>,
}
