use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Lower edge of the "moderate" band, in degrees Celsius.
pub const MODERATE_FROM_C: f64 = 18.0;
/// Lower edge of the "hot" band, in degrees Celsius.
pub const HOT_FROM_C: f64 = 28.0;

/// Latitude/longitude exactly as the caller sent them.
///
/// No numeric parsing happens here; the strings are forwarded to the
/// provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: String,
    pub lon: String,
}

impl Coordinates {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self { lat: lat.into(), lon: lon.into() }
    }

    /// Build coordinates from raw query values. Returns `None` when either
    /// value is absent or empty.
    pub fn from_query(lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => {
                Some(Self::new(lat, lon))
            }
            _ => None,
        }
    }
}

/// Current-weather payload as returned by the provider.
///
/// Only the fields the service consumes are declared; everything else in
/// the provider response is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamWeather {
    pub weather: Vec<UpstreamCondition>,
    pub main: UpstreamMain,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamCondition {
    pub main: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamMain {
    /// Degrees Celsius (the request always asks for metric units).
    pub temp: f64,
}

/// Coarse temperature bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureStatus {
    Cold,
    Moderate,
    Hot,
}

impl TemperatureStatus {
    /// Bands are closed on the lower edge: 18.0 is moderate, 28.0 is hot.
    pub fn classify(celsius: f64) -> Self {
        if celsius < MODERATE_FROM_C {
            TemperatureStatus::Cold
        } else if celsius < HOT_FROM_C {
            TemperatureStatus::Moderate
        } else {
            // NaN lands here too.
            TemperatureStatus::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureStatus::Cold => "cold",
            TemperatureStatus::Moderate => "moderate",
            TemperatureStatus::Hot => "hot",
        }
    }
}

impl std::fmt::Display for TemperatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The service's answer: first upstream condition plus the temperature bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub condition: String,
    pub temperature_status: TemperatureStatus,
}

impl WeatherSummary {
    pub fn from_upstream(upstream: &UpstreamWeather) -> Result<Self, WeatherError> {
        let condition = upstream
            .weather
            .first()
            .map(|w| w.main.clone())
            .ok_or_else(|| WeatherError::malformed("provider returned no weather conditions"))?;

        Ok(Self {
            condition,
            temperature_status: TemperatureStatus::classify(upstream.main.temp),
        })
    }

    pub fn to_json(&self) -> Result<Vec<u8>, WeatherError> {
        Ok(serde_json::to_vec(self)?)
    }
}
