use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{Coordinates, UpstreamWeather},
};

use super::WeatherProvider;

/// OpenWeather "current weather" endpoint, always queried in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// `base_url` is everything before `/weather`, e.g. `https://api.openweathermap.org/data/2.5`.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, coords: &Coordinates) -> Result<UpstreamWeather, WeatherError> {
        let url = self.endpoint();
        debug!(%url, lat = %coords.lat, lon = %coords.lon, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.lat.as_str()),
                ("lon", coords.lon.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error("request to OpenWeather failed", e))?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(WeatherError::unavailable(format!(
                "OpenWeather answered {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| transport_error("failed to read OpenWeather body", e))?;

        serde_json::from_slice(&body)
            .map_err(|e| WeatherError::malformed(format!("failed to parse OpenWeather JSON: {e}")))
    }
}

/// reqwest errors carry the request URL, and the URL carries `appid`.
fn transport_error(context: &str, e: reqwest::Error) -> WeatherError {
    WeatherError::unavailable(format!("{context}: {}", e.without_url()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
