use thiserror::Error;

/// Everything that can go wrong while answering a weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("lat and lon query parameters are required")]
    MissingCoordinates,

    /// Transport failure or a non-200 answer from the provider.
    #[error("weather provider unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// Provider answered 200 but the body is not a usable payload.
    #[error("weather provider returned malformed data: {message}")]
    UpstreamMalformed { message: String },

    #[error("failed to encode weather summary: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Problems found while loading or checking configuration.
///
/// Only raised before the server starts listening, so it has no HTTP mapping.
#[derive(Debug, Error)]
#[error("configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}

impl WeatherError {
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable { message: message.into() }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::UpstreamMalformed { message: message.into() }
    }

    /// Whether the caller (rather than the service or its provider) is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, WeatherError::MissingCoordinates)
    }

    /// Fixed text safe to hand back to callers. Details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            WeatherError::MissingCoordinates => "lat and lon query parameters are required",
            WeatherError::UpstreamUnavailable { .. } => "Failed to fetch weather data",
            WeatherError::UpstreamMalformed { .. } => "Failed to parse weather data",
            WeatherError::Encoding(_) => "Failed to encode response",
        }
    }
}
