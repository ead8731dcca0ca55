use crate::{
    Config,
    error::{ConfigError, WeatherError},
    model::{Coordinates, UpstreamWeather},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current-weather payloads for a coordinate pair.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, coords: &Coordinates) -> Result<UpstreamWeather, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails when no credential is configured.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, ConfigError> {
    let api_key = config.api_key()?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        config.base_url().to_owned(),
    )))
}
