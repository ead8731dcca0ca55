//! Core library for the weather classification service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the upstream weather provider
//! - Shared domain models and the temperature classification
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{ConfigError, WeatherError};
pub use lookup::lookup;
pub use model::{Coordinates, TemperatureStatus, UpstreamWeather, WeatherSummary};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
