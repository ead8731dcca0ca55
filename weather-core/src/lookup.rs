use tracing::debug;

use crate::{
    error::WeatherError,
    model::{Coordinates, WeatherSummary},
    provider::WeatherProvider,
};

/// One provider call, then classification. No retries, no caching.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    coords: &Coordinates,
) -> Result<WeatherSummary, WeatherError> {
    let upstream = provider.current(coords).await?;
    let summary = WeatherSummary::from_upstream(&upstream)?;

    debug!(
        condition = %summary.condition,
        temp = upstream.main.temp,
        status = %summary.temperature_status,
        "classified weather"
    );

    Ok(summary)
}
