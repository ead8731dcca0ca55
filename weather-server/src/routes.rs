use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, instrument, warn};
use weather_core::{Coordinates, WeatherError, WeatherProvider, lookup};

#[derive(Debug, Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// First value for `key`; later repeats are ignored.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[instrument(skip(state))]
async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let Some(coords) =
        Coordinates::from_query(first_param(&params, "lat"), first_param(&params, "lon"))
    else {
        debug!("rejected request without lat/lon");
        return error_response(&WeatherError::MissingCoordinates);
    };

    let body = match lookup(state.provider.as_ref(), &coords)
        .await
        .and_then(|summary| summary.to_json())
    {
        Ok(body) => body,
        Err(err) => {
            warn!(error = %err, "weather lookup failed");
            return error_response(&err);
        }
    };

    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn error_response(err: &WeatherError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, err.public_message()).into_response()
}
