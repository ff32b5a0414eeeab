//! Weather widget route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::weather::WeatherSnapshot;

/// Current weather snapshot for the configured coordinates.
#[instrument(skip(state))]
pub async fn current(State(state): State<AppState>) -> Result<Json<WeatherSnapshot>> {
    Ok(Json(state.weather().current().await?))
}
