use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::routes::parse_jersey;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Athlete, AthleteRecord, PlayerStats};
use crate::session::ImportSummary;

pub async fn list_athletes(State(state): State<AppState>) -> Json<Vec<Athlete>> {
    let session = state.session.read().await;
    Json(session.roster().iter().map(|a| a.as_ref().clone()).collect())
}

pub async fn add_athlete(
    State(state): State<AppState>,
    Json(record): Json<AthleteRecord>,
) -> Result<(StatusCode, Json<PlayerStats>), ApiError> {
    let athlete = Athlete::try_from(record).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut session = state.session.write().await;
    let stats = session.add_athlete(athlete)?;
    Ok((StatusCode::CREATED, Json(stats.clone())))
}

/// Import a roster file sent as the raw request body.
pub async fn import_roster(State(state): State<AppState>, body: String) -> Json<ImportSummary> {
    let mut session = state.session.write().await;
    Json(session.import_roster(&body))
}

pub async fn remove_athlete(
    State(state): State<AppState>,
    Path(jersey): Path<String>,
) -> Result<StatusCode, ApiError> {
    let number = parse_jersey(&jersey)?;
    state.session.write().await.remove_athlete(number)?;
    Ok(StatusCode::NO_CONTENT)
}
