use axum::extract::{Path, State};
use axum::Json;

use crate::api::routes::parse_jersey;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Fundamental, FundamentalStat, PlayerStats, RawCounters};
use crate::session::ScoutEvent;

pub async fn list_players(State(state): State<AppState>) -> Json<Vec<PlayerStats>> {
    Json(state.session.read().await.players().to_vec())
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(jersey): Path<String>,
) -> Result<Json<PlayerStats>, ApiError> {
    let number = parse_jersey(&jersey)?;
    let session = state.session.read().await;
    session
        .player(number)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No athlete with jersey number {}", number)))
}

/// Overwrite the counters of one fundamental, as when editing a tally cell.
pub async fn replace_counters(
    State(state): State<AppState>,
    Path((jersey, fundamental)): Path<(String, String)>,
    Json(counters): Json<RawCounters>,
) -> Result<Json<FundamentalStat>, ApiError> {
    let number = parse_jersey(&jersey)?;
    let fundamental = fundamental
        .parse::<Fundamental>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut session = state.session.write().await;
    let stat = session.replace_counters(number, fundamental, counters)?;
    Ok(Json(stat.clone()))
}

/// Record one tally change.
pub async fn record_event(
    State(state): State<AppState>,
    Json(event): Json<ScoutEvent>,
) -> Result<Json<FundamentalStat>, ApiError> {
    let mut session = state.session.write().await;
    let stat = session.apply(&event)?;
    Ok(Json(stat.clone()))
}
