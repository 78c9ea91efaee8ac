use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::models::TeamStats;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub match_name: String,
    pub started_at: DateTime<Utc>,
    pub athlete_count: usize,
    pub team: TeamStats,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub match_name: String,
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.read().await;
    Json(SessionResponse {
        match_name: session.match_name().to_string(),
        started_at: session.started_at(),
        athlete_count: session.players().len(),
        team: session.team_stats(),
    })
}

pub async fn rename_session(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Json<SessionResponse> {
    {
        let mut session = state.session.write().await;
        session.set_match_name(request.match_name.trim());
        tracing::info!("Match renamed to {:?}", session.match_name());
    }
    get_session(State(state)).await
}
