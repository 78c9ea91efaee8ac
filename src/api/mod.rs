//! REST API endpoints.
//!
//! Axum-based HTTP surface over a single scouting session: roster
//! management, tally entry, and report rendering.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::session::SessionError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownAthlete(_) => ApiError::NotFound(err.to_string()),
            SessionError::DuplicateJersey(_) => ApiError::Conflict(err.to_string()),
            SessionError::BlockedOutsideAttack(_)
            | SessionError::Roster(_)
            | SessionError::TallyTooLarge(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin {:?}, allowing any origin", origin);
                AllowOrigin::from(Any)
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/session",
            get(routes::session::get_session).put(routes::session::rename_session),
        )
        .route(
            "/api/athletes",
            get(routes::athletes::list_athletes).post(routes::athletes::add_athlete),
        )
        .route("/api/athletes/import", post(routes::athletes::import_roster))
        .route(
            "/api/athletes/:jersey",
            axum::routing::delete(routes::athletes::remove_athlete),
        )
        .route("/api/players", get(routes::players::list_players))
        .route("/api/players/:jersey", get(routes::players::get_player))
        .route(
            "/api/players/:jersey/:fundamental",
            put(routes::players::replace_counters),
        )
        .route("/api/events", post(routes::players::record_event))
        .route("/api/report", get(routes::report::report_json))
        .route("/report", get(routes::report::report_html))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::build_router;
    use super::state::AppState;
    use crate::models::{Athlete, JerseyNumber};
    use crate::report::Language;
    use crate::session::ScoutingSession;

    /// Session with #7 Paola Egonu and #10 Monica De Gennaro.
    pub fn test_state() -> AppState {
        let mut session = ScoutingSession::new("Conegliano - Milano");
        for (n, name, surname) in [(7, "Paola", "Egonu"), (10, "Monica", "De Gennaro")] {
            let athlete = Athlete::new(
                JerseyNumber::new(n).unwrap(),
                name,
                Some(surname.to_string()),
            )
            .unwrap();
            session.add_athlete(athlete).unwrap();
        }
        AppState::new(session, Language::En, "*")
    }

    pub async fn send(
        app: axum::Router,
        method: &str,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> (StatusCode, String) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", content_type)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(build_router(state.clone()), "GET", uri, "application/json", "").await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    pub async fn send_json(
        state: &AppState,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let (status, body) =
            send(build_router(state.clone()), method, uri, "application/json", body).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}
