use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::report::{Language, Report};

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub lang: Option<String>,
}

impl ReportParams {
    fn language(&self, default: Language) -> Result<Language, ApiError> {
        match self.lang.as_deref() {
            None => Ok(default),
            Some(code) => code
                .parse::<Language>()
                .map_err(|e| ApiError::BadRequest(e.to_string())),
        }
    }
}

async fn build(state: &AppState, params: &ReportParams) -> Result<Report, ApiError> {
    let language = params.language(state.language)?;
    Ok(state.session.read().await.report(language))
}

pub async fn report_json(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(build(&state, &params).await?))
}

/// Printable report page.
pub async fn report_html(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(build(&state, &params).await?.to_html()))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::testing::*;
    use crate::models::{Fundamental, JerseyNumber, Mark};
    use crate::session::ScoutEvent;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_report_json() {
        let state = test_state();
        {
            let mut session = state.session.write().await;
            let seven = JerseyNumber::new(7).unwrap();
            session
                .apply(&ScoutEvent::increment(seven, Fundamental::Service, Mark::Excellent))
                .unwrap();
            session
                .apply(&ScoutEvent::increment(seven, Fundamental::Service, Mark::Error))
                .unwrap();
        }

        let (status, json) = get_json(&state, "/api/report").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["language"], "en");
        assert_eq!(json["players"].as_array().unwrap().len(), 2);
        assert_eq!(json["team"]["subject"]["kind"], "team");
        assert_eq!(json["team"]["fundamentals"][0]["total_attempts"], 2);
        assert_eq!(json["team"]["fundamentals"][0]["positivity"], 50);
        assert_eq!(json["team"]["fundamentals"][0]["positivity_band"], "good");
    }

    #[tokio::test]
    async fn test_report_language_param() {
        let state = test_state();

        let (status, json) = get_json(&state, "/api/report?lang=it").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["language"], "it");

        let (status, json) = get_json(&state, "/api/report?lang=fr").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_report_html() {
        let state = test_state();
        let (status, body) = send(build_router(state), "GET", "/report?lang=it", "text/html", "").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Report statistico per &quot;Conegliano - Milano&quot;"));
        assert!(body.contains("DI SQUADRA"));
        assert!(body.contains("Egonu"));
    }
}
