//! Analytics dashboard: summary, age chart and CSV export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use survey_common::analytics::{self, AnalyticsSummary, DEFAULT_RECENT_FEEDBACKS};
use serde::Deserialize;
use survey_common::db::{self, SurveyResponse};
use tracing::{info, warn};

use crate::chart::render_age_chart;
use crate::error::{ApiError, ApiResult};
use crate::export::{responses_to_csv, CSV_FILENAME};
use crate::AppState;

const RECENT_FEEDBACK_SETTING: &str = "analytics_recent_feedback_count";

/// All responses, or 404 when nothing has been submitted yet
async fn require_responses(state: &AppState, view: &str) -> ApiResult<Vec<SurveyResponse>> {
    let responses = db::list_responses(&state.db).await?;
    if responses.is_empty() {
        warn!("No responses found for {}", view);
        return Err(ApiError::NotFound("No data available".to_string()));
    }
    Ok(responses)
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Keep only feedback texts containing this term (case-insensitive)
    pub search: Option<String>,
}

/// GET /analytics
///
/// `?search=` narrows `all_feedbacks`; the other figures cover every response.
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<AnalyticsSummary>> {
    let responses = require_responses(&state, "analytics").await?;
    let answers = db::list_answers(&state.db, None).await?;
    let recent = db::get_setting_i64(
        &state.db,
        RECENT_FEEDBACK_SETTING,
        DEFAULT_RECENT_FEEDBACKS as i64,
    )
    .await?;

    let mut summary = analytics::compute(&responses, &answers, recent.max(0) as usize)
        .ok_or_else(|| ApiError::NotFound("No data available".to_string()))?;

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let matches: Vec<String> = analytics::search_feedbacks(&summary.all_feedbacks, term)
            .into_iter()
            .map(str::to_string)
            .collect();
        info!(term, matches = matches.len(), "Filtered feedbacks");
        summary.all_feedbacks = matches;
    }

    info!(total = summary.total_responses, "Analytics data prepared");
    Ok(Json(summary))
}

/// GET /chart
pub async fn get_chart(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let responses = require_responses(&state, "chart").await?;
    let counts = analytics::age_distribution(responses.iter().map(|r| r.age));
    let svg = render_age_chart(&counts)?;

    info!("Chart generated successfully");
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// GET /export-csv
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let responses = require_responses(&state, "CSV export").await?;
    let csv = responses_to_csv(&responses);

    info!(rows = responses.len(), "CSV exported successfully");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", CSV_FILENAME),
            ),
        ],
        csv,
    ))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(get_analytics))
        .route("/chart", get(get_chart))
        .route("/export-csv", get(export_csv))
}
