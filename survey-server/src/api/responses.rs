//! Feedback responses: submission, listing and live sentiment

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use survey_common::db::{self, NewResponse, SurveyResponse};
use survey_common::history::{self, HistoryQuery};
use survey_common::sentiment::{classify, SentimentLabel};
use survey_common::validation::{summarize, ResponseDraft};
use tracing::{debug, info, warn};

use super::{non_blank, null_as_default, FormValue, JsonBody};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: FormValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: FormValue,
    #[serde(default, rename = "userType", deserialize_with = "null_as_default")]
    pub user_type: String,
    #[serde(default)]
    pub survey_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl SubmitResponseRequest {
    fn draft(&self) -> ResponseDraft {
        ResponseDraft {
            name: self.name.clone(),
            age: self.age.as_text(),
            feedback: self.feedback.clone(),
            rating: self.rating.as_integer(),
            user_type: self.user_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponseResult {
    pub message: String,
    pub sentiment: f64,
    pub response_id: String,
}

/// POST /submit-response
pub async fn submit_response(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SubmitResponseRequest>,
) -> ApiResult<Json<SubmitResponseResult>> {
    let valid = request.draft().validate().map_err(|errors| {
        warn!("Rejected response: {}", summarize(&errors));
        ApiError::BadRequest(summarize(&errors))
    })?;

    let sentiment = state.analyzer.compound(&valid.feedback);
    let emotion = state.analyzer.emotion_frequencies(&valid.feedback);

    let stored = db::insert_response(
        &state.db,
        NewResponse {
            name: valid.name,
            age: valid.age,
            feedback: valid.feedback,
            rating: valid.rating,
            user_type: valid.user_type,
            survey_id: non_blank(request.survey_id),
            sentiment,
            emotion,
            username: non_blank(request.username).map(|u| u.trim().to_string()),
        },
    )
    .await?;

    info!(response_id = %stored.id, sentiment, "Response stored");

    Ok(Json(SubmitResponseResult {
        message: "Response submitted successfully".to_string(),
        sentiment,
        response_id: stored.id,
    }))
}

/// GET /responses
///
/// Accepts the history view parameters `name`, `sort` and `order`.
pub async fn get_responses(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<SurveyResponse>>> {
    let responses = db::list_responses(&state.db).await?;
    let responses = history::apply(responses, &query);
    info!("Retrieved {} responses", responses.len());
    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: SentimentLabel,
    pub polarity: f64,
}

/// POST /analyze
pub async fn analyze_feedback(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let polarity = state.analyzer.compound(&request.feedback);
    let sentiment = classify(polarity);
    debug!(%sentiment, polarity, "Feedback analyzed");
    Json(AnalyzeResponse { sentiment, polarity })
}

pub fn response_routes() -> Router<AppState> {
    Router::new()
        .route("/submit-response", post(submit_response))
        .route("/responses", get(get_responses))
        .route("/analyze", post(analyze_feedback))
}
