//! Survey creation and listing

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use survey_common::db::{self, Survey};
use survey_common::validation::validate_survey_title;
use tracing::info;

use super::{null_as_default, JsonBody};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSurveyRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSurveyResponse {
    pub survey_id: String,
    pub message: String,
}

/// POST /api/create-survey
pub async fn create_survey(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateSurveyRequest>,
) -> ApiResult<Json<CreateSurveyResponse>> {
    let title = validate_survey_title(&request.title).map_err(ApiError::BadRequest)?;
    let survey = db::insert_survey(&state.db, &title).await?;
    info!(survey_id = %survey.id, "Survey created");

    Ok(Json(CreateSurveyResponse {
        survey_id: survey.id,
        message: "Survey created successfully".to_string(),
    }))
}

/// GET /api/surveys
pub async fn get_surveys(State(state): State<AppState>) -> ApiResult<Json<Vec<Survey>>> {
    let surveys = db::list_surveys(&state.db).await?;
    info!("Retrieved {} surveys", surveys.len());
    Ok(Json(surveys))
}

pub fn survey_routes() -> Router<AppState> {
    Router::new()
        .route("/api/create-survey", post(create_survey))
        .route("/api/surveys", get(get_surveys))
}
