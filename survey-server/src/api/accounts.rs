//! Registration, login and per-user feedback history

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use survey_common::accounts;
use survey_common::db::{self, SurveyResponse};
use tracing::info;

use super::{non_blank, null_as_default, JsonBody};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub username: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let user = accounts::register(&state.db, &request.username, &request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            message: "User registered successfully".to_string(),
            username: user.username,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CredentialsRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let user = accounts::authenticate(&state.db, &request.username, &request.password)
        .await
        .map_err(|e| match e {
            survey_common::Error::NotFound(msg) => ApiError::Unauthorized(msg),
            other => other.into(),
        })?;

    info!(username = %user.username, "Logged in");
    Ok(Json(AccountResponse {
        message: "Login successful".to_string(),
        username: user.username,
    }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub username: Option<String>,
}

/// GET /history?username=
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<SurveyResponse>>> {
    let username = non_blank(params.username)
        .ok_or_else(|| ApiError::BadRequest("Username is required".to_string()))?;

    let responses = db::list_responses_by_username(&state.db, username.trim()).await?;
    info!(username = %username, "Retrieved {} history entries", responses.len());
    Ok(Json(responses))
}

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/history", get(get_history))
}
