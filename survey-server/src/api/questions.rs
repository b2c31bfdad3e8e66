//! Follow-up questions and their answers

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use survey_common::db::{self, Answer, FollowUpQuestion};
use tracing::info;

use super::{null_as_default, JsonBody};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feedback: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub survey_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_id: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedQuestion {
    pub id: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<GeneratedQuestion>,
}

/// POST /generate-questions
pub async fn generate_questions(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenerateQuestionsRequest>,
) -> ApiResult<Json<GenerateQuestionsResponse>> {
    let domain = request.domain.trim();
    if domain.is_empty() {
        return Err(ApiError::BadRequest("Domain is required".to_string()));
    }

    info!(
        domain,
        generator = state.generator.name(),
        "Generating follow-up questions"
    );
    let texts = state.generator.generate(domain, &request.feedback).await?;

    let stored = db::insert_questions(
        &state.db,
        &request.survey_id,
        &request.response_id,
        domain,
        &texts,
    )
    .await?;
    info!("Stored {} questions", stored.len());

    Ok(Json(GenerateQuestionsResponse {
        questions: stored
            .into_iter()
            .map(|q| GeneratedQuestion {
                id: q.id,
                question: q.question,
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub survey_id: Option<String>,
}

/// GET /questions
pub async fn get_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionsQuery>,
) -> ApiResult<Json<Vec<FollowUpQuestion>>> {
    let survey_id = query.survey_id.as_deref().filter(|id| !id.is_empty());
    let questions = db::list_questions(&state.db, survey_id).await?;
    info!("Retrieved {} questions", questions.len());
    Ok(Json(questions))
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_id: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub message: String,
    pub sentiment: f64,
}

/// POST /submit-answer
pub async fn submit_answer(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SubmitAnswerRequest>,
) -> ApiResult<Json<SubmitAnswerResponse>> {
    let answer = request.answer.trim();
    if answer.is_empty() {
        return Err(ApiError::BadRequest("Answer is required".to_string()));
    }

    let sentiment = state.analyzer.compound(answer);
    let stored = db::insert_answer(
        &state.db,
        &request.question_id,
        &request.response_id,
        answer,
        sentiment,
    )
    .await?;
    info!(answer_id = %stored.id, question_id = %stored.question_id, "Answer stored");

    Ok(Json(SubmitAnswerResponse {
        message: "Answer submitted successfully".to_string(),
        sentiment,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnswersQuery {
    pub response_id: Option<String>,
}

/// GET /answers
pub async fn get_answers(
    State(state): State<AppState>,
    Query(query): Query<AnswersQuery>,
) -> ApiResult<Json<Vec<Answer>>> {
    let response_id = query.response_id.as_deref().filter(|id| !id.is_empty());
    let answers = db::list_answers(&state.db, response_id).await?;
    info!("Retrieved {} answers", answers.len());
    Ok(Json(answers))
}

pub fn question_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-questions", post(generate_questions))
        .route("/questions", get(get_questions))
        .route("/submit-answer", post(submit_answer))
        .route("/answers", get(get_answers))
}
