//! survey-server library
//!
//! HTTP service for survey responses, sentiment scoring, follow-up
//! questions, analytics, CSV export and accounts.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use survey_common::SentimentAnalyzer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod chart;
pub mod error;
pub mod export;
pub mod generator;

use generator::QuestionGenerator;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub generator: Arc<dyn QuestionGenerator>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self {
            db,
            analyzer: Arc::new(SentimentAnalyzer::new()),
            generator,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::survey_routes())
        .merge(api::response_routes())
        .merge(api::question_routes())
        .merge(api::dashboard_routes())
        .merge(api::account_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Frontend is served from another origin
        .layer(CorsLayer::permissive())
}
