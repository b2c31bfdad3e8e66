//! # SurveyPro Common Library
//!
//! Shared code for the SurveyPro service and its terminal client:
//! - Database models, schema and queries
//! - Configuration loading
//! - Form validation rules
//! - Sentiment scoring and analytics aggregation
//! - Feedback history sorting/filtering
//! - The scripted survey chatbot

pub mod accounts;
pub mod analytics;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod sentiment;
pub mod time;
pub mod uuid_utils;
pub mod validation;

pub use error::{Error, Result};
pub use sentiment::{SentimentAnalyzer, SentimentLabel};
