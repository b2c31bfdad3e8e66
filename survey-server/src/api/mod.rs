//! HTTP API handlers for survey-server

pub mod accounts;
pub mod dashboard;
pub mod health;
pub mod questions;
pub mod responses;
pub mod surveys;

pub use accounts::account_routes;
pub use dashboard::dashboard_routes;
pub use health::health_routes;
pub use questions::question_routes;
pub use responses::response_routes;
pub use surveys::survey_routes;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::error::ApiError;

/// JSON request body whose parse failures answer with the API error shape
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// Deserialize `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Form value the frontend may send as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Text(String::new())
    }
}

impl FormValue {
    /// Text as the respondent would have typed it
    pub fn as_text(&self) -> String {
        match self {
            FormValue::Integer(n) => n.to_string(),
            FormValue::Float(f) => f.to_string(),
            FormValue::Text(s) => s.clone(),
        }
    }

    /// Whole number, or 0 when absent or not a whole number
    pub fn as_integer(&self) -> i64 {
        match self {
            FormValue::Integer(n) => *n,
            FormValue::Float(_) => 0,
            FormValue::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// Treat a missing or blank optional string as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
