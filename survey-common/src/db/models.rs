//! Database models
//!
//! Serialized field names match the web client's JSON (`_id`, `userType`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Respondent category offered by the survey form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    Student,
    Professional,
    Other,
}

impl UserType {
    /// All user types in display order
    pub const ALL: [UserType; 3] = [UserType::Student, UserType::Professional, UserType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "Student",
            UserType::Professional => "Professional",
            UserType::Other => "Other",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Student" => Ok(UserType::Student),
            "Professional" => Ok(UserType::Professional),
            "Other" => Ok(UserType::Other),
            other => Err(format!(
                "Unknown user type '{}' (expected Student, Professional or Other)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub created_at: String,
}

/// One submitted feedback form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: i64,
    pub feedback: String,
    pub rating: i64,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    pub survey_id: Option<String>,
    /// Compound polarity in [-1, 1]
    pub sentiment: f64,
    pub emotion: BTreeMap<String, f64>,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Values for a response that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewResponse {
    pub name: String,
    pub age: i64,
    pub feedback: String,
    pub rating: i64,
    pub user_type: UserType,
    pub survey_id: Option<String>,
    pub sentiment: f64,
    pub emotion: BTreeMap<String, f64>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub survey_id: String,
    pub response_id: String,
    pub domain: String,
    pub question: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "_id")]
    pub id: String,
    pub question_id: String,
    pub response_id: String,
    pub answer: String,
    pub sentiment: f64,
    pub timestamp: String,
}

/// Account record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub guid: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}
