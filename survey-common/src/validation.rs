//! Form field validation
//!
//! The same rules back the HTTP handlers and the terminal chatbot, so a
//! response rejected in one place is rejected everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::UserType;

pub const NAME_ERROR: &str = "Name must be at least 2 characters long.";
pub const AGE_ERROR: &str = "Age must be a number between 1 and 120.";
pub const RATING_ERROR: &str = "Rating must be between 1 and 5 stars.";
pub const USER_TYPE_ERROR: &str = "User type must be Student, Professional or Other.";
pub const FEEDBACK_ERROR: &str = "Feedback is required.";
pub const SURVEY_TITLE_ERROR: &str = "Survey title is required.";
pub const CREDENTIALS_ERROR: &str = "Username and password are required.";

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Which form field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Age,
    Rating,
    UserType,
    Feedback,
}

/// One failed field with the message shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Name must have at least two characters once surrounding whitespace is removed
pub fn validate_name(value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_NAME_CHARS {
        return Err(FieldError::new(Field::Name, NAME_ERROR));
    }
    Ok(trimmed.to_string())
}

/// Age arrives as text (form input); it must be an integer in 1..=120
pub fn validate_age(value: &str) -> Result<i64, FieldError> {
    match value.trim().parse::<i64>() {
        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(age),
        _ => Err(FieldError::new(Field::Age, AGE_ERROR)),
    }
}

pub fn validate_rating(value: i64) -> Result<i64, FieldError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(FieldError::new(Field::Rating, RATING_ERROR))
    }
}

pub fn parse_user_type(value: &str) -> Result<UserType, FieldError> {
    value
        .parse()
        .map_err(|_| FieldError::new(Field::UserType, USER_TYPE_ERROR))
}

pub fn validate_feedback(value: &str) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(Field::Feedback, FEEDBACK_ERROR));
    }
    Ok(value.to_string())
}

pub fn validate_survey_title(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SURVEY_TITLE_ERROR.to_string());
    }
    Ok(trimmed.to_string())
}

/// Both username and password must be non-blank. Returns the trimmed username.
pub fn validate_credentials(username: &str, password: &str) -> Result<String, String> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(CREDENTIALS_ERROR.to_string());
    }
    Ok(username.to_string())
}

/// Raw form values as typed by the respondent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDraft {
    pub name: String,
    pub age: String,
    pub feedback: String,
    /// 0 means "no star selected yet"
    pub rating: i64,
    pub user_type: String,
}

/// A draft that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidResponse {
    pub name: String,
    pub age: i64,
    pub feedback: String,
    pub rating: i64,
    pub user_type: UserType,
}

impl ResponseDraft {
    /// Check every field, reporting all failures rather than the first
    pub fn validate(&self) -> Result<ValidResponse, Vec<FieldError>> {
        let name = validate_name(&self.name);
        let age = validate_age(&self.age);
        let rating = validate_rating(self.rating);
        let user_type = parse_user_type(&self.user_type);
        let feedback = validate_feedback(&self.feedback);

        match (name, age, rating, user_type, feedback) {
            (Ok(name), Ok(age), Ok(rating), Ok(user_type), Ok(feedback)) => Ok(ValidResponse {
                name,
                age,
                feedback,
                rating,
                user_type,
            }),
            (name, age, rating, user_type, feedback) => {
                let mut errors = Vec::new();
                errors.extend(name.err());
                errors.extend(age.err());
                errors.extend(rating.err());
                errors.extend(user_type.err());
                errors.extend(feedback.err());
                Err(errors)
            }
        }
    }
}

/// Join field errors into one message for an error body
pub fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ResponseDraft {
        ResponseDraft {
            name: "Ana".to_string(),
            age: "34".to_string(),
            feedback: "Checkout was quick".to_string(),
            rating: 4,
            user_type: "Professional".to_string(),
        }
    }

    #[test]
    fn test_name_length_boundary() {
        assert!(validate_name("A").is_err());
        assert!(validate_name("  A  ").is_err());
        assert_eq!(validate_name(" Al ").unwrap(), "Al");
        // Counted in characters, not bytes
        assert!(validate_name("É").is_err());
        assert!(validate_name("Éa").is_ok());
    }

    #[test]
    fn test_age_range_boundaries() {
        assert!(validate_age("0").is_err());
        assert_eq!(validate_age("1").unwrap(), 1);
        assert_eq!(validate_age("120").unwrap(), 120);
        assert!(validate_age("121").is_err());
        assert!(validate_age("abc").is_err());
        assert!(validate_age("").is_err());
        assert_eq!(validate_age(" 42 ").unwrap(), 42);
    }

    #[test]
    fn test_age_error_message() {
        assert_eq!(validate_age("-3").unwrap_err().message, AGE_ERROR);
    }

    #[test]
    fn test_rating_range() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        for star in 1..=5 {
            assert_eq!(validate_rating(star).unwrap(), star);
        }
    }

    #[test]
    fn test_survey_title_and_credentials() {
        assert_eq!(validate_survey_title("   ").unwrap_err(), SURVEY_TITLE_ERROR);
        assert_eq!(validate_survey_title(" Q3 ").unwrap(), "Q3");

        assert!(validate_credentials("ana", " ").is_err());
        assert!(validate_credentials("", "pw").is_err());
        assert_eq!(validate_credentials(" ana ", "pw").unwrap(), "ana");
    }

    #[test]
    fn test_valid_draft_passes() {
        let valid = valid_draft().validate().unwrap();
        assert_eq!(valid.age, 34);
        assert_eq!(valid.user_type, UserType::Professional);
    }

    #[test]
    fn test_draft_reports_every_failing_field() {
        let draft = ResponseDraft {
            name: "A".to_string(),
            age: "200".to_string(),
            feedback: " ".to_string(),
            rating: 0,
            user_type: String::new(),
        };

        let errors = draft.validate().unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::Name, Field::Age, Field::Rating, Field::UserType, Field::Feedback]
        );
        assert!(summarize(&errors).starts_with(NAME_ERROR));
    }
}
