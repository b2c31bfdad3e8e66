//! Feedback history filtering and sorting

use serde::Deserialize;
use std::cmp::Ordering;

use crate::db::SurveyResponse;
use crate::time::parse_timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Timestamp,
    Age,
    Rating,
    Sentiment,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// History view settings. Defaults to newest first, no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryQuery {
    /// Case-insensitive substring matched against the respondent name
    #[serde(default, rename = "name")]
    pub name_filter: Option<String>,
    #[serde(default, rename = "sort")]
    pub sort_field: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

/// Filter by name, then stable-sort on the chosen field
pub fn apply(mut responses: Vec<SurveyResponse>, query: &HistoryQuery) -> Vec<SurveyResponse> {
    if let Some(filter) = query.name_filter.as_deref().filter(|f| !f.is_empty()) {
        let needle = filter.to_lowercase();
        responses.retain(|r| r.name.to_lowercase().contains(&needle));
    }

    responses.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_field);
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    responses
}

fn compare(a: &SurveyResponse, b: &SurveyResponse, field: SortField) -> Ordering {
    match field {
        // Unparsable timestamps sort before every real one
        SortField::Timestamp => parse_timestamp(&a.timestamp).cmp(&parse_timestamp(&b.timestamp)),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Rating => a.rating.cmp(&b.rating),
        SortField::Sentiment => a.sentiment.total_cmp(&b.sentiment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::UserType;
    use std::collections::BTreeMap;

    fn response(name: &str, age: i64, rating: i64, sentiment: f64, ts: &str) -> SurveyResponse {
        SurveyResponse {
            id: name.to_string(),
            name: name.to_string(),
            age,
            feedback: String::new(),
            rating,
            user_type: UserType::Student,
            survey_id: None,
            sentiment,
            emotion: BTreeMap::new(),
            timestamp: ts.to_string(),
            username: None,
        }
    }

    fn sample() -> Vec<SurveyResponse> {
        vec![
            response("Alice", 30, 4, 0.5, "2024-03-01T10:00:00Z"),
            response("bob", 22, 2, -0.4, "2024-03-03T10:00:00Z"),
            response("Malik", 41, 5, 0.9, "2024-03-02T10:00:00Z"),
            response("Alina", 22, 3, 0.0, "2024-03-04T10:00:00Z"),
        ]
    }

    fn names(responses: &[SurveyResponse]) -> Vec<&str> {
        responses.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let sorted = apply(sample(), &HistoryQuery::default());
        assert_eq!(names(&sorted), vec!["Alina", "bob", "Malik", "Alice"]);
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let query = HistoryQuery {
            name_filter: Some("ALI".to_string()),
            ..Default::default()
        };
        let filtered = apply(sample(), &query);
        assert_eq!(names(&filtered), vec!["Alina", "Malik", "Alice"]);
    }

    #[test]
    fn test_sort_by_age_ascending_is_stable() {
        let query = HistoryQuery {
            sort_field: SortField::Age,
            order: SortOrder::Asc,
            ..Default::default()
        };
        let sorted = apply(sample(), &query);
        // bob and Alina tie on age and keep their input order
        assert_eq!(names(&sorted), vec!["bob", "Alina", "Alice", "Malik"]);
    }

    #[test]
    fn test_sort_by_rating_and_sentiment_desc() {
        let by_rating = HistoryQuery {
            sort_field: SortField::Rating,
            ..Default::default()
        };
        assert_eq!(names(&apply(sample(), &by_rating)), vec!["Malik", "Alice", "Alina", "bob"]);

        let by_sentiment = HistoryQuery {
            sort_field: SortField::Sentiment,
            ..Default::default()
        };
        assert_eq!(names(&apply(sample(), &by_sentiment)), vec!["Malik", "Alice", "Alina", "bob"]);
    }

    #[test]
    fn test_query_deserializes_from_url_params() {
        let query: HistoryQuery =
            serde_json::from_str(r#"{"name":"al","sort":"rating","order":"asc"}"#).unwrap();
        assert_eq!(query.name_filter.as_deref(), Some("al"));
        assert_eq!(query.sort_field, SortField::Rating);
        assert_eq!(query.order, SortOrder::Asc);
    }
}
