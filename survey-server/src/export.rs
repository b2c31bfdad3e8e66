//! CSV export of stored responses

use survey_common::db::SurveyResponse;

/// Column headers, in output order
pub const CSV_COLUMNS: [&str; 8] = [
    "name",
    "age",
    "feedback",
    "rating",
    "userType",
    "survey_id",
    "sentiment",
    "timestamp",
];

pub const CSV_FILENAME: &str = "survey_responses.csv";

/// Render responses as CSV with a header row
pub fn responses_to_csv(responses: &[SurveyResponse]) -> String {
    let mut csv = CSV_COLUMNS.join(",");
    csv.push('\n');

    for response in responses {
        let fields = [
            response.name.clone(),
            response.age.to_string(),
            response.feedback.clone(),
            response.rating.to_string(),
            response.user_type.to_string(),
            response.survey_id.clone().unwrap_or_default(),
            response.sentiment.to_string(),
            response.timestamp.clone(),
        ];

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                csv.push(',');
            }
            push_field(&mut csv, field);
        }
        csv.push('\n');
    }

    csv
}

fn push_field(csv: &mut String, value: &str) {
    if value.contains([',', '"', '\n', '\r']) {
        csv.push('"');
        csv.push_str(&value.replace('"', "\"\""));
        csv.push('"');
    } else {
        csv.push_str(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use survey_common::db::UserType;

    fn response(name: &str, feedback: &str, survey_id: Option<&str>) -> SurveyResponse {
        SurveyResponse {
            id: "r1".to_string(),
            name: name.to_string(),
            age: 34,
            feedback: feedback.to_string(),
            rating: 4,
            user_type: UserType::Professional,
            survey_id: survey_id.map(str::to_string),
            sentiment: 0.6249,
            emotion: BTreeMap::new(),
            timestamp: "2024-05-01T12:00:00.000000Z".to_string(),
            username: None,
        }
    }

    #[test]
    fn test_header_only_for_empty_input() {
        assert_eq!(
            responses_to_csv(&[]),
            "name,age,feedback,rating,userType,survey_id,sentiment,timestamp\n"
        );
    }

    #[test]
    fn test_plain_row() {
        let csv = responses_to_csv(&[response("Ana", "Good service", Some("s1"))]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Ana,34,Good service,4,Professional,s1,0.6249,2024-05-01T12:00:00.000000Z"
        );
    }

    #[test]
    fn test_special_characters_are_quoted() {
        let csv = responses_to_csv(&[response("Ana, PhD", "She said \"wow\"\nthen left", None)]);
        assert!(csv.contains("\"Ana, PhD\",34,\"She said \"\"wow\"\"\nthen left\",4,Professional,,0.6249"));
    }
}
