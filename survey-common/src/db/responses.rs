//! Response and answer queries

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;

use super::models::{Answer, NewResponse, SurveyResponse, UserType};
use crate::{time, uuid_utils, Error, Result};

const RESPONSE_COLUMNS: &str =
    "guid, name, age, feedback, rating, user_type, survey_id, sentiment, emotion, username, created_at";

/// Insert a response and return the stored record
pub async fn insert_response(pool: &SqlitePool, new: NewResponse) -> Result<SurveyResponse> {
    let emotion_json = serde_json::to_string(&new.emotion)
        .map_err(|e| Error::Internal(format!("Failed to encode emotion map: {}", e)))?;

    let response = SurveyResponse {
        id: uuid_utils::new_id(),
        name: new.name,
        age: new.age,
        feedback: new.feedback,
        rating: new.rating,
        user_type: new.user_type,
        survey_id: new.survey_id,
        sentiment: new.sentiment,
        emotion: new.emotion,
        timestamp: time::now_rfc3339(),
        username: new.username,
    };

    sqlx::query(
        "INSERT INTO responses
            (guid, seq, name, age, feedback, rating, user_type, survey_id, sentiment, emotion, username, created_at)
         VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM responses), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&response.id)
    .bind(&response.name)
    .bind(response.age)
    .bind(&response.feedback)
    .bind(response.rating)
    .bind(response.user_type.as_str())
    .bind(&response.survey_id)
    .bind(response.sentiment)
    .bind(&emotion_json)
    .bind(&response.username)
    .bind(&response.timestamp)
    .execute(pool)
    .await?;

    Ok(response)
}

/// All responses in insertion order
pub async fn list_responses(pool: &SqlitePool) -> Result<Vec<SurveyResponse>> {
    let sql = format!("SELECT {} FROM responses ORDER BY seq ASC", RESPONSE_COLUMNS);
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter().map(response_from_row).collect()
}

/// Responses submitted while logged in as `username`
pub async fn list_responses_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<SurveyResponse>> {
    let sql = format!(
        "SELECT {} FROM responses WHERE username = ? ORDER BY seq ASC",
        RESPONSE_COLUMNS
    );
    let rows = sqlx::query(&sql).bind(username).fetch_all(pool).await?;
    rows.iter().map(response_from_row).collect()
}

fn response_from_row(row: &SqliteRow) -> Result<SurveyResponse> {
    let user_type: String = row.try_get("user_type")?;
    let user_type: UserType = user_type.parse().map_err(Error::Internal)?;

    // A corrupt emotion column should not hide the rest of the row
    let emotion_json: String = row.try_get("emotion")?;
    let emotion: BTreeMap<String, f64> = serde_json::from_str(&emotion_json).unwrap_or_default();

    Ok(SurveyResponse {
        id: row.try_get("guid")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        feedback: row.try_get("feedback")?,
        rating: row.try_get("rating")?,
        user_type,
        survey_id: row.try_get("survey_id")?,
        sentiment: row.try_get("sentiment")?,
        emotion,
        timestamp: row.try_get("created_at")?,
        username: row.try_get("username")?,
    })
}

/// Insert an answer to a follow-up question
pub async fn insert_answer(
    pool: &SqlitePool,
    question_id: &str,
    response_id: &str,
    answer: &str,
    sentiment: f64,
) -> Result<Answer> {
    let stored = Answer {
        id: uuid_utils::new_id(),
        question_id: question_id.to_string(),
        response_id: response_id.to_string(),
        answer: answer.to_string(),
        sentiment,
        timestamp: time::now_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO answers (guid, seq, question_id, response_id, answer, sentiment, created_at)
         VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM answers), ?, ?, ?, ?, ?)",
    )
    .bind(&stored.id)
    .bind(&stored.question_id)
    .bind(&stored.response_id)
    .bind(&stored.answer)
    .bind(stored.sentiment)
    .bind(&stored.timestamp)
    .execute(pool)
    .await?;

    Ok(stored)
}

/// Answers in insertion order, optionally restricted to one response
pub async fn list_answers(pool: &SqlitePool, response_id: Option<&str>) -> Result<Vec<Answer>> {
    let rows = match response_id {
        Some(id) => {
            sqlx::query(
                "SELECT guid, question_id, response_id, answer, sentiment, created_at
                 FROM answers WHERE response_id = ? ORDER BY seq ASC",
            )
            .bind(id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                "SELECT guid, question_id, response_id, answer, sentiment, created_at
                 FROM answers ORDER BY seq ASC",
            )
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter()
        .map(|row| -> Result<Answer> {
            Ok(Answer {
                id: row.try_get("guid")?,
                question_id: row.try_get("question_id")?,
                response_id: row.try_get("response_id")?,
                answer: row.try_get("answer")?,
                sentiment: row.try_get("sentiment")?,
                timestamp: row.try_get("created_at")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn new_response(name: &str, username: Option<&str>) -> NewResponse {
        let mut emotion = BTreeMap::new();
        emotion.insert("joy".to_string(), 1.0);
        NewResponse {
            name: name.to_string(),
            age: 27,
            feedback: "Lovely staff".to_string(),
            rating: 4,
            user_type: UserType::Student,
            survey_id: Some("s1".to_string()),
            sentiment: 0.58,
            emotion,
            username: username.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_response_round_trips_through_database() {
        let pool = init_memory_database().await.unwrap();

        let stored = insert_response(&pool, new_response("Ana", None)).await.unwrap();
        let listed = list_responses(&pool).await.unwrap();

        assert_eq!(listed, vec![stored]);
        assert_eq!(listed[0].emotion.get("joy"), Some(&1.0));
    }

    #[tokio::test]
    async fn test_responses_by_username() {
        let pool = init_memory_database().await.unwrap();
        insert_response(&pool, new_response("Ana", Some("ana"))).await.unwrap();
        insert_response(&pool, new_response("Ben", Some("ben"))).await.unwrap();
        insert_response(&pool, new_response("Anon", None)).await.unwrap();

        let ana = list_responses_by_username(&pool, "ana").await.unwrap();
        assert_eq!(ana.len(), 1);
        assert_eq!(ana[0].name, "Ana");

        let nobody = list_responses_by_username(&pool, "carol").await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected_by_schema() {
        let pool = init_memory_database().await.unwrap();
        let mut bad = new_response("Ana", None);
        bad.rating = 9;

        let err = insert_response(&pool, bad).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn test_answers_filter_by_response() {
        let pool = init_memory_database().await.unwrap();
        insert_answer(&pool, "q1", "r1", "Yes", 0.4).await.unwrap();
        insert_answer(&pool, "q2", "r1", "No", -0.3).await.unwrap();
        insert_answer(&pool, "q3", "r2", "Maybe", 0.0).await.unwrap();

        assert_eq!(list_answers(&pool, None).await.unwrap().len(), 3);

        let r1 = list_answers(&pool, Some("r1")).await.unwrap();
        let ids: Vec<_> = r1.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }
}
