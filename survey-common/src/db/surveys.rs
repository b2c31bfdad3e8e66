//! Survey and follow-up question queries

use sqlx::{Row, SqlitePool};

use super::models::{FollowUpQuestion, Survey};
use crate::{time, uuid_utils, Result};

/// Insert a survey and return it
pub async fn insert_survey(pool: &SqlitePool, title: &str) -> Result<Survey> {
    let survey = Survey {
        id: uuid_utils::new_id(),
        title: title.to_string(),
        created_at: time::now_rfc3339(),
    };

    sqlx::query("INSERT INTO surveys (guid, title, created_at) VALUES (?, ?, ?)")
        .bind(&survey.id)
        .bind(&survey.title)
        .bind(&survey.created_at)
        .execute(pool)
        .await?;

    Ok(survey)
}

/// All surveys, oldest first
pub async fn list_surveys(pool: &SqlitePool) -> Result<Vec<Survey>> {
    let rows = sqlx::query("SELECT guid, title, created_at FROM surveys ORDER BY created_at ASC")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| -> Result<Survey> {
            Ok(Survey {
                id: row.try_get("guid")?,
                title: row.try_get("title")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

/// Store generated questions for one response in a single transaction
pub async fn insert_questions(
    pool: &SqlitePool,
    survey_id: &str,
    response_id: &str,
    domain: &str,
    questions: &[String],
) -> Result<Vec<FollowUpQuestion>> {
    let mut tx = pool.begin().await?;
    let mut stored = Vec::with_capacity(questions.len());

    for text in questions {
        let question = FollowUpQuestion {
            id: uuid_utils::new_id(),
            survey_id: survey_id.to_string(),
            response_id: response_id.to_string(),
            domain: domain.to_string(),
            question: text.clone(),
            created_at: time::now_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO questions (guid, seq, survey_id, response_id, domain, question, created_at)
             VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM questions), ?, ?, ?, ?, ?)",
        )
        .bind(&question.id)
        .bind(&question.survey_id)
        .bind(&question.response_id)
        .bind(&question.domain)
        .bind(&question.question)
        .bind(&question.created_at)
        .execute(&mut *tx)
        .await?;

        stored.push(question);
    }

    tx.commit().await?;
    Ok(stored)
}

/// Questions in insertion order, optionally restricted to one survey
pub async fn list_questions(
    pool: &SqlitePool,
    survey_id: Option<&str>,
) -> Result<Vec<FollowUpQuestion>> {
    let rows = match survey_id {
        Some(id) => {
            sqlx::query(
                "SELECT guid, survey_id, response_id, domain, question, created_at
                 FROM questions WHERE survey_id = ? ORDER BY seq ASC",
            )
            .bind(id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                "SELECT guid, survey_id, response_id, domain, question, created_at
                 FROM questions ORDER BY seq ASC",
            )
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter()
        .map(|row| -> Result<FollowUpQuestion> {
            Ok(FollowUpQuestion {
                id: row.try_get("guid")?,
                survey_id: row.try_get("survey_id")?,
                response_id: row.try_get("response_id")?,
                domain: row.try_get("domain")?,
                question: row.try_get("question")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_insert_and_list_surveys() {
        let pool = init_memory_database().await.unwrap();

        let created = insert_survey(&pool, "Campus Wi-Fi").await.unwrap();
        let surveys = list_surveys(&pool).await.unwrap();

        assert_eq!(surveys.len(), 1);
        assert_eq!(surveys[0], created);
    }

    #[tokio::test]
    async fn test_questions_filter_by_survey_and_keep_order() {
        let pool = init_memory_database().await.unwrap();
        let questions = vec!["First?".to_string(), "Second?".to_string()];

        insert_questions(&pool, "s1", "r1", "education", &questions)
            .await
            .unwrap();
        insert_questions(&pool, "s2", "r2", "finance", &["Other?".to_string()])
            .await
            .unwrap();

        let all = list_questions(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let s1 = list_questions(&pool, Some("s1")).await.unwrap();
        let texts: Vec<_> = s1.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["First?", "Second?"]);
        assert!(s1.iter().all(|q| q.domain == "education"));
    }
}
