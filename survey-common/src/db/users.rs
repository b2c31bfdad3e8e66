//! Account queries

use sqlx::{Row, SqlitePool};

use super::models::User;
use crate::{time, uuid_utils, Error, Result};

/// Insert a user. A taken username yields `Error::Conflict`.
pub async fn insert_user(pool: &SqlitePool, username: &str, password_hash: &str) -> Result<User> {
    let user = User {
        guid: uuid_utils::new_id(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        created_at: time::now_rfc3339(),
    };

    let result = sqlx::query(
        "INSERT INTO users (guid, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&user.guid)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            Error::Conflict(format!("Username '{}' is already taken", username)),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Look up a user by exact username
pub async fn find_user(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT guid, username, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.map(|row| -> Result<User> {
        Ok(User {
            guid: row.try_get("guid")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_insert_then_find() {
        let pool = init_memory_database().await.unwrap();
        let user = insert_user(&pool, "ana", "hash").await.unwrap();

        let found = find_user(&pool, "ana").await.unwrap().unwrap();
        assert_eq!(found.guid, user.guid);
        assert_eq!(found.password_hash, "hash");

        assert!(find_user(&pool, "ben").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = init_memory_database().await.unwrap();
        insert_user(&pool, "ana", "hash").await.unwrap();

        let err = insert_user(&pool, "ana", "other").await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }
}
