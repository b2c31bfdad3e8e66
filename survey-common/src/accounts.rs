//! Username/password accounts
//!
//! Passwords are stored as Argon2id PHC strings (salt embedded).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::{self, User};
use crate::validation::validate_credentials;
use crate::{Error, Result};

/// Message returned for any failed login, whether the user exists or not
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Hash a password with Argon2id and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

/// Check a password against a stored hash. A malformed hash is an error,
/// a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash format: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Run Argon2 work on the blocking pool so request tasks keep moving
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Internal(format!("Password task failed: {}", e)))?
}

/// Create an account
pub async fn register(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let username = validate_credentials(username, password).map_err(Error::InvalidInput)?;
    let password = password.to_string();
    let hash = run_blocking(move || hash_password(&password)).await?;
    let user = db::insert_user(pool, &username, &hash).await?;
    info!(username = %user.username, "Registered account");
    Ok(user)
}

/// Check credentials and return the account
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let username = validate_credentials(username, password).map_err(Error::InvalidInput)?;

    let Some(user) = db::find_user(pool, &username).await? else {
        warn!(username = %username, "Login attempt for unknown account");
        return Err(Error::NotFound(INVALID_CREDENTIALS.to_string()));
    };

    let password = password.to_string();
    let stored_hash = user.password_hash.clone();
    if !run_blocking(move || verify_password(&password, &stored_hash)).await? {
        warn!(username = %username, "Login attempt with wrong password");
        return Err(Error::NotFound(INVALID_CREDENTIALS.to_string()));
    }

    Ok(user)
}
