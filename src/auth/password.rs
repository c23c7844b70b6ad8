use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use super::AuthError;

/// Generates a new password hash using argon2.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Uses argon2 to verify the password against a stored PHC string.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    let hash = match PasswordHash::new(hashed) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!("failed to parse password hash: {}", err);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .is_ok()
}

/// `hash_password` on the blocking pool, so argon2 never stalls a runtime worker.
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}

/// `verify_password` on the blocking pool. A failed task counts as a mismatch.
pub async fn verify_password_blocking(password: String, hashed: String) -> bool {
    match tokio::task::spawn_blocking(move || verify_password(&password, &hashed)).await {
        Ok(valid) => valid,
        Err(err) => {
            tracing::error!("password verification task failed: {}", err);
            false
        }
    }
}
