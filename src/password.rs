//! One-way credential hashing (Argon2id, PHC string output).
//!
//! No inverse exists; the only companion operation is
//! [`verify_password`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::error::CatalogError;

/// Hash a plaintext secret with a fresh random salt and the default work factor.
///
/// # Errors
///
/// Returns `CatalogError::Validation` for an empty plaintext and
/// `CatalogError::PasswordHash` if Argon2 fails.
pub fn hash_password(password: &str) -> Result<String, CatalogError> {
    if password.is_empty() {
        return Err(CatalogError::Validation(
            "password must not be empty".to_string(),
        ));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Hash on the blocking pool; Argon2 is CPU-bound by construction.
pub async fn hash_password_blocking(password: String) -> Result<String, CatalogError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CatalogError::PasswordHash(format!("hash task failed: {e}")))?
}

/// Check a plaintext against a stored PHC hash.
///
/// # Errors
///
/// Returns `CatalogError::PasswordHash` if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CatalogError> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
