//! Password hashing with bcrypt.
//!
//! bcrypt is CPU-bound, so the async wrappers move the work onto Tokio's
//! blocking pool instead of stalling a runtime worker.

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with the default bcrypt cost.
///
/// # Errors
///
/// Returns an error if bcrypt rejects the input or the blocking task fails.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST).await
}

pub(crate) async fn hash_password_with_cost(password: String, cost: u32) -> Result<String, PasswordError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
