//! Error types for `identity-password-hasher`.

use thiserror::Error;

/// Errors produced while configuring the hasher or handling hash payloads.
///
/// [`PasswordHasher::verify_hashed_password`](crate::PasswordHasher::verify_hashed_password)
/// never surfaces these: every failure on that path is reported as
/// [`PasswordVerificationResult::Failed`](crate::PasswordVerificationResult::Failed).
#[derive(Debug, Error)]
pub enum HasherError {
    /// Invalid compatibility mode, iteration count, or options document.
    #[error("invalid password hasher configuration: {0}")]
    InvalidConfiguration(String),

    /// The injected random source could not produce salt bytes.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// Hash payload is malformed (bad length, unknown marker, bad field values, bad Base64).
    #[error("hash format error: {0}")]
    Format(String),

    /// PBKDF2 parameters rejected (zero iterations, empty output).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
}
