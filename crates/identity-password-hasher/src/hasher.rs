//! Password hashing and verification.
//!
//! [`PasswordHasher::hash_password`] produces Base64 text in the configured
//! format. [`PasswordHasher::verify_hashed_password`] accepts either format,
//! re-derives with the parameters stored in the payload, and reports whether
//! the hash should be upgraded to the configured parameters.
//!
//! # Failure folding
//!
//! Verification has no error channel. Bad Base64, unknown markers, bad
//! lengths, unknown PRFs and wrong passwords all come back as
//! [`PasswordVerificationResult::Failed`], so callers cannot tell a corrupted
//! hash from a wrong password. The reason is emitted at `trace` level only.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::HasherError;
use crate::format::{CurrentPayload, HashedPassword, LegacyPayload, SALT_LEN, SUBKEY_LEN};
use crate::kdf::{self, KeyDerivationPrf, LEGACY_ITERATIONS};
use crate::options::{CompatibilityMode, HasherOptions};
use crate::random::{OsRandom, RandomSource};

/// Outcome of [`PasswordHasher::verify_hashed_password`].
#[must_use = "verification outcome must be checked"]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordVerificationResult {
    /// Password did not match, or the stored hash was unusable.
    Failed,
    /// Password matched and the hash meets the configured parameters.
    Success,
    /// Password matched but the hash should be recomputed and stored again.
    SuccessRehashNeeded,
}

impl PasswordVerificationResult {
    /// `true` for both success variants.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::SuccessRehashNeeded)
    }

    /// `true` only for [`PasswordVerificationResult::SuccessRehashNeeded`].
    #[must_use]
    pub const fn needs_rehash(self) -> bool {
        matches!(self, Self::SuccessRehashNeeded)
    }
}

/// PBKDF2 password hasher producing identity-compatible payloads.
///
/// Cheap to clone; clones share the random source.
#[derive(Clone)]
pub struct PasswordHasher {
    options: HasherOptions,
    rng: Arc<dyn RandomSource>,
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for PasswordHasher {
    /// Current format, 100 000 iterations, HMAC-SHA512, OS randomness.
    fn default() -> Self {
        Self {
            options: HasherOptions::default(),
            rng: Arc::new(OsRandom),
        }
    }
}

impl PasswordHasher {
    /// Build a hasher with an injected random source.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::InvalidConfiguration`] if `options` fail validation.
    pub fn new(options: HasherOptions, rng: Arc<dyn RandomSource>) -> Result<Self, HasherError> {
        options.validate()?;
        tracing::debug!(
            mode = %options.compatibility_mode,
            iteration_count = options.iteration_count,
            prf = %options.prf,
            "password hasher configured"
        );
        Ok(Self { options, rng })
    }

    /// Build a hasher drawing salts from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::InvalidConfiguration`] if `options` fail validation.
    pub fn with_options(options: HasherOptions) -> Result<Self, HasherError> {
        Self::new(options, Arc::new(OsRandom))
    }

    /// Active configuration.
    #[must_use]
    pub const fn options(&self) -> &HasherOptions {
        &self.options
    }

    /// Hash `password` in the configured format and return Base64 text.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::RandomSource`] if the random source fails, or
    /// [`HasherError::KeyDerivation`] if PBKDF2 rejects the parameters (not
    /// reachable with validated options).
    pub fn hash_password(&self, password: impl AsRef<[u8]>) -> Result<String, HasherError> {
        let hashed = self.hash_password_payload(password.as_ref())?;
        Ok(hashed.to_base64())
    }

    /// Hash `password` in the configured format and return the decoded payload.
    ///
    /// # Errors
    ///
    /// Same as [`PasswordHasher::hash_password`].
    pub fn hash_password_payload(&self, password: &[u8]) -> Result<HashedPassword, HasherError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt)?;

        match self.options.compatibility_mode {
            CompatibilityMode::V2 => {
                let derived = kdf::derive(
                    KeyDerivationPrf::HmacSha1,
                    password,
                    &salt,
                    LEGACY_ITERATIONS,
                    SUBKEY_LEN,
                )?;
                let mut subkey = [0u8; SUBKEY_LEN];
                subkey.copy_from_slice(&derived);
                Ok(LegacyPayload::new(salt, subkey).into())
            }
            CompatibilityMode::V3 => {
                let subkey = kdf::derive(
                    self.options.prf,
                    password,
                    &salt,
                    self.options.iteration_count,
                    SUBKEY_LEN,
                )?;
                let payload = CurrentPayload::new(
                    self.options.prf,
                    self.options.iteration_count,
                    salt.to_vec(),
                    subkey.to_vec(),
                )?;
                Ok(payload.into())
            }
        }
    }

    /// Check `provided_password` against a Base64 hash.
    ///
    /// Never fails: every malformed input maps to
    /// [`PasswordVerificationResult::Failed`].
    pub fn verify_hashed_password(
        &self,
        hashed_password: &str,
        provided_password: impl AsRef<[u8]>,
    ) -> PasswordVerificationResult {
        match self.try_verify(hashed_password, provided_password.as_ref()) {
            Ok(result) => result,
            Err(e) => {
                tracing::trace!(reason = %e, "rejected stored password hash");
                PasswordVerificationResult::Failed
            }
        }
    }

    /// Check `provided_password` against an already decoded payload.
    pub fn verify_hashed_payload(
        &self,
        hashed: &HashedPassword,
        provided_password: impl AsRef<[u8]>,
    ) -> PasswordVerificationResult {
        match hashed.matches(provided_password.as_ref()) {
            Ok(true) => self.classify_match(hashed),
            Ok(false) => PasswordVerificationResult::Failed,
            Err(e) => {
                tracing::trace!(reason = %e, "rejected stored password hash");
                PasswordVerificationResult::Failed
            }
        }
    }

    fn try_verify(
        &self,
        hashed_password: &str,
        provided_password: &[u8],
    ) -> Result<PasswordVerificationResult, HasherError> {
        let hashed = HashedPassword::decode_base64(hashed_password)?;
        if hashed.matches(provided_password)? {
            Ok(self.classify_match(&hashed))
        } else {
            Ok(PasswordVerificationResult::Failed)
        }
    }

    /// Decide between `Success` and `SuccessRehashNeeded` for a matched hash.
    fn classify_match(&self, hashed: &HashedPassword) -> PasswordVerificationResult {
        let rehash = match (self.options.compatibility_mode, hashed) {
            (CompatibilityMode::V2, HashedPassword::Legacy(_)) => false,
            // A V2 instance cannot produce format 1, but the caller should
            // still learn that an upgrade exists.
            (CompatibilityMode::V2, HashedPassword::Current(_)) => true,
            (CompatibilityMode::V3, HashedPassword::Legacy(_)) => true,
            (CompatibilityMode::V3, HashedPassword::Current(p)) => {
                p.iteration_count() < self.options.iteration_count || p.prf() < self.options.prf
            }
        };

        if rehash {
            tracing::debug!(
                stored_prf = %hashed.prf(),
                stored_iterations = hashed.iteration_count(),
                "password hash flagged for rehash"
            );
            PasswordVerificationResult::SuccessRehashNeeded
        } else {
            PasswordVerificationResult::Success
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
