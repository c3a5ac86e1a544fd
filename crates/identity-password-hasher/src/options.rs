//! Hasher configuration: compatibility mode, iteration count, PRF.
//!
//! Options are plain serde data so they can live in an application's config
//! file. Validation happens once, when a [`PasswordHasher`](crate::PasswordHasher)
//! is built; an invalid configuration never reaches `hash_password`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HasherError;
use crate::kdf::{KeyDerivationPrf, DEFAULT_ITERATIONS};

/// Which payload format `hash_password` produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityMode {
    /// Legacy format 0: PBKDF2-HMAC-SHA1, 1000 iterations.
    #[serde(alias = "legacy")]
    V2,
    /// Current format 1: configurable PRF and iteration count.
    #[default]
    #[serde(alias = "current")]
    V3,
}

impl FromStr for CompatibilityMode {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v2" | "legacy" => Ok(Self::V2),
            "v3" | "current" => Ok(Self::V3),
            other => Err(HasherError::InvalidConfiguration(format!(
                "unknown compatibility mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        })
    }
}

/// Password hasher configuration.
///
/// `iteration_count` and `prf` only affect hashes produced in
/// [`CompatibilityMode::V3`], but the iteration count is validated in every mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HasherOptions {
    /// Output format.
    pub compatibility_mode: CompatibilityMode,
    /// PBKDF2 iteration count for current-format hashes. Must be at least 1.
    pub iteration_count: u32,
    /// PRF for current-format hashes. Also the rehash threshold: a verified
    /// hash using a weaker PRF is flagged for rehash.
    pub prf: KeyDerivationPrf,
}

impl Default for HasherOptions {
    fn default() -> Self {
        Self {
            compatibility_mode: CompatibilityMode::V3,
            iteration_count: DEFAULT_ITERATIONS,
            prf: KeyDerivationPrf::STRONGEST,
        }
    }
}

impl HasherOptions {
    /// Parse options from a JSON document and validate them.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::InvalidConfiguration`] if the document does not
    /// parse (unknown mode, negative or oversized iteration count, unknown
    /// field) or fails [`HasherOptions::validate`].
    pub fn from_json(json: &str) -> Result<Self, HasherError> {
        let options: Self = serde_json::from_str(json).map_err(|e| {
            HasherError::InvalidConfiguration(format!("invalid options document: {e}"))
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the options describe a usable hasher.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::InvalidConfiguration`] if the iteration count is zero.
    pub fn validate(&self) -> Result<(), HasherError> {
        if self.iteration_count < 1 {
            return Err(HasherError::InvalidConfiguration(
                "iteration count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Set the compatibility mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: CompatibilityMode) -> Self {
        self.compatibility_mode = mode;
        self
    }

    /// Set the iteration count.
    #[must_use]
    pub const fn with_iteration_count(mut self, iteration_count: u32) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    /// Set the PRF.
    #[must_use]
    pub const fn with_prf(mut self, prf: KeyDerivationPrf) -> Self {
        self.prf = prf;
        self
    }
}
