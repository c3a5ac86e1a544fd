//! `identity-password-hasher`: PBKDF2 password hashing in the ASP.NET Core
//! Identity payload formats.
//!
//! Produces and verifies Base64 hashes in the legacy V2 layout (HMAC-SHA1,
//! 1000 iterations) and the self-describing V3 layout (HMAC-SHA1/256/512,
//! configurable iterations). Verification reports when a stored hash is
//! weaker than the configured target so callers can transparently upgrade it.
//!
//! ```no_run
//! use identity_password_hasher::{PasswordHasher, PasswordVerificationResult};
//!
//! let hasher = PasswordHasher::default();
//! let stored = hasher.hash_password("correct horse").unwrap();
//! assert_eq!(
//!     hasher.verify_hashed_password(&stored, "correct horse"),
//!     PasswordVerificationResult::Success
//! );
//! ```
//!
//! Zero network, zero async, zero global state.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod kdf;

pub mod format;

pub mod random;

pub mod options;

pub mod hasher;

pub use error::HasherError;
pub use format::{
    CurrentPayload, HashedPassword, LegacyPayload, CURRENT_MARKER, LEGACY_MARKER,
    LEGACY_PAYLOAD_LEN, MIN_SALT_LEN, MIN_SUBKEY_LEN, SALT_LEN, SUBKEY_LEN,
};
pub use hasher::{PasswordHasher, PasswordVerificationResult};
pub use kdf::{KeyDerivationPrf, DEFAULT_ITERATIONS, LEGACY_ITERATIONS};
pub use options::{CompatibilityMode, HasherOptions};
pub use random::{OsRandom, RandomSource};
