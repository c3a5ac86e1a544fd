//! PBKDF2 key derivation with selectable HMAC pseudo-random functions.
//!
//! This module provides:
//! - [`KeyDerivationPrf`]: the PRF identifiers stored in current-format payloads
//! - [`derive`]: derive a subkey of arbitrary length from a password + salt
//!
//! The PRF ids are part of the wire format and must never be renumbered.

use std::num::NonZeroU32;

use ring::pbkdf2;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::HasherError;

/// Iteration count implied by legacy (format 0) payloads.
pub const LEGACY_ITERATIONS: u32 = 1000;

/// Default iteration count for current (format 1) payloads.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Pseudo-random function used inside PBKDF2.
///
/// Variants are declared weakest first, so `Ord` ranks them by strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyDerivationPrf {
    /// HMAC-SHA1 (wire id 0). Only for verifying old hashes.
    HmacSha1,
    /// HMAC-SHA256 (wire id 1).
    HmacSha256,
    /// HMAC-SHA512 (wire id 2).
    HmacSha512,
}

impl KeyDerivationPrf {
    /// Every supported PRF, weakest first.
    pub const ALL: [Self; 3] = [Self::HmacSha1, Self::HmacSha256, Self::HmacSha512];

    /// Strongest supported PRF.
    pub const STRONGEST: Self = Self::HmacSha512;

    /// Wire identifier stored in the current-format payload.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::HmacSha1 => 0,
            Self::HmacSha256 => 1,
            Self::HmacSha512 => 2,
        }
    }

    /// Look up a PRF by wire identifier.
    #[must_use]
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::HmacSha1),
            1 => Some(Self::HmacSha256),
            2 => Some(Self::HmacSha512),
            _ => None,
        }
    }

    /// Digest output length in bytes.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::HmacSha1 => 20,
            Self::HmacSha256 => 32,
            Self::HmacSha512 => 64,
        }
    }

    /// Map to the corresponding `ring::pbkdf2::Algorithm`.
    fn to_ring_algorithm(self) -> pbkdf2::Algorithm {
        match self {
            Self::HmacSha1 => pbkdf2::PBKDF2_HMAC_SHA1,
            Self::HmacSha256 => pbkdf2::PBKDF2_HMAC_SHA256,
            Self::HmacSha512 => pbkdf2::PBKDF2_HMAC_SHA512,
        }
    }
}

impl TryFrom<u32> for KeyDerivationPrf {
    type Error = HasherError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id)
            .ok_or_else(|| HasherError::Format(format!("unknown key derivation prf id {id}")))
    }
}

impl std::fmt::Display for KeyDerivationPrf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::HmacSha1 => "HMAC-SHA1",
            Self::HmacSha256 => "HMAC-SHA256",
            Self::HmacSha512 => "HMAC-SHA512",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Derive `output_len` bytes from a password and salt using PBKDF2.
///
/// The returned buffer is wiped when dropped. Salt length policy is enforced
/// by the payload layer, not here, so that known-answer vectors with short
/// salts can still be checked.
///
/// # Errors
///
/// Returns [`HasherError::KeyDerivation`] if:
/// - `iterations` is zero
/// - `output_len` is zero
/// - `output_len` exceeds the PBKDF2 block counter range for the chosen PRF
pub fn derive(
    prf: KeyDerivationPrf,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>, HasherError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| HasherError::KeyDerivation("iteration count must be non-zero".into()))?;

    if output_len == 0 {
        return Err(HasherError::KeyDerivation(
            "requested subkey length must be non-zero".into(),
        ));
    }

    // PBKDF2 numbers output blocks with a u32 counter.
    let max_len = usize::try_from(u32::MAX)
        .ok()
        .and_then(|blocks| blocks.checked_mul(prf.digest_len()))
        .unwrap_or(usize::MAX);
    if output_len > max_len {
        return Err(HasherError::KeyDerivation(format!(
            "requested subkey length {output_len} exceeds the {prf} limit"
        )));
    }

    let mut output = Zeroizing::new(vec![0u8; output_len]);
    pbkdf2::derive(
        prf.to_ring_algorithm(),
        iterations,
        salt,
        password,
        output.as_mut_slice(),
    );
    Ok(output)
}

/// Compare two byte strings without short-circuiting on the first difference.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// A length mismatch returns immediately; subkey lengths are recoverable from
/// the public payload, so only the contents need protecting.
#[must_use]
pub fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
