//! Binary hash payloads: legacy (format 0) and current (format 1).
//!
//! This module provides:
//! - [`HashedPassword`]: tagged union over the two payload layouts
//! - [`LegacyPayload`]: fixed PBKDF2-HMAC-SHA1 / 1000 iteration layout
//! - [`CurrentPayload`]: self-describing layout carrying PRF, iterations and salt length
//!
//! # Layouts
//!
//! ```text
//! format 0: 0x00 | salt (16 B) | subkey (32 B)
//! format 1: 0x01 | prf (u32 BE) | iterations (u32 BE) | salt len (u32 BE) | salt | subkey
//! ```
//!
//! The text transport is standard padded Base64. Decoding is strict: wrong
//! alphabet, missing padding, whitespace and non-zero trailing bits are all
//! rejected.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::HasherError;
use crate::kdf::{self, KeyDerivationPrf, LEGACY_ITERATIONS};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Leading byte of a legacy payload.
pub const LEGACY_MARKER: u8 = 0x00;

/// Leading byte of a current payload.
pub const CURRENT_MARKER: u8 = 0x01;

/// Salt length produced by [`PasswordHasher`](crate::PasswordHasher) (128 bits).
pub const SALT_LEN: usize = 16;

/// Subkey length produced by [`PasswordHasher`](crate::PasswordHasher) (256 bits).
pub const SUBKEY_LEN: usize = 32;

/// Smallest salt accepted in a current payload (128 bits).
pub const MIN_SALT_LEN: usize = 16;

/// Smallest subkey accepted in a current payload (128 bits).
pub const MIN_SUBKEY_LEN: usize = 16;

/// Length of the marker byte.
const MARKER_LEN: usize = 1;

/// Length of a big-endian u32 field.
const U32_LEN: usize = 4;

/// Exact length of a legacy payload.
pub const LEGACY_PAYLOAD_LEN: usize = MARKER_LEN + SALT_LEN + SUBKEY_LEN;

/// Marker plus the three u32 header fields of a current payload.
const CURRENT_HEADER_LEN: usize = MARKER_LEN + U32_LEN + U32_LEN + U32_LEN;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Legacy payload: PBKDF2-HMAC-SHA1, 1000 iterations, both implied.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct LegacyPayload {
    salt: [u8; SALT_LEN],
    subkey: [u8; SUBKEY_LEN],
}

impl LegacyPayload {
    /// Build a legacy payload from its parts.
    #[must_use]
    pub const fn new(salt: [u8; SALT_LEN], subkey: [u8; SUBKEY_LEN]) -> Self {
        Self { salt, subkey }
    }

    /// Salt bytes.
    #[must_use]
    pub const fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Stored subkey bytes.
    #[must_use]
    pub const fn subkey(&self) -> &[u8; SUBKEY_LEN] {
        &self.subkey
    }
}

impl fmt::Debug for LegacyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyPayload")
            .field("salt", &"***")
            .field("subkey", &"***")
            .finish()
    }
}

/// Current payload: parameters travel with the hash.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CurrentPayload {
    #[zeroize(skip)]
    prf: KeyDerivationPrf,
    iteration_count: u32,
    salt: Vec<u8>,
    subkey: Vec<u8>,
}

impl CurrentPayload {
    /// Build a current payload, enforcing the same limits as decoding.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::Format`] if the iteration count is zero, the salt
    /// or subkey is shorter than 16 bytes, or the salt length does not fit a u32.
    pub fn new(
        prf: KeyDerivationPrf,
        iteration_count: u32,
        salt: Vec<u8>,
        subkey: Vec<u8>,
    ) -> Result<Self, HasherError> {
        if iteration_count == 0 {
            return Err(HasherError::Format("iteration count must be non-zero".into()));
        }
        if salt.len() < MIN_SALT_LEN {
            return Err(HasherError::Format(format!(
                "salt too short: {} bytes (minimum {MIN_SALT_LEN})",
                salt.len()
            )));
        }
        if u32::try_from(salt.len()).is_err() {
            return Err(HasherError::Format("salt too large for u32 length".into()));
        }
        if subkey.len() < MIN_SUBKEY_LEN {
            return Err(HasherError::Format(format!(
                "subkey too short: {} bytes (minimum {MIN_SUBKEY_LEN})",
                subkey.len()
            )));
        }
        Ok(Self {
            prf,
            iteration_count,
            salt,
            subkey,
        })
    }

    /// PRF used for derivation.
    #[must_use]
    pub const fn prf(&self) -> KeyDerivationPrf {
        self.prf
    }

    /// Embedded iteration count.
    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    /// Salt bytes.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Stored subkey bytes.
    #[must_use]
    pub fn subkey(&self) -> &[u8] {
        &self.subkey
    }
}

impl fmt::Debug for CurrentPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrentPayload")
            .field("prf", &self.prf)
            .field("iteration_count", &self.iteration_count)
            .field("salt_len", &self.salt.len())
            .field("subkey_len", &self.subkey.len())
            .finish()
    }
}

/// A decoded password hash, one variant per marker byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashedPassword {
    /// Format 0 (marker `0x00`).
    Legacy(LegacyPayload),
    /// Format 1 (marker `0x01`).
    Current(CurrentPayload),
}

impl HashedPassword {
    /// Leading marker byte of this payload.
    #[must_use]
    pub const fn marker(&self) -> u8 {
        match self {
            Self::Legacy(_) => LEGACY_MARKER,
            Self::Current(_) => CURRENT_MARKER,
        }
    }

    /// PRF needed to re-derive the subkey.
    #[must_use]
    pub const fn prf(&self) -> KeyDerivationPrf {
        match self {
            Self::Legacy(_) => KeyDerivationPrf::HmacSha1,
            Self::Current(p) => p.prf,
        }
    }

    /// Iteration count needed to re-derive the subkey.
    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        match self {
            Self::Legacy(_) => LEGACY_ITERATIONS,
            Self::Current(p) => p.iteration_count,
        }
    }

    /// Salt bytes.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        match self {
            Self::Legacy(p) => p.salt.as_slice(),
            Self::Current(p) => p.salt.as_slice(),
        }
    }

    /// Stored subkey bytes.
    #[must_use]
    pub fn subkey(&self) -> &[u8] {
        match self {
            Self::Legacy(p) => p.subkey.as_slice(),
            Self::Current(p) => p.subkey.as_slice(),
        }
    }

    /// Re-derive the subkey from `password` with this payload's own parameters
    /// and compare it to the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::KeyDerivation`] if PBKDF2 rejects the parameters.
    pub fn matches(&self, password: &[u8]) -> Result<bool, HasherError> {
        let expected = self.subkey();
        let actual = kdf::derive(
            self.prf(),
            password,
            self.salt(),
            self.iteration_count(),
            expected.len(),
        )?;
        Ok(kdf::fixed_time_eq(&actual, expected))
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    /// Serialize to the binary layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Legacy(p) => {
                let mut out = Vec::with_capacity(LEGACY_PAYLOAD_LEN);
                out.push(LEGACY_MARKER);
                out.extend_from_slice(&p.salt);
                out.extend_from_slice(&p.subkey);
                out
            }
            Self::Current(p) => {
                // `CurrentPayload::new` guarantees the salt length fits.
                let salt_len = u32::try_from(p.salt.len()).unwrap_or(u32::MAX);
                let capacity = CURRENT_HEADER_LEN
                    .saturating_add(p.salt.len())
                    .saturating_add(p.subkey.len());
                let mut out = Vec::with_capacity(capacity);
                out.push(CURRENT_MARKER);
                out.extend_from_slice(&p.prf.id().to_be_bytes());
                out.extend_from_slice(&p.iteration_count.to_be_bytes());
                out.extend_from_slice(&salt_len.to_be_bytes());
                out.extend_from_slice(&p.salt);
                out.extend_from_slice(&p.subkey);
                out
            }
        }
    }

    /// Serialize to the binary layout and Base64-encode it.
    #[must_use]
    pub fn to_base64(&self) -> String {
        let bytes = Zeroizing::new(self.encode());
        data_encoding::BASE64.encode(&bytes)
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Parse a binary payload, dispatching on the marker byte.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::Format`] for an empty buffer, an unknown marker,
    /// a legacy payload that is not exactly 49 bytes, or a current payload
    /// with a truncated header, unknown PRF, zero iterations, undersized salt
    /// or subkey, or a salt length running past the end of the buffer.
    pub fn decode(data: &[u8]) -> Result<Self, HasherError> {
        match data.first() {
            None => Err(HasherError::Format("empty payload".into())),
            Some(&LEGACY_MARKER) => decode_legacy(data).map(Self::Legacy),
            Some(&CURRENT_MARKER) => decode_current(data).map(Self::Current),
            Some(marker) => Err(HasherError::Format(format!(
                "unknown format marker 0x{marker:02x}"
            ))),
        }
    }

    /// Base64-decode and parse a payload.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::Format`] if the text is not canonical padded
    /// Base64 or the decoded bytes fail [`HashedPassword::decode`].
    pub fn decode_base64(text: &str) -> Result<Self, HasherError> {
        let bytes = data_encoding::BASE64
            .decode(text.as_bytes())
            .map(Zeroizing::new)
            .map_err(|e| HasherError::Format(format!("invalid Base64: {e}")))?;
        Self::decode(&bytes)
    }
}

impl From<LegacyPayload> for HashedPassword {
    fn from(payload: LegacyPayload) -> Self {
        Self::Legacy(payload)
    }
}

impl From<CurrentPayload> for HashedPassword {
    fn from(payload: CurrentPayload) -> Self {
        Self::Current(payload)
    }
}

fn decode_legacy(data: &[u8]) -> Result<LegacyPayload, HasherError> {
    if data.len() != LEGACY_PAYLOAD_LEN {
        return Err(HasherError::Format(format!(
            "legacy payload must be {LEGACY_PAYLOAD_LEN} bytes, got {}",
            data.len()
        )));
    }

    let (salt, subkey) = data[MARKER_LEN..].split_at(SALT_LEN);
    let salt: [u8; SALT_LEN] = salt
        .try_into()
        .map_err(|_| HasherError::Format("legacy salt slice length mismatch".into()))?;
    let subkey: [u8; SUBKEY_LEN] = subkey
        .try_into()
        .map_err(|_| HasherError::Format("legacy subkey slice length mismatch".into()))?;

    Ok(LegacyPayload::new(salt, subkey))
}

fn decode_current(data: &[u8]) -> Result<CurrentPayload, HasherError> {
    if data.len() < CURRENT_HEADER_LEN {
        return Err(HasherError::Format(format!(
            "current payload too short: {} bytes (header is {CURRENT_HEADER_LEN})",
            data.len()
        )));
    }

    let mut cursor = MARKER_LEN;
    let prf_id = read_u32_be(data, &mut cursor)?;
    let iteration_count = read_u32_be(data, &mut cursor)?;
    let salt_len = usize::try_from(read_u32_be(data, &mut cursor)?)
        .map_err(|_| HasherError::Format("salt length exceeds platform usize".into()))?;

    if salt_len < MIN_SALT_LEN {
        return Err(HasherError::Format(format!(
            "salt too short: {salt_len} bytes (minimum {MIN_SALT_LEN})"
        )));
    }

    let salt_end = cursor
        .checked_add(salt_len)
        .ok_or_else(|| HasherError::Format("salt length overflow".into()))?;
    let salt = data.get(cursor..salt_end).ok_or_else(|| {
        HasherError::Format(format!(
            "salt extends beyond payload: salt_end={salt_end}, payload_len={}",
            data.len()
        ))
    })?;
    let subkey = &data[salt_end..];

    if subkey.len() < MIN_SUBKEY_LEN {
        return Err(HasherError::Format(format!(
            "subkey too short: {} bytes (minimum {MIN_SUBKEY_LEN})",
            subkey.len()
        )));
    }

    let prf = KeyDerivationPrf::try_from(prf_id)?;

    CurrentPayload::new(prf, iteration_count, salt.to_vec(), subkey.to_vec())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a u32 from `data` at `cursor` in big-endian order, advancing `cursor`.
fn read_u32_be(data: &[u8], cursor: &mut usize) -> Result<u32, HasherError> {
    let end = cursor
        .checked_add(U32_LEN)
        .ok_or_else(|| HasherError::Format("cursor overflow".into()))?;

    let bytes = data.get(*cursor..end).ok_or_else(|| {
        HasherError::Format(format!("payload too short to read u32 at offset {cursor}"))
    })?;

    let mut buf = [0u8; U32_LEN];
    buf.copy_from_slice(bytes);
    *cursor = end;

    Ok(u32::from_be_bytes(buf))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
