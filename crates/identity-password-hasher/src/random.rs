//! Injected source of salt bytes.
//!
//! [`PasswordHasher`](crate::PasswordHasher) never reaches for a global RNG;
//! it is handed a [`RandomSource`] at construction. Production code uses
//! [`OsRandom`]; tests substitute a deterministic sequence.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::HasherError;

/// Capability that fills a buffer with uniformly random bytes.
///
/// Implementations must be safe to call from several threads at once.
/// A non-thread-safe generator can be wrapped in a [`Mutex`].
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HasherError::RandomSource`] if no bytes could be produced.
    fn fill(&self, dest: &mut [u8]) -> Result<(), HasherError>;
}

/// Operating-system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), HasherError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| HasherError::RandomSource(format!("OS random generator failed: {e}")))
    }
}

impl<R: RngCore + Send> RandomSource for Mutex<R> {
    fn fill(&self, dest: &mut [u8]) -> Result<(), HasherError> {
        let mut rng = self
            .lock()
            .map_err(|_| HasherError::RandomSource("random generator lock poisoned".into()))?;
        rng.try_fill_bytes(dest)
            .map_err(|e| HasherError::RandomSource(format!("random generator failed: {e}")))
    }
}
