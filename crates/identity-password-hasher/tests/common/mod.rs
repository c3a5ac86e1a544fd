//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use identity_password_hasher::{HasherError, HasherOptions, PasswordHasher, RandomSource};

/// Plaintext used by every reference vector.
pub const PLAINTEXT_PASSWORD: &str = "my password";

/// V2: HMAC-SHA1, 1000 iterations, 128-bit salt 00..0f, 256-bit subkey.
pub const V2_SHA1_1000ITER_128SALT_256SUBKEY: &str =
    "AAABAgMEBQYHCAkKCwwNDg+ukCEMDf0yyQ29NYubggHIVY0sdEUfdyeM+E1LtH1uJg==";

/// V3: HMAC-SHA1, 250 iterations, 128-bit salt, 128-bit subkey.
pub const V3_SHA1_250ITER_128SALT_128SUBKEY: &str =
    "AQAAAAAAAAD6AAAAEAhftMyfTJylOlZT+eEotFXd1elee8ih5WsjXaR3PA9M";

/// V3: HMAC-SHA256, 250 000 iterations, 256-bit salt, 256-bit subkey.
pub const V3_SHA256_250000ITER_256SALT_256SUBKEY: &str =
    "AQAAAAEAA9CQAAAAIESkQuj2Du8Y+kbc5lcN/W/3NiAZFEm11P27nrSN5/tId+bR1SwV8CO1Jd72r4C08OLvplNlCDc3oQZ8efcW+jQ=";

/// V3: HMAC-SHA512, 50 iterations, 128-bit salt, 128-bit subkey.
pub const V3_SHA512_50ITER_128SALT_128SUBKEY: &str =
    "AQAAAAIAAAAyAAAAEOMwvh3+FZxqkdMBz2ekgGhwQ4B6pZWND6zgESBuWiHw";

/// V3: HMAC-SHA512, 250 iterations, 256-bit salt, 512-bit subkey.
pub const V3_SHA512_250ITER_256SALT_512SUBKEY: &str =
    "AQAAAAIAAAD6AAAAIJbVi5wbMR+htSfFp8fTw8N8GOS/Sje+S/4YZcgBfU7EQuqv4OkVYmc4VJl9AGZzmRTxSkP7LtVi9IWyUxX8IAAfZ8v+ZfhjCcudtC1YERSqE1OEdXLW9VukPuJWBBjLuw==";

/// V3: HMAC-SHA512, 10 000 iterations, 128-bit salt 00..0f, 256-bit subkey.
pub const V3_SHA512_10000ITER_128SALT_256SUBKEY: &str =
    "AQAAAAIAACcQAAAAEAABAgMEBQYHCAkKCwwNDg9B0Oxwty+PGIDSp95gcCfzeDvA4sGapUIUov8usXfD6A==";

/// V3: HMAC-SHA512, 100 000 iterations, 128-bit salt 00..0f, 256-bit subkey.
pub const V3_SHA512_100000ITER_128SALT_256SUBKEY: &str =
    "AQAAAAIAAYagAAAAEAABAgMEBQYHCAkKCwwNDg/Q8A0WMKbtHQJQ2DHCdoEeeFBrgNlldq6vH4qX/CGqGQ==";

/// Random source yielding 0, 1, 2, ... across calls.
#[derive(Default)]
pub struct SequentialRandom(AtomicU8);

impl RandomSource for SequentialRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), HasherError> {
        for b in dest.iter_mut() {
            *b = self.0.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

/// Hasher whose salts come from a fresh [`SequentialRandom`].
pub fn sequential_hasher(options: HasherOptions) -> PasswordHasher {
    PasswordHasher::new(options, Arc::new(SequentialRandom::default()))
        .expect("options should be valid")
}
