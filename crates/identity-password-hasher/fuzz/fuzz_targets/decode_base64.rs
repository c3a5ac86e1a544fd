//! Fuzz target for the Base64 transport layer.
//!
//! Only decodes; verification is not fuzzed because a payload may legally
//! request billions of PBKDF2 iterations.
//!
//! # Usage
//!
//! ```sh
//! cd crates/identity-password-hasher
//! cargo +nightly fuzz run decode_base64 -- -max_len=4096
//! ```

#![no_main]

use identity_password_hasher::HashedPassword;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(hashed) = HashedPassword::decode_base64(text) {
            assert_eq!(hashed.to_base64(), text);
        }
    }
});
