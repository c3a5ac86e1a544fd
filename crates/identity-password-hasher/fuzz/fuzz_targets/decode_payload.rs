//! Fuzz target for the binary payload decoder.
//!
//! Feeds arbitrary bytes to `HashedPassword::decode`. Must never panic, and
//! anything it accepts must re-encode to the same bytes.
//!
//! # Usage
//!
//! ```sh
//! cd crates/identity-password-hasher
//! cargo +nightly fuzz run decode_payload -- -max_len=4096
//! ```

#![no_main]

use identity_password_hasher::HashedPassword;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(hashed) = HashedPassword::decode(data) {
        assert_eq!(hashed.encode(), data);
    }
});
