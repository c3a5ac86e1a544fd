//! Verification must not reveal *why* a stored hash was rejected.
//!
//! Every malformed payload class and a plain wrong password are fed to the
//! same hasher; all of them must produce the identical `Failed` value, and
//! the public result type must carry no further detail.

use identity_password_hasher::{HasherOptions, PasswordHasher, PasswordVerificationResult};

use crate::common::{PLAINTEXT_PASSWORD, V3_SHA512_10000ITER_128SALT_256SUBKEY};

#[test]
fn all_rejection_classes_are_identical() {
    let hasher = PasswordHasher::with_options(HasherOptions::default()).unwrap();
    let valid = V3_SHA512_10000ITER_128SALT_256SUBKEY;

    let mut bad_prf = data_encoding::BASE64.decode(valid.as_bytes()).unwrap();
    bad_prf[4] = 0x03;
    let bad_prf = data_encoding::BASE64.encode(&bad_prf);

    let outcomes = [
        // wrong password
        hasher.verify_hashed_password(valid, "wrong password"),
        // transport decode failure
        hasher.verify_hashed_password("@@@@", PLAINTEXT_PASSWORD),
        // empty payload
        hasher.verify_hashed_password("", PLAINTEXT_PASSWORD),
        // unknown marker
        hasher.verify_hashed_password("Bw==", PLAINTEXT_PASSWORD),
        // unknown prf
        hasher.verify_hashed_password(&bad_prf, PLAINTEXT_PASSWORD),
        // truncated
        hasher.verify_hashed_password("AQAAAAI=", PLAINTEXT_PASSWORD),
    ];

    for outcome in outcomes {
        assert_eq!(outcome, PasswordVerificationResult::Failed);
        assert!(!outcome.is_success());
        assert!(!outcome.needs_rehash());
        assert_eq!(format!("{outcome:?}"), "Failed");
    }
}

#[test]
fn failed_serializes_without_detail() {
    let json = serde_json::to_string(&PasswordVerificationResult::Failed).unwrap();
    assert_eq!(json, "\"failed\"");
}
