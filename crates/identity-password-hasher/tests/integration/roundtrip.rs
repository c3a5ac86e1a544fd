//! Hash then verify with a real OS random source.

use identity_password_hasher::{
    CompatibilityMode, HashedPassword, HasherOptions, KeyDerivationPrf, PasswordHasher,
    PasswordVerificationResult,
};

fn hashers() -> Vec<PasswordHasher> {
    let mut out = vec![
        PasswordHasher::with_options(HasherOptions::default().with_mode(CompatibilityMode::V2))
            .expect("v2 options should be valid"),
    ];
    for prf in KeyDerivationPrf::ALL {
        let options = HasherOptions::default()
            .with_iteration_count(1_000)
            .with_prf(prf);
        out.push(PasswordHasher::with_options(options).expect("v3 options should be valid"));
    }
    out
}

#[test]
fn full_round_trip() {
    for hasher in hashers() {
        let hashed = hasher.hash_password("password 1").unwrap();
        assert_eq!(
            hasher.verify_hashed_password(&hashed, "password 1"),
            PasswordVerificationResult::Success,
            "{:?}",
            hasher.options()
        );
        assert_eq!(
            hasher.verify_hashed_password(&hashed, "password 2"),
            PasswordVerificationResult::Failed,
            "{:?}",
            hasher.options()
        );
    }
}

#[test]
fn empty_and_binary_passwords() {
    let hasher =
        PasswordHasher::with_options(HasherOptions::default().with_iteration_count(100)).unwrap();
    for password in [&b""[..], &[0u8, 0xFF, 0x80, 0x00][..], "pässwörd 🔑".as_bytes()] {
        let hashed = hasher.hash_password(password).unwrap();
        assert_eq!(
            hasher.verify_hashed_password(&hashed, password),
            PasswordVerificationResult::Success
        );
    }
    let hashed = hasher.hash_password(b"").unwrap();
    assert_eq!(
        hasher.verify_hashed_password(&hashed, b"\x01"),
        PasswordVerificationResult::Failed
    );
}

/// HMAC zero-pads short keys, so trailing NUL bytes do not change the subkey.
#[test]
fn trailing_nul_bytes_share_a_subkey() {
    let hasher =
        PasswordHasher::with_options(HasherOptions::default().with_iteration_count(100)).unwrap();
    let empty = hasher.hash_password(b"").unwrap();
    assert_eq!(
        hasher.verify_hashed_password(&empty, b"\0"),
        PasswordVerificationResult::Success
    );
    let hashed = hasher.hash_password("pw").unwrap();
    assert_eq!(
        hasher.verify_hashed_password(&hashed, b"pw\0\0"),
        PasswordVerificationResult::Success
    );
    assert_eq!(
        hasher.verify_hashed_password(&hashed, b"\0pw"),
        PasswordVerificationResult::Failed
    );
}

#[test]
fn same_password_hashes_differently() {
    let hasher =
        PasswordHasher::with_options(HasherOptions::default().with_iteration_count(100)).unwrap();
    let a = hasher.hash_password("pw").unwrap();
    let b = hasher.hash_password("pw").unwrap();
    assert_ne!(a, b);
}

#[test]
fn produced_text_is_canonical_base64() {
    let hasher =
        PasswordHasher::with_options(HasherOptions::default().with_iteration_count(100)).unwrap();
    let hashed = hasher.hash_password("pw").unwrap();
    assert!(!hashed.contains('\n'));
    let decoded = HashedPassword::decode_base64(&hashed).unwrap();
    assert_eq!(decoded.to_base64(), hashed);
    // 1 + 12 header + 16 salt + 32 subkey = 61 bytes -> 84 Base64 chars.
    assert_eq!(hashed.len(), 84);
}

#[test]
fn options_loaded_from_json() {
    let options = HasherOptions::from_json(
        r#"{"compatibility_mode": "current", "iteration_count": 500, "prf": "hmac-sha256"}"#,
    )
    .unwrap();
    let hasher = PasswordHasher::with_options(options).unwrap();
    let hashed = hasher.hash_password("pw").unwrap();
    let decoded = HashedPassword::decode_base64(&hashed).unwrap();
    assert_eq!(decoded.prf(), KeyDerivationPrf::HmacSha256);
    assert_eq!(decoded.iteration_count(), 500);
    assert_eq!(
        hasher.verify_hashed_password(&hashed, "pw"),
        PasswordVerificationResult::Success
    );
}
