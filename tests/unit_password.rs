use learnroot::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_and_verify_password() {
    let hash = hash_password("correct horse battery staple").expect("hashing should succeed");

    assert_ne!(hash, "correct horse battery staple");
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn test_wrong_password_fails_verification() {
    let hash = hash_password("secret123").unwrap();

    assert!(!verify_password("secret124", &hash).unwrap());
}

#[test]
fn test_same_password_hashes_differently() {
    let first = hash_password("secret123").unwrap();
    let second = hash_password("secret123").unwrap();

    // bcrypt salts every hash
    assert_ne!(first, second);
}

#[test]
fn test_verify_rejects_malformed_hash() {
    assert!(verify_password("secret123", "not-a-bcrypt-hash").is_err());
}
