//! One-way credential digest. Raw credentials are hashed at the boundary and
//! never persisted, logged, or compared directly.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the raw credential.
pub fn hash_credential(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Constant-shape comparison of a raw credential against a stored digest.
pub fn verify_credential(raw: &str, stored_hash: &str) -> bool {
    hash_credential(raw) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_credential("hunter2"), hash_credential("hunter2"));
    }

    #[test]
    fn test_hash_differs_per_input() {
        assert_ne!(hash_credential("hunter2"), hash_credential("hunter3"));
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        let hash = hash_credential("pw");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // Known vector: SHA-256 of the empty string.
        assert_eq!(
            hash_credential(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_verify_roundtrip() {
        let stored = hash_credential("pw");
        assert!(verify_credential("pw", &stored));
        assert!(!verify_credential("PW", &stored));
    }
}
