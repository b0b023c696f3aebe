//! Hashing utilities for storage file names.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA256 of a string.
pub fn sha256_str(s: &str) -> String {
    hex::encode(Sha256::digest(s.as_bytes()))
}

/// Short hash of a string (first 16 hex chars), safe to use as a file name.
pub fn short_hash(s: &str) -> String {
    sha256_str(s)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_str() {
        let hash = sha256_str("hello");
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("hello"), "2cf24dba5fb0a30e");
        assert_ne!(short_hash("petPosterFormData"), short_hash("__storage_test__"));
    }
}
