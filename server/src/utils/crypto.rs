//! Hashing helpers

use sha2::{Digest, Sha256};

/// SHA-256 of `data` as lowercase hex
pub fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_detects_change() {
        assert_ne!(sha256_hex("CREATE TABLE pets"), sha256_hex("CREATE TABLE pets "));
        assert_eq!(sha256_hex("").len(), 64);
    }
}
