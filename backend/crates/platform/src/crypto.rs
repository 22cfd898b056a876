//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an unguessable token: `len_bytes` of OS randomness, lowercase hex.
///
/// The returned string is `2 * len_bytes` characters long.
pub fn random_hex_token(len_bytes: usize) -> String {
    hex::encode(random_bytes(len_bytes))
}

/// Whether `s` is exactly `len_bytes` worth of lowercase hex
pub fn is_hex_token(s: &str, len_bytes: usize) -> bool {
    s.len() == len_bytes * 2 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));

        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_random_hex_token_shape() {
        let token = random_hex_token(32);
        assert_eq!(token.len(), 64);
        assert!(is_hex_token(&token, 32));
    }

    #[test]
    fn test_random_hex_tokens_differ() {
        assert_ne!(random_hex_token(32), random_hex_token(32));
    }

    #[test]
    fn test_is_hex_token_rejects() {
        assert!(!is_hex_token("abc", 32));
        assert!(!is_hex_token(&"A".repeat(64), 32));
        assert!(!is_hex_token(&"g".repeat(64), 32));
        assert!(is_hex_token(&"0f".repeat(32), 32));
    }
}
