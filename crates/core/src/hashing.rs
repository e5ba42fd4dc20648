//! Shared SHA-256 hex digest utility.
//!
//! The content address of a stored script is the SHA-256 digest of its
//! UTF-8 bytes; the script store deduplicates on this value.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn consistent_output() {
        let data = b"print('reduce')";
        assert_eq!(sha256_hex(data), sha256_hex(data));
        assert_eq!(sha256_hex(data).len(), 64);
    }

    #[test]
    fn distinct_inputs_produce_distinct_hashes() {
        assert_ne!(sha256_hex(b"a"), sha256_hex(b"b"));
    }
}
