//! Opaque identifier generation for asset and download file naming.
//!
//! Identifiers are drawn uniformly from the 62-character alphanumeric
//! alphabet. Collision resistance is probabilistic only -- good enough
//! for naming, since a collision never breaks a correctness invariant.
//! Not suitable for anything security-sensitive.

use rand::Rng;

/// The 62-character alphanumeric alphabet identifiers are drawn from.
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default identifier length for uploaded asset names.
pub const ASSET_ID_LEN: usize = 21;

/// Default identifier length for download file names.
pub const DOWNLOAD_ID_LEN: usize = 8;

/// Generate a random identifier of `length` alphanumeric characters.
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_id(ASSET_ID_LEN).len(), 21);
        assert_eq!(generate_id(DOWNLOAD_ID_LEN).len(), 8);
        assert_eq!(generate_id(0).len(), 0);
    }

    #[test]
    fn only_alphanumeric_characters() {
        let id = generate_id(256);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn successive_ids_differ() {
        // 62^21 possibilities -- a collision here means the generator
        // is broken, not unlucky.
        assert_ne!(generate_id(ASSET_ID_LEN), generate_id(ASSET_ID_LEN));
    }
}
