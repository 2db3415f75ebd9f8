//! Thin wrapper around the original BLAKE-256/BLAKE-512 one-shot digests
//! (not BLAKE2 or BLAKE3), used by [`crate::hashes`]'s `Hmsg`, `Fa` and
//! `Frand` adaptors.

use blake_hash::{Blake256, Blake512};
use digest::Digest as _;

/// BLAKE-256 over the concatenation of `parts`, in order.
pub fn blake256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// BLAKE-512 over the concatenation of `parts`, in order.
pub fn blake512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake256_is_deterministic_and_order_sensitive() {
        let ab = blake256(&[b"a", b"b"]);
        let ab2 = blake256(&[b"a", b"b"]);
        let ba = blake256(&[b"b", b"a"]);
        assert_eq!(ab, ab2);
        assert_ne!(ab, ba);
    }

    #[test]
    fn blake512_concatenation_matches_single_call() {
        let split = blake512(&[b"hello ", b"world"]);
        let whole = blake512(&[b"hello world"]);
        assert_eq!(split, whole);
    }
}
