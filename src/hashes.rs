//! `F`, `H`, `G` (ChaCha-permutation adaptors) and `Hmsg`, `Fa`, `Frand`
//! (BLAKE adaptors) — the only primitives the rest of the crate is allowed
//! to call a hash function through.
//!
//! Byte order is centralized here and nowhere else: every integer this
//! crate touches is little-endian *except* the randomizer-derived index
//! `i`, which is parsed big-endian from `R2` before the right-shift (see
//! [`crate::bytes::be_bits_from_msb`]). Mixing the two is intentional, not
//! a bug — see the orchestrator in `signing_key.rs`.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::blake::{blake256, blake512};
use crate::bytes::Digest;
use crate::chacha::{permute_block, ChaCha, DEFAULT_ROUNDS};

/// ASCII "expand 32-byte to 64-byte state!", the fixed padding appended to a
/// 32-byte block before permuting it up to the full 64-byte ChaCha state.
const PAD: [u8; 32] = *b"expand 32-byte to 64-byte state!";

fn perm(block: &[u8; 64]) -> [u8; 64] {
    permute_block(block, DEFAULT_ROUNDS)
}

fn first_32(block: &[u8; 64]) -> Digest {
    let mut out = [0u8; 32];
    out.copy_from_slice(&block[..32]);
    out
}

/// `F(m) = perm(m ‖ C)[..32]`.
pub fn f(m: &Digest) -> Digest {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(m);
    block[32..].copy_from_slice(&PAD);
    first_32(&perm(&block))
}

/// `H(m1, m2) = perm( perm(m1 ‖ C) XOR (m2 ‖ 0^32) )[..32]`.
pub fn h(m1: &Digest, m2: &Digest) -> Digest {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(m1);
    block[32..].copy_from_slice(&PAD);
    let inner = perm(&block);

    let mut masked = [0u8; 64];
    for i in 0..32 {
        masked[i] = inner[i] ^ m2[i];
    }
    masked[32..].copy_from_slice(&inner[32..]);

    first_32(&perm(&masked))
}

/// `G_len(seed)`, the first `len` bytes of a ChaCha12 keystream keyed by
/// `seed` with a zero nonce and counter.
#[cfg(feature = "alloc")]
pub fn g(seed: &Digest, len: usize) -> Vec<u8> {
    ChaCha::new(seed, &[0u8; 8], DEFAULT_ROUNDS).keystream(len)
}

/// `Hmsg(r, M) = BLAKE-512(r ‖ M)`.
pub fn h_msg(r: &Digest, m: &[u8]) -> [u8; 64] {
    blake512(&[r, m])
}

/// `Fa(A, K) = BLAKE-256(K ‖ A)`, binding an address to a secret seed.
pub fn fa(address: &[u8; 8], k: &Digest) -> Digest {
    blake256(&[k, address])
}

/// `Frand(M, K) = BLAKE-512(K ‖ M)`, the message randomizer.
pub fn frand(m: &[u8], k: &Digest) -> [u8; 64] {
    blake512(&[k, m])
}
