//! The ChaCha permutation, used here purely as a building block for the
//! `F`/`H`/`G` primitives in [`crate::hashes`] — never as a stream cipher in
//! its own right.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Default round count used throughout this scheme (12, i.e. ChaCha12).
pub const DEFAULT_ROUNDS: usize = 12;

const SIGMA: [u8; 16] = *b"expand 32-byte k";
const TAU: [u8; 16] = *b"expand 16-byte k";

#[inline]
fn quarter_round(a: u32, b: u32, c: u32, d: u32) -> (u32, u32, u32, u32) {
    let mut a = a;
    let mut b = b;
    let mut c = c;
    let mut d = d;
    a = a.wrapping_add(b);
    d = (d ^ a).rotate_left(16);
    c = c.wrapping_add(d);
    b = (b ^ c).rotate_left(12);
    a = a.wrapping_add(b);
    d = (d ^ a).rotate_left(8);
    c = c.wrapping_add(d);
    b = (b ^ c).rotate_left(7);
    (a, b, c, d)
}

fn apply_quarter_round(x: &mut [u32; 16], i: usize, j: usize, k: usize, l: usize) {
    let (a, b, c, d) = quarter_round(x[i], x[j], x[k], x[l]);
    x[i] = a;
    x[j] = b;
    x[k] = c;
    x[l] = d;
}

const COLUMNS: [(usize, usize, usize, usize); 4] =
    [(0, 4, 8, 12), (1, 5, 9, 13), (2, 6, 10, 14), (3, 7, 11, 15)];
const DIAGONALS: [(usize, usize, usize, usize); 4] =
    [(0, 5, 10, 15), (1, 6, 11, 12), (2, 7, 8, 13), (3, 4, 9, 14)];

/// Runs `rounds` ChaCha quarter-rounds (`rounds / 2` column+diagonal double
/// rounds) over `words`, then adds the original `words` back in, word-wise
/// mod 2^32 — the Davies-Meyer-style finishing step that makes this a
/// one-way compression function rather than a reversible permutation.
pub fn permute_words(words: [u32; 16], rounds: usize) -> [u32; 16] {
    debug_assert_eq!(rounds % 2, 0, "ChaCha round count must be even");
    let mut x = words;
    for _ in 0..(rounds / 2) {
        for &(i, j, k, l) in &COLUMNS {
            apply_quarter_round(&mut x, i, j, k, l);
        }
        for &(i, j, k, l) in &DIAGONALS {
            apply_quarter_round(&mut x, i, j, k, l);
        }
    }
    for i in 0..16 {
        x[i] = x[i].wrapping_add(words[i]);
    }
    x
}

fn words_from_le_bytes(bytes: &[u8; 64]) -> [u32; 16] {
    let mut words = [0u32; 16];
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *w = u32::from_le_bytes(chunk.try_into().expect("4-byte chunk"));
    }
    words
}

fn le_bytes_from_words(words: &[u32; 16]) -> [u8; 64] {
    let mut bytes = [0u8; 64];
    for (chunk, w) in bytes.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&w.to_le_bytes());
    }
    bytes
}

/// Applies the ChaCha permutation to a 64-byte block, viewed as 16
/// little-endian 32-bit words. This is the standalone entry point used by
/// `F` and `H`; it does not set up a key/nonce/counter state the way
/// [`ChaCha::keystream`] does.
pub fn permute_block(block: &[u8; 64], rounds: usize) -> [u8; 64] {
    le_bytes_from_words(&permute_words(words_from_le_bytes(block), rounds))
}

/// A ChaCha keystream generator, used by `G` to expand a seed into
/// pseudorandom bytes.
pub struct ChaCha {
    state: [u32; 16],
    rounds: usize,
}

impl ChaCha {
    /// `key` must be 16 or 32 bytes; `nonce` is the 8-byte ChaCha nonce.
    /// The counter always starts at zero.
    pub fn new(key: &[u8], nonce: &[u8; 8], rounds: usize) -> Self {
        assert_eq!(rounds % 2, 0, "ChaCha round count must be even");
        assert!(key.len() == 16 || key.len() == 32, "ChaCha key must be 16 or 32 bytes");

        let mut state = [0u32; 16];
        let constant = if key.len() == 32 { &SIGMA } else { &TAU };
        for (w, chunk) in state[0..4].iter_mut().zip(constant.chunks_exact(4)) {
            *w = u32::from_le_bytes(chunk.try_into().expect("4-byte chunk"));
        }
        if key.len() == 32 {
            for (w, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
                *w = u32::from_le_bytes(chunk.try_into().expect("4-byte chunk"));
            }
        } else {
            for half in 0..2 {
                for (w, chunk) in state[4 + half * 4..8 + half * 4]
                    .iter_mut()
                    .zip(key.chunks_exact(4))
                {
                    *w = u32::from_le_bytes(chunk.try_into().expect("4-byte chunk"));
                }
            }
        }
        state[12] = 0;
        state[13] = 0;
        for (w, chunk) in state[14..16].iter_mut().zip(nonce.chunks_exact(4)) {
            *w = u32::from_le_bytes(chunk.try_into().expect("4-byte chunk"));
        }

        Self { state, rounds }
    }

    fn next_block(&mut self) -> [u8; 64] {
        let out = le_bytes_from_words(&permute_words(self.state, self.rounds));
        self.state[12] = self.state[12].wrapping_add(1);
        if self.state[12] == 0 {
            self.state[13] = self.state[13].wrapping_add(1);
        }
        out
    }

    /// Produces `n` bytes of keystream, truncating the final block.
    #[cfg(feature = "alloc")]
    pub fn keystream(&mut self, n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n.div_ceil(64) * 64);
        while out.len() < n {
            out.extend_from_slice(&self.next_block());
        }
        out.truncate(n);
        out
    }
}
