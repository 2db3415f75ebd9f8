//! WOTS+: a Winternitz one-time signature with masked hash chains.
//!
//! Mirrors `WOTSplus.py`'s constructor shape (`n, w, F, Gl`): `F` and `G`
//! are taken as injected function parameters rather than hardcoded calls
//! into [`crate::hashes`], the same way [`crate::tree`] takes its combining
//! function `H` as a generic closure parameter instead of calling a fixed
//! hash directly. Callers bind `crate::hashes::f`/`crate::hashes::g`.

use alloc::vec::Vec;
use core::ops::Range;

use crate::bytes::{base_w, ceil_log2, clear_bytes, clear_digests, int_to_basew, xor_fixed, Digest, HASH_LEN_BITS};

/// The derived shape constants of a WOTS+ instance at a given Winternitz
/// parameter `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WotsParams {
    pub w: usize,
    pub log_w: u32,
    /// Number of chains carrying the message digits.
    pub l1: usize,
    /// Number of chains carrying the checksum digits.
    pub l2: usize,
    /// Total number of chains, `l1 + l2`.
    pub l: usize,
}

impl WotsParams {
    /// Derives `l1`, `l2`, `l` for Winternitz parameter `w` (must be a power
    /// of two), per spec: `l1 = ceil(n / log2(w))`, `l2 = floor(log2(l1 *
    /// (w-1)) / log2(w)) + 1`, `l = l1 + l2`.
    pub fn new(w: usize) -> Self {
        debug_assert!(w.is_power_of_two() && w > 1);
        let log_w = w.ilog2();
        let l1 = HASH_LEN_BITS.div_ceil(log_w as usize);
        let l2 = (((l1 * (w - 1)).ilog2()) as usize) / (log_w as usize) + 1;
        Self { w, log_w, l1, l2, l: l1 + l2 }
    }
}

/// Applies the hash chain `x -> F(x ^ masks[j])` for `j` in `range`, with
/// `F` supplied by the caller.
pub fn chain<F>(mut x: Digest, range: Range<usize>, masks: &[Digest], f: &F) -> Digest
where
    F: Fn(&Digest) -> Digest,
{
    for j in range {
        x = f(&xor_fixed(&x, &masks[j]));
    }
    x
}

/// Derives the base-`w` message digits plus checksum digits, in chain
/// order (`l1` message digits, then `l2` checksum digits).
fn chain_lengths(m: &Digest, p: &WotsParams) -> Vec<usize> {
    let message_digits = base_w(m, p.log_w, p.l1);
    let checksum: u64 = message_digits
        .iter()
        .map(|&d| (p.w as u64 - 1) - u64::from(d))
        .sum();
    let mut digits: Vec<usize> = message_digits.into_iter().map(|d| d as usize).collect();
    digits.extend(int_to_basew(checksum, p.w, p.l2));
    digits
}

/// Derives the `l` secret-key chain-start elements from `seed`, via the
/// injected `G`. The intermediate byte buffer is zeroized before it is
/// dropped, since it carries the same secret material as the `Digest`s
/// chunked out of it.
fn sk_from_seed<G>(seed: &Digest, p: &WotsParams, g: &G) -> Vec<Digest>
where
    G: Fn(&Digest, usize) -> Vec<u8>,
{
    let mut bytes = g(seed, p.l * 32);
    let sk = bytes.chunks_exact(32).map(|c| c.try_into().expect("32-byte chunk")).collect();
    clear_bytes(&mut bytes);
    sk
}

/// Runs every chain to its end (`w - 1` steps); the public key.
pub fn keygen<F, G>(seed: &Digest, masks: &[Digest], p: &WotsParams, f: &F, g: &G) -> Vec<Digest>
where
    F: Fn(&Digest) -> Digest,
    G: Fn(&Digest, usize) -> Vec<u8>,
{
    let mut sk = sk_from_seed(seed, p, g);
    let pk = sk.iter().map(|sk_i| chain(*sk_i, 0..p.w - 1, masks, f)).collect();
    clear_digests(&mut sk);
    pk
}

/// Signs `m` (a 32-byte digest), running each chain `b_i` steps per the
/// base-`w` decomposition plus checksum.
pub fn sign<F, G>(m: &Digest, seed: &Digest, masks: &[Digest], p: &WotsParams, f: &F, g: &G) -> Vec<Digest>
where
    F: Fn(&Digest) -> Digest,
    G: Fn(&Digest, usize) -> Vec<u8>,
{
    let lengths = chain_lengths(m, p);
    let mut sk = sk_from_seed(seed, p, g);
    let sig = sk.iter().zip(&lengths).map(|(&sk_i, &b_i)| chain(sk_i, 0..b_i, masks, f)).collect();
    clear_digests(&mut sk);
    sig
}

/// Completes each signature chain to the top (`[b_i, w-1)`), yielding the
/// would-be public key.
pub fn pk_from_sig<F>(m: &Digest, sig: &[Digest], masks: &[Digest], p: &WotsParams, f: &F) -> Vec<Digest>
where
    F: Fn(&Digest) -> Digest,
{
    let lengths = chain_lengths(m, p);
    sig.iter()
        .zip(lengths)
        .map(|(&sig_i, b_i)| chain(sig_i, b_i..p.w - 1, masks, f))
        .collect()
}

/// Number of mask pairs an L-tree reduction over `l` WOTS+ chain outputs
/// needs, used to determine where the "outer tree" mask suffix starts.
pub fn l_tree_mask_offset(l: usize) -> usize {
    2 * ceil_log2(l)
}
