//! HORST: a few-time signature over a pruned Merkle tree of `2^tau` secret
//! elements. The last `x` layers of the tree are published wholesale as
//! `sigma_k` rather than carried per-index, shortening each of the `k`
//! per-signature authentication paths to `tau - x` siblings.

use alloc::vec::Vec;

use crate::bytes::{clear_bytes, clear_digests, xor_fixed, Digest};
use crate::error::{Error, Result};
use crate::hashes::{f, g, h};
use crate::tree;

/// The derived shape of a HORST instance at a given `(tau, k)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorstParams {
    pub tau: usize,
    pub k: usize,
    /// `2^tau`, the number of secret leaves.
    pub t: usize,
    /// The pruning depth maximizing `k*x - 2^x` over `x` in `[0, tau)`.
    pub x: usize,
}

impl HorstParams {
    pub fn new(tau: usize, k: usize) -> Self {
        let t = 1usize << tau;
        let mut best_x = 0usize;
        let mut best_val = i64::MIN;
        for x in 0..tau {
            let val = (k as i64) * (x as i64) - (1i64 << x);
            if val > best_val {
                best_val = val;
                best_x = x;
            }
        }
        Self { tau, k, t, x: best_x }
    }

    /// Depth (reductions from the leaves) at which `sigma_k` is published.
    pub fn truncated_depth(&self) -> usize {
        self.tau - self.x
    }
}

fn tree_h<'a>(masks: &'a [Digest]) -> impl Fn(&Digest, &Digest, usize) -> Digest + 'a {
    move |x, y, i| h(&xor_fixed(x, &masks[2 * i]), &xor_fixed(y, &masks[2 * i + 1]))
}

/// One revealed leaf of a HORST signature: the secret element and its
/// authentication path truncated to `tau - x` siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafReveal {
    pub sk: Digest,
    pub auth: Vec<Digest>,
}

/// A full HORST signature: `k` leaf reveals followed by the published
/// `sigma_k` layer (`2^x` nodes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub leaves: Vec<LeafReveal>,
    pub sigma_k: Vec<Digest>,
}

/// Splits `d` into `k` little-endian message indices, each drawn from a
/// `tau/8`-byte chunk. Requires `tau` to be a multiple of 8.
pub fn message_indices(d: &[u8], tau: usize, k: usize) -> Vec<usize> {
    debug_assert_eq!(tau % 8, 0, "tau must be a multiple of 8");
    let chunk_bytes = tau / 8;
    debug_assert_eq!(d.len(), chunk_bytes * k);
    d.chunks_exact(chunk_bytes)
        .take(k)
        .map(|chunk| {
            let mut value = 0usize;
            for (i, &byte) in chunk.iter().enumerate() {
                value |= (byte as usize) << (8 * i);
            }
            value
        })
        .collect()
}

/// Builds the `2^tau` secret leaves (`sk`) and their hash tree from `seed`.
/// The raw keystream buffer `sk` is chunked from is zeroized immediately
/// after chunking; `sk` itself (the per-node HORST secrets) is the caller's
/// responsibility to zeroize once it is done with it — `keygen` never needs
/// individual elements and `sign` copies out only the `k` revealed ones.
fn leaves_and_tree(seed: &Digest, masks: &[Digest], p: &HorstParams) -> (Vec<Digest>, tree::Layers<Digest>) {
    let mut bytes = g(seed, p.t * 32);
    let sk: Vec<Digest> = bytes.chunks_exact(32).map(|c| c.try_into().expect("32-byte chunk")).collect();
    clear_bytes(&mut bytes);
    let leaves: Vec<Digest> = sk.iter().map(f).collect();
    let layers = tree::hash_tree(tree_h(masks), &leaves);
    (sk, layers)
}

/// Builds the HORST keypair from `seed`; returns the tree root (public key).
pub fn keygen(seed: &Digest, masks: &[Digest], p: &HorstParams) -> Digest {
    let (mut sk, layers) = leaves_and_tree(seed, masks, p);
    let root = tree::root(&layers);
    clear_digests(&mut sk);
    root
}

/// Signs `d` (exactly `k * tau / 8` bytes); returns the signature and the
/// derived public key (equal to what [`keygen`] returns for this seed).
pub fn sign(d: &[u8], seed: &Digest, masks: &[Digest], p: &HorstParams) -> (Signature, Digest) {
    let (mut sk, layers) = leaves_and_tree(seed, masks, p);
    let pk = tree::root(&layers);

    let indices = message_indices(d, p.tau, p.k);
    let truncated = p.truncated_depth();

    let leaves = indices
        .iter()
        .map(|&idx| {
            let full_path = tree::auth_path(&layers, idx);
            LeafReveal { sk: sk[idx], auth: full_path[..truncated].to_vec() }
        })
        .collect();
    let sigma_k = layers[truncated].clone();

    clear_digests(&mut sk);

    (Signature { leaves, sigma_k }, pk)
}

/// Verifies `d` against `sig`; returns the derived public key on success so
/// callers don't have to re-derive it, mirroring the reference's
/// "reconstructed root, or failure" shape rather than a bare boolean.
pub fn verify(d: &[u8], sig: &Signature, masks: &[Digest], p: &HorstParams) -> Result<Digest> {
    let indices = message_indices(d, p.tau, p.k);
    if sig.leaves.len() != indices.len() {
        return Err(Error::MalformedHorstLayer);
    }
    if sig.sigma_k.len() != 1usize << p.x {
        return Err(Error::MalformedHorstLayer);
    }
    let truncated = p.truncated_depth();
    let h_fn = tree_h(masks);

    for (leaf_sig, &idx) in sig.leaves.iter().zip(indices.iter()) {
        let leaf = f(&leaf_sig.sk);
        let r = tree::construct_root(&h_fn, &leaf_sig.auth, leaf, idx);
        let sigma_idx = idx >> truncated;
        let expected = *sig.sigma_k.get(sigma_idx).ok_or(Error::VerificationFailed)?;
        if r != expected {
            return Err(Error::VerificationFailed);
        }
    }

    // Continue reducing sigma_k's 2^x nodes up the remaining x layers to
    // the root, using the same absolute layer index the original tree used
    // (masks Q[2*truncated..2*tau-1] — this saturates exactly the 2*tau
    // masks HORST's own tree needs; see DESIGN.md for why the spec's
    // "tau-x further layers, Q[2(tau-x+k)]" phrasing resolves to this).
    let mut layer = sig.sigma_k.clone();
    for i in truncated..p.tau {
        let mut next = Vec::with_capacity(layer.len() / 2);
        for pair in layer.chunks_exact(2) {
            next.push(h_fn(&pair[0], &pair[1], i));
        }
        layer = next;
    }
    match layer.as_slice() {
        [root] => Ok(*root),
        _ => Err(Error::MalformedHorstLayer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_indices_all_0x01_bytes() {
        let d = [0x01u8; 64];
        let indices = message_indices(&d, 16, 32);
        assert_eq!(indices, vec![257usize; 32]);
    }

    #[test]
    fn message_indices_range_64() {
        let d: Vec<u8> = (0..64u16).map(|x| x as u8).collect();
        let indices = message_indices(&d, 16, 32);
        let expected: Vec<usize> = (0..32).map(|i| 256 + 514 * i).collect();
        assert_eq!(indices, expected);
        assert_eq!(*indices.last().unwrap(), 16190);
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let p = HorstParams::new(8, 64);
        let seed = [21u8; 32];
        let masks: Vec<Digest> = (0..2 * p.tau).map(|i| [i as u8; 32]).collect();
        let d = [0x5Au8; 64]; // k=64, tau=8 -> 64 bytes

        let expected_pk = keygen(&seed, &masks, &p);
        let (sig, pk) = sign(&d, &seed, &masks, &p);
        assert_eq!(pk, expected_pk);

        let verified_pk = verify(&d, &sig, &masks, &p).expect("verification should succeed");
        assert_eq!(verified_pk, expected_pk);
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let p = HorstParams::new(8, 64);
        let seed = [22u8; 32];
        let masks: Vec<Digest> = (0..2 * p.tau).map(|i| [i as u8; 32]).collect();
        let d = [0x5Au8; 64];

        let (mut sig, _) = sign(&d, &seed, &masks, &p);
        sig.leaves[0].sk[0] ^= 0xFF;
        assert!(verify(&d, &sig, &masks, &p).is_err());
    }

    #[test]
    fn x_maximizes_k_x_minus_2_pow_x() {
        let p = HorstParams::new(16, 32);
        for x in 0..16 {
            let candidate = (p.k as i64) * (x as i64) - (1i64 << x);
            let chosen = (p.k as i64) * (p.x as i64) - (1i64 << p.x);
            assert!(chosen >= candidate);
        }
    }
}
