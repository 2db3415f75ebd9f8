//! The hyper-tree: per-level subtree construction shared by keygen, sign
//! and verify. A "subtree" here is one level's `2^subh`-leaf WOTS+/L-tree
//! hash tree, addressed by `(level, subtree_index)`; the orchestrator in
//! [`crate::signing_key`] and [`crate::verifying_key`] chains `d` of these
//! together, each one certifying the root of the one below it.

use alloc::vec::Vec;

use crate::address;
use crate::bytes::{xor_fixed, Digest};
use crate::hashes::{f, fa, g, h};
use crate::tree::{self, Layers};
use crate::wots::{self, l_tree_mask_offset, WotsParams};

/// `H'(x, y, i) = H(x ^ Q[2i], y ^ Q[2i+1])`, the L-tree combining function.
/// Always indexes `masks` from 0 — the L-tree's own layer count
/// (`ceil_log2(l)`) never depends on which hyper-tree level it's called
/// from.
fn ltree_h(masks: &[Digest]) -> impl Fn(&Digest, &Digest, usize) -> Digest + '_ {
    move |x, y, i| h(&xor_fixed(x, &masks[2 * i]), &xor_fixed(y, &masks[2 * i + 1]))
}

/// L-tree compresses a WOTS+ public key (`l` chain outputs) into a single
/// hyper-tree leaf.
pub fn ltree_leaf(wots_pk: &[Digest], masks: &[Digest]) -> Digest {
    tree::root(&tree::l_tree(ltree_h(masks), wots_pk))
}

/// The combining function for the outer (per-level) hash tree: `Qtree =
/// Q[2*ceil_log2(l)..]`, indexed only by the tree's own local layer `i`
/// (`0..subh`). Every hyper-tree level recomputes and reuses this exact
/// same mask slice — there is no per-level offset (`SPHINCS.py`'s
/// `wots_path`/`keygen_pub`/`verify` all build `Qtree` identically and
/// index it by the local layer alone).
fn outer_h(masks: &[Digest], l: usize) -> impl Fn(&Digest, &Digest, usize) -> Digest + '_ {
    let base = l_tree_mask_offset(l);
    let qtree = &masks[base..];
    move |x, y, i| h(&xor_fixed(x, &qtree[2 * i]), &xor_fixed(y, &qtree[2 * i + 1]))
}

/// The hyper-tree leaf at `(level, subtree, leaf)`: derive a WOTS+ seed
/// from `sk1` via `Fa`, run the full WOTS+ keygen chain, and L-tree
/// compress the result.
pub fn wots_leaf(level: u64, subtree: u64, leaf: u64, sk1: &Digest, masks: &[Digest], wp: &WotsParams) -> Digest {
    let addr = address::encode(level, subtree, leaf);
    let seed = fa(&addr, sk1);
    let pk = wots::keygen(&seed, masks, wp, &f, &g);
    ltree_leaf(&pk, masks)
}

/// Builds every leaf of the subtree at `(level, subtree)` and reduces them
/// with the outer-tree combining function, returning the full layer
/// sequence so callers can both take the root (keygen) and extract an
/// authentication path (sign).
pub fn subtree_layers(
    level: u64,
    subtree: u64,
    sk1: &Digest,
    masks: &[Digest],
    wp: &WotsParams,
    subh: usize,
    l: usize,
) -> Layers<Digest> {
    let leaves: Vec<Digest> =
        (0..(1u64 << subh)).map(|leaf| wots_leaf(level, subtree, leaf, sk1, masks, wp)).collect();
    tree::hash_tree(outer_h(masks, l), &leaves)
}

/// The root of a subtree's layer sequence — the value the next hyper-tree
/// level's WOTS+ instance signs.
pub fn subtree_root(layers: &Layers<Digest>) -> Digest {
    tree::root(layers)
}

/// The authentication path to `leaf` within a subtree's layer sequence.
pub fn subtree_auth_path(layers: &Layers<Digest>, leaf: u64) -> Vec<Digest> {
    tree::auth_path(layers, leaf as usize)
}

/// Reconstructs a subtree root from a leaf and its authentication path.
/// Used by verification, which never has the full layer sequence — only
/// the one path the signature carries.
pub fn construct_root_for_level(masks: &[Digest], l: usize, path: &[Digest], leaf: Digest, idx: usize) -> Digest {
    tree::construct_root(outer_h(masks, l), path, leaf, idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParameterSet, SphincsTest};

    #[test]
    fn subtree_auth_path_reconstructs_its_own_root() {
        let wp = SphincsTest::wots_params();
        let subh = SphincsTest::subh();
        let l = wp.l;
        let sk1 = [3u8; 32];
        let masks: Vec<Digest> = (0..SphincsTest::mask_count()).map(|i| [i as u8; 32]).collect();

        let layers = subtree_layers(1, 5, &sk1, &masks, &wp, subh, l);
        let root = subtree_root(&layers);

        for leaf_idx in 0..(1u64 << subh) {
            let leaf = wots_leaf(1, 5, leaf_idx, &sk1, &masks, &wp);
            let path = subtree_auth_path(&layers, leaf_idx);
            let reconstructed = construct_root_for_level(&masks, l, &path, leaf, leaf_idx as usize);
            assert_eq!(reconstructed, root);
        }
    }
}
