//! The `Signature` type and its fixed byte layout (spec §6): `i ‖ R1 ‖
//! sigma_HORST ‖` one `(sigma_WOTS, auth_path)` pair per hyper-tree level.
//!
//! Note that this is a large heap-allocated value and may run to tens of
//! kilobytes at the default parameter set. There are no invariants
//! maintained by this struct beyond shape — every field is a hash value or
//! a flat sequence of them.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::bytes::Digest;
use crate::error::{Error, Result};
use crate::horst;
use crate::params::ParameterSet;

/// One hyper-tree level's contribution to a signature: the WOTS+ signature
/// over the level below's root, and the authentication path certifying its
/// own L-tree leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperLevel {
    pub(crate) wots_sig: Vec<Digest>,
    pub(crate) auth_path: Vec<Digest>,
}

/// A parsed SPHINCS-256 signature for a given parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<P: ParameterSet> {
    pub(crate) index: u64,
    pub(crate) r1: Digest,
    pub(crate) horst_sig: horst::Signature,
    pub(crate) levels: Vec<HyperLevel>,
    pub(crate) _params: PhantomData<P>,
}

fn idx_byte_len(h: usize) -> usize {
    h.div_ceil(8)
}

fn pack_index(i: u64, h: usize) -> Vec<u8> {
    i.to_le_bytes()[..idx_byte_len(h)].to_vec()
}

fn unpack_index(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

impl<P: ParameterSet> Signature<P> {
    /// Serializes the signature per spec §6: `i ‖ R1 ‖ sigma_HORST ‖` one
    /// `(sigma_WOTS, path)` pair per level, with `sigma_HORST` itself laid
    /// out as `k` leaf reveals followed by the published `sigma_k` layer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&pack_index(self.index, P::H));
        out.extend_from_slice(&self.r1);

        for leaf in &self.horst_sig.leaves {
            out.extend_from_slice(&leaf.sk);
            for sibling in &leaf.auth {
                out.extend_from_slice(sibling);
            }
        }
        for node in &self.horst_sig.sigma_k {
            out.extend_from_slice(node);
        }

        for level in &self.levels {
            for chain_out in &level.wots_sig {
                out.extend_from_slice(chain_out);
            }
            for sibling in &level.auth_path {
                out.extend_from_slice(sibling);
            }
        }
        out
    }

    /// The exact encoded length for this parameter set, independent of any
    /// particular signature value.
    pub fn encoded_len(&self) -> usize {
        encoded_len::<P>()
    }

    /// Parses a signature from its spec §6 byte layout. Fails with
    /// [`Error::InvalidSignatureLength`] if `bytes` is not exactly the
    /// length this parameter set produces.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        P::validate()?;
        let wp = P::wots_params();
        let hp = P::horst_params();
        let subh = P::subh();
        let idx_len = idx_byte_len(P::H);
        let truncated = hp.truncated_depth();

        let expected = encoded_len::<P>();
        if bytes.len() != expected {
            return Err(Error::InvalidSignatureLength { expected, got: bytes.len() });
        }

        let mut pos = 0usize;
        let mut take = |n: usize| {
            let s = &bytes[pos..pos + n];
            pos += n;
            s
        };

        let index = unpack_index(take(idx_len));
        let mut r1 = [0u8; 32];
        r1.copy_from_slice(take(32));

        let mut leaves = Vec::with_capacity(hp.k);
        for _ in 0..hp.k {
            let mut sk = [0u8; 32];
            sk.copy_from_slice(take(32));
            let auth = (0..truncated)
                .map(|_| {
                    let mut d = [0u8; 32];
                    d.copy_from_slice(take(32));
                    d
                })
                .collect();
            leaves.push(horst::LeafReveal { sk, auth });
        }
        let sigma_k = (0..(1usize << hp.x))
            .map(|_| {
                let mut d = [0u8; 32];
                d.copy_from_slice(take(32));
                d
            })
            .collect();
        let horst_sig = horst::Signature { leaves, sigma_k };

        let mut levels = Vec::with_capacity(P::D);
        for _ in 0..P::D {
            let wots_sig = (0..wp.l)
                .map(|_| {
                    let mut d = [0u8; 32];
                    d.copy_from_slice(take(32));
                    d
                })
                .collect();
            let auth_path = (0..subh)
                .map(|_| {
                    let mut d = [0u8; 32];
                    d.copy_from_slice(take(32));
                    d
                })
                .collect();
            levels.push(HyperLevel { wots_sig, auth_path });
        }

        debug_assert_eq!(pos, bytes.len());
        Ok(Signature { index, r1, horst_sig, levels, _params: PhantomData })
    }
}

fn encoded_len<P: ParameterSet>() -> usize {
    let wp = P::wots_params();
    let hp = P::horst_params();
    let subh = P::subh();
    let idx_len = idx_byte_len(P::H);
    let horst_leaf_len = 32 + hp.truncated_depth() * 32;
    let horst_sig_len = hp.k * horst_leaf_len + (1usize << hp.x) * 32;
    let level_len = (wp.l + subh) * 32;
    idx_len + 32 + horst_sig_len + P::D * level_len
}

impl<P: ParameterSet> TryFrom<&[u8]> for Signature<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_bytes(bytes)
    }
}

impl<P: ParameterSet> From<&Signature<P>> for Vec<u8> {
    fn from(sig: &Signature<P>) -> Vec<u8> {
        sig.to_bytes()
    }
}
