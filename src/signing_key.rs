//! `SigningKey`: hyper-tree keygen and the full SPHINCS sign orchestration
//! (spec §4.8).

use alloc::vec::Vec;
use core::marker::PhantomData;

use rand_core::CryptoRng;
use signature::Signer;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::address;
use crate::bytes::{be_bits_from_msb, Digest};
use crate::error::{Error, Result};
use crate::hashes::{f, fa, frand, g, h_msg};
use crate::horst;
use crate::hypertree;
use crate::params::ParameterSet;
use crate::signature_encoding::{HyperLevel, Signature};
use crate::verifying_key::VerifyingKey;
use crate::wots;

/// A `SigningKey` holds the two secret seeds (`SK1`, `SK2`) and the shared
/// mask pool `Q`; it allows signing any number of messages without
/// maintaining state between calls (spec §9: "there is no signing-state
/// counter").
#[derive(Clone, Debug)]
pub struct SigningKey<P: ParameterSet> {
    sk1: Digest,
    sk2: Digest,
    masks: Vec<Digest>,
    verifying_key: VerifyingKey<P>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> PartialEq for SigningKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.sk1 == other.sk1 && self.sk2 == other.sk2 && self.masks == other.masks
    }
}
impl<P: ParameterSet> Eq for SigningKey<P> {}

#[cfg(feature = "zeroize")]
impl<P: ParameterSet> Drop for SigningKey<P> {
    fn drop(&mut self) {
        self.sk1.zeroize();
        self.sk2.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl<P: ParameterSet> ZeroizeOnDrop for SigningKey<P> {}

impl<P: ParameterSet> SigningKey<P> {
    /// Generates a new signing key: `SK1`, `SK2` and the `p`-element mask
    /// pool `Q` are all drawn from `rng` (spec §4.8 keygen step 1), then
    /// `PK1` is derived by building the top-level (`level = d-1, subtree =
    /// 0`) hyper-tree subtree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if `P` fails its own
    /// self-consistency check.
    pub fn new<R: CryptoRng + ?Sized>(rng: &mut R) -> Result<Self> {
        P::validate()?;

        let mut sk1 = [0u8; 32];
        rng.fill_bytes(&mut sk1);
        let mut sk2 = [0u8; 32];
        rng.fill_bytes(&mut sk2);
        let masks: Vec<Digest> = (0..P::mask_count())
            .map(|_| {
                let mut m = [0u8; 32];
                rng.fill_bytes(&mut m);
                m
            })
            .collect();

        Ok(Self::from_parts(sk1, sk2, masks))
    }

    pub(crate) fn from_parts(sk1: Digest, sk2: Digest, masks: Vec<Digest>) -> Self {
        let wp = P::wots_params();
        let subh = P::subh();
        let layers = hypertree::subtree_layers((P::D - 1) as u64, 0, &sk1, &masks, &wp, subh, wp.l);
        let pk1 = hypertree::subtree_root(&layers);
        let verifying_key = VerifyingKey::from_parts(pk1, masks.clone());
        SigningKey { sk1, sk2, masks, verifying_key, _params: PhantomData }
    }

    /// The public key corresponding to this signing key.
    pub fn verifying_key(&self) -> VerifyingKey<P> {
        self.verifying_key.clone()
    }

    /// Signs `message`, per spec §4.8 Sign. Deterministic: the randomizer
    /// `R` is derived from `SK2` and `message` via `Frand`, not drawn from
    /// an RNG — two calls with the same message produce the same
    /// signature.
    pub fn sign(&self, message: &[u8]) -> Signature<P> {
        let wp = P::wots_params();
        let hp = P::horst_params();
        let subh = P::subh();
        let subh_mask = (1u64 << subh) - 1;

        let r = frand(message, &self.sk2);
        let mut r1 = [0u8; 32];
        r1.copy_from_slice(&r[..32]);
        let r2 = &r[32..64];
        let d = h_msg(&r1, message);
        let index = be_bits_from_msb(r2, P::H);

        let mut subtree = index >> subh;
        let mut leaf = index & subh_mask;

        let seed_h = fa(&address::encode(P::D as u64, subtree, leaf), &self.sk1);
        let (horst_sig, pk_horst) = horst::sign(&d, &seed_h, &self.masks, &hp);

        let mut pk = pk_horst;
        let mut levels = Vec::with_capacity(P::D);
        for level in 0..P::D {
            let level = level as u64;
            let seed_w = fa(&address::encode(level, subtree, leaf), &self.sk1);
            let wots_sig = wots::sign(&pk, &seed_w, &self.masks, &wp, &f, &g);

            let layers = hypertree::subtree_layers(level, subtree, &self.sk1, &self.masks, &wp, subh, wp.l);
            let auth_path = hypertree::subtree_auth_path(&layers, leaf);
            pk = hypertree::subtree_root(&layers);

            levels.push(HyperLevel { wots_sig, auth_path });

            leaf = subtree & subh_mask;
            subtree >>= subh;
        }

        Signature { index, r1, horst_sig, levels, _params: PhantomData }
    }

    /// Serializes the signing key per spec §6: `SK1 ‖ SK2 ‖ Q`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64 + self.masks.len() * 32);
        out.extend_from_slice(&self.sk1);
        out.extend_from_slice(&self.sk2);
        for mask in &self.masks {
            out.extend_from_slice(mask);
        }
        out
    }

    /// Parses a signing key from its spec §6 byte layout.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSigningKeyLength`] if `bytes` is not exactly
    /// `64 + P::mask_count() * 32` bytes, or [`Error::InvalidParameter`] if
    /// `P` fails its own self-consistency check.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        P::validate()?;
        let expected = 64 + P::mask_count() * 32;
        if bytes.len() != expected {
            return Err(Error::InvalidSigningKeyLength { expected, got: bytes.len() });
        }
        let mut sk1 = [0u8; 32];
        sk1.copy_from_slice(&bytes[..32]);
        let mut sk2 = [0u8; 32];
        sk2.copy_from_slice(&bytes[32..64]);
        let masks = bytes[64..].chunks_exact(32).map(|c| c.try_into().expect("32-byte chunk")).collect();
        Ok(Self::from_parts(sk1, sk2, masks))
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for SigningKey<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_bytes(bytes)
    }
}

impl<P: ParameterSet> Signer<Signature<P>> for SigningKey<P> {
    fn try_sign(&self, msg: &[u8]) -> core::result::Result<Signature<P>, signature::Error> {
        Ok(self.sign(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SphincsTest;

    #[test]
    fn keygen_is_deterministic_given_the_same_seed_material() {
        let sk1 = [1u8; 32];
        let sk2 = [2u8; 32];
        let masks: Vec<Digest> = (0..SphincsTest::mask_count()).map(|i| [i as u8; 32]).collect();

        let a = SigningKey::<SphincsTest>::from_parts(sk1, sk2, masks.clone());
        let b = SigningKey::<SphincsTest>::from_parts(sk1, sk2, masks);
        assert_eq!(a.verifying_key(), b.verifying_key());
    }

    #[test]
    fn signing_key_round_trips_through_bytes() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let bytes = sk.to_bytes();
        let parsed = SigningKey::<SphincsTest>::try_from_bytes(&bytes).unwrap();
        assert_eq!(sk, parsed);
    }

    #[test]
    fn two_signatures_of_the_same_message_are_identical() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let msg = b"deterministic signing";
        assert_eq!(sk.sign(msg), sk.sign(msg));
    }
}
