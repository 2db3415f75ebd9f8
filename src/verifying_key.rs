//! `VerifyingKey`: the SPHINCS verify orchestration (spec §4.8).

use alloc::vec::Vec;
use core::marker::PhantomData;

use signature::Verifier;

use crate::bytes::Digest;
use crate::error::{Error, Result};
use crate::hashes::{f, h_msg};
use crate::horst;
use crate::hypertree;
use crate::params::ParameterSet;
use crate::signature_encoding::Signature;
use crate::wots;

/// A `VerifyingKey` is a SPHINCS-256 public key: the hyper-tree root `PK1`
/// plus the shared mask pool `Q` (public, unlike `SK1`/`SK2` — spec §3).
#[derive(Debug)]
pub struct VerifyingKey<P: ParameterSet> {
    pk1: Digest,
    masks: Vec<Digest>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> Clone for VerifyingKey<P> {
    fn clone(&self) -> Self {
        VerifyingKey { pk1: self.pk1, masks: self.masks.clone(), _params: PhantomData }
    }
}

impl<P: ParameterSet> PartialEq for VerifyingKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.pk1 == other.pk1 && self.masks == other.masks
    }
}
impl<P: ParameterSet> Eq for VerifyingKey<P> {}

impl<P: ParameterSet> VerifyingKey<P> {
    pub(crate) fn from_parts(pk1: Digest, masks: Vec<Digest>) -> Self {
        VerifyingKey { pk1, masks, _params: PhantomData }
    }

    /// Verifies `sig` over `message`, per spec §4.8 Verify. Returns
    /// `Ok(())` on success; a mismatch anywhere in the chain (HORST's
    /// `sigma_k`, any hyper-tree level, or the final root) is
    /// [`Error::VerificationFailed`] — a normal negative result, not an
    /// exceptional one (spec §7).
    ///
    /// # Errors
    /// Returns [`Error::VerificationFailed`] if the signature does not
    /// verify, or [`Error::MalformedHorstLayer`] if the HORST portion has
    /// an inconsistent shape (wrong `sigma_k` length).
    pub fn verify(&self, message: &[u8], sig: &Signature<P>) -> Result<()> {
        if sig.levels.len() != P::D {
            return Err(Error::VerificationFailed);
        }

        let wp = P::wots_params();
        let hp = P::horst_params();
        let subh = P::subh();
        let subh_mask = (1u64 << subh) - 1;

        let d = h_msg(&sig.r1, message);
        let mut pk = horst::verify(&d, &sig.horst_sig, &self.masks, &hp)?;

        let mut idx = sig.index;
        for hyper_level in &sig.levels {
            let pk_wots = wots::pk_from_sig(&pk, &hyper_level.wots_sig, &self.masks, &wp, &f);
            let leaf = hypertree::ltree_leaf(&pk_wots, &self.masks);
            let local_idx = (idx & subh_mask) as usize;
            pk = hypertree::construct_root_for_level(&self.masks, wp.l, &hyper_level.auth_path, leaf, local_idx);
            idx >>= subh;
        }

        if pk == self.pk1 {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }

    /// Serializes the verifying key per spec §6: `PK1 ‖ Q`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + self.masks.len() * 32);
        out.extend_from_slice(&self.pk1);
        for mask in &self.masks {
            out.extend_from_slice(mask);
        }
        out
    }

    /// Parses a verifying key from its spec §6 byte layout.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVerifyingKeyLength`] if `bytes` is not
    /// exactly `32 + P::mask_count() * 32` bytes, or
    /// [`Error::InvalidParameter`] if `P` fails its own self-consistency
    /// check.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        P::validate()?;
        let expected = 32 + P::mask_count() * 32;
        if bytes.len() != expected {
            return Err(Error::InvalidVerifyingKeyLength { expected, got: bytes.len() });
        }
        let mut pk1 = [0u8; 32];
        pk1.copy_from_slice(&bytes[..32]);
        let masks = bytes[32..].chunks_exact(32).map(|c| c.try_into().expect("32-byte chunk")).collect();
        Ok(Self::from_parts(pk1, masks))
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for VerifyingKey<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from_bytes(bytes)
    }
}

impl<P: ParameterSet> Verifier<Signature<P>> for VerifyingKey<P> {
    fn verify(&self, msg: &[u8], sig: &Signature<P>) -> core::result::Result<(), signature::Error> {
        VerifyingKey::verify(self, msg, sig).map_err(|_| signature::Error::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SphincsTest;
    use crate::signing_key::SigningKey;

    #[test]
    fn verifying_key_round_trips_through_bytes() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let vk = sk.verifying_key();
        let bytes = vk.to_bytes();
        let parsed = VerifyingKey::<SphincsTest>::try_from_bytes(&bytes).unwrap();
        assert_eq!(vk, parsed);
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let vk = sk.verifying_key();
        let msg = b"a message of any length works";
        let sig = sk.sign(msg);
        assert!(vk.verify(msg, &sig).is_ok());
    }

    #[test]
    fn verify_fails_on_tampered_message() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let vk = sk.verifying_key();
        let sig = sk.sign(b"original message");
        assert!(vk.verify(b"tampered message", &sig).is_err());
    }

    #[test]
    fn verify_fails_on_tampered_signature() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let vk = sk.verifying_key();
        let msg = b"original message";
        let mut sig = sk.sign(msg);
        sig.levels[0].wots_sig[0][0] ^= 0xFF;
        assert!(vk.verify(msg, &sig).is_err());
    }

    #[test]
    fn verify_fails_with_wrong_verifying_key() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let other = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let msg = b"original message";
        let sig = sk.sign(msg);
        assert!(other.verifying_key().verify(msg, &sig).is_err());
    }
}
