#![cfg_attr(not(feature = "alloc"), no_std)]
#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::clone_on_copy)]
#![deny(missing_docs)]

//! # Usage
//!
//! ```
//! use sphincs256::{Sphincs256, SigningKey};
//! use signature::{Signer, Verifier};
//!
//! let mut rng = rand::rng();
//!
//! // Generate a signing key for the default parameter set.
//! let sk = SigningKey::<Sphincs256>::new(&mut rng).unwrap();
//!
//! // Derive the corresponding public key and distribute its bytes.
//! let vk = sk.verifying_key();
//! let vk_bytes = vk.to_bytes();
//!
//! // Signing is deterministic: no RNG is consulted.
//! let message = b"Hello world";
//! let sig = sk.sign(message);
//!
//! let vk_deserialized = vk_bytes.as_slice().try_into().unwrap();
//! assert_eq!(vk, vk_deserialized);
//! assert!(vk_deserialized.verify(message, &sig).is_ok());
//! ```

extern crate alloc;

pub use signature;

mod address;
mod blake;
mod bytes;
mod chacha;
mod error;
mod hashes;
mod horst;
mod hypertree;
mod params;
mod signature_encoding;
mod signing_key;
mod tree;
mod verifying_key;
mod wots;

pub use error::{Error, Result};
pub use params::{ParameterSet, Sphincs256, SphincsTest};
pub use signature_encoding::{HyperLevel, Signature};
pub use signing_key::SigningKey;
pub use verifying_key::VerifyingKey;

#[cfg(test)]
mod tests {
    use super::*;
    use signature::{Signer, Verifier};

    fn test_sign_verify<P: ParameterSet>() {
        let mut rng = rand::rng();
        let sk = SigningKey::<P>::new(&mut rng).unwrap();
        let vk = sk.verifying_key();
        let msg = b"Hello, world!";
        let sig = sk.try_sign(msg).unwrap();
        vk.verify(msg, &sig).unwrap();
    }

    #[test]
    fn sign_verify_sphincs_test_params() {
        test_sign_verify::<SphincsTest>();
    }

    #[test]
    fn fails_on_modified_message() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let msg = b"Hello, world!";
        let modified_msg = b"Goodbye, world!";

        let sig = sk.try_sign(msg).unwrap();
        let vk = sk.verifying_key();
        assert!(vk.verify(msg, &sig).is_ok());
        assert!(vk.verify(modified_msg, &sig).is_err());
    }

    #[test]
    fn fails_with_wrong_verifying_key() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let wrong_sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let msg = b"Hello, world!";

        let sig = sk.try_sign(msg).unwrap();
        let vk = sk.verifying_key();
        let wrong_vk = wrong_sk.verifying_key();
        assert!(vk.verify(msg, &sig).is_ok());
        assert!(wrong_vk.verify(msg, &sig).is_err());
    }

    #[test]
    fn fails_on_modified_signature() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let msg = b"Hello, world!";

        let mut sig_bytes = sk.try_sign(msg).unwrap().to_bytes();
        sig_bytes[0] ^= 0xff;
        let sig = sig_bytes.as_slice().try_into().unwrap();

        let vk = sk.verifying_key();
        assert!(
            vk.verify(msg, &sig).is_err(),
            "Verification should fail with a modified signature"
        );
    }

    #[test]
    fn successive_signatures_of_the_same_message_are_equal() {
        let mut rng = rand::rng();
        let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
        let msg = b"Hello, world!";

        let sig1 = sk.try_sign(msg).unwrap();
        let sig2 = sk.try_sign(msg).unwrap();

        assert_eq!(sig1, sig2, "signing is deterministic: no per-call randomness");
    }
}
