//! End-to-end coverage of the public API, exercised through the
//! `signature::{Signer, Verifier}` traits rather than the inherent
//! `sign`/`verify` methods, plus the serialization round trips a consumer
//! would actually rely on.

use signature::{Signer, Verifier};
use sphincs256::{Signature, SigningKey, SphincsTest, VerifyingKey};

#[test]
fn full_keygen_sign_verify_round_trip() {
    let mut rng = rand::rng();
    let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
    let vk = sk.verifying_key();

    for msg in [&b""[..], b"short", b"a rather longer message used to exercise Hmsg over many blocks"] {
        let sig: Signature<SphincsTest> = sk.sign(msg);
        vk.verify(msg, &sig).expect("freshly produced signature must verify");
    }
}

#[test]
fn keys_and_signature_survive_a_byte_round_trip() {
    let mut rng = rand::rng();
    let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
    let msg = b"serialize me";
    let sig = sk.sign(msg);

    let sk_bytes = sk.to_bytes();
    let vk_bytes = sk.verifying_key().to_bytes();
    let sig_bytes = sig.to_bytes();

    let sk2 = SigningKey::<SphincsTest>::try_from_bytes(&sk_bytes).unwrap();
    let vk2 = VerifyingKey::<SphincsTest>::try_from_bytes(&vk_bytes).unwrap();
    let sig2 = Signature::<SphincsTest>::try_from_bytes(&sig_bytes).unwrap();

    assert_eq!(sk, sk2);
    assert_eq!(sk.verifying_key(), vk2);
    vk2.verify(msg, &sig2).unwrap();

    // the deserialized key signs identically, since signing is deterministic
    assert_eq!(sk2.sign(msg), sig2);
}

#[test]
fn verification_rejects_a_signature_for_a_different_message() {
    let mut rng = rand::rng();
    let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
    let vk = sk.verifying_key();

    let sig = sk.sign(b"the real message");
    assert!(vk.verify(b"a different message", &sig).is_err());
}

#[test]
fn verification_rejects_a_signature_from_another_key() {
    let mut rng = rand::rng();
    let sk_a = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
    let sk_b = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
    let msg = b"whose key is this";

    let sig = sk_a.sign(msg);
    assert!(sk_b.verifying_key().verify(msg, &sig).is_err());
}

#[test]
fn truncated_key_and_signature_bytes_are_rejected() {
    let mut rng = rand::rng();
    let sk = SigningKey::<SphincsTest>::new(&mut rng).unwrap();
    let sig = sk.sign(b"x");

    let mut sk_bytes = sk.to_bytes();
    sk_bytes.pop();
    assert!(SigningKey::<SphincsTest>::try_from_bytes(&sk_bytes).is_err());

    let mut vk_bytes = sk.verifying_key().to_bytes();
    vk_bytes.pop();
    assert!(VerifyingKey::<SphincsTest>::try_from_bytes(&vk_bytes).is_err());

    let mut sig_bytes = sig.to_bytes();
    sig_bytes.pop();
    assert!(Signature::<SphincsTest>::try_from_bytes(&sig_bytes).is_err());
}
