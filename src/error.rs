//! Errors used throughout this crate.

use alloc::string::String;

/// Errors returned by this crate's fallible operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `ParameterSet` fails its own self-consistency check.
    #[error("invalid parameter set: {reason}")]
    InvalidParameter {
        /// Human-readable description of which invariant failed.
        reason: String,
    },
    /// A seed or mask slice handed to a primitive has the wrong length.
    #[error("invalid seed length: expected {expected}, got {got}")]
    InvalidSeedLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
    /// A secret key byte-slice has the wrong length.
    #[error("invalid signing key length: expected {expected}, got {got}")]
    InvalidSigningKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
    /// A public key byte-slice has the wrong length.
    #[error("invalid verifying key length: expected {expected}, got {got}")]
    InvalidVerifyingKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
    /// A signature byte-slice has the wrong length.
    #[error("invalid signature length: expected {expected}, got {got}")]
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
    /// A HORST signature's sibling layer has a node count that does not
    /// match `2^x` for the pruned index it was found at.
    #[error("malformed HORST signature layer")]
    MalformedHorstLayer,
    /// Signature verification failed. This is the normal, expected outcome
    /// of a rejected signature, not an exceptional I/O or encoding failure;
    /// it is cheap and infallible to construct.
    #[error("signature verification failed")]
    VerificationFailed,
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;
