//! Parameter sets: `Sphincs256` (the production shape) and `SphincsTest`
//! (a reduced shape used by this crate's own test suite). `n` is not part
//! of the trait because it is fixed at 256 bits throughout — the ChaCha and
//! BLAKE bindings in `hashes.rs` are only defined at that width.

use alloc::string::ToString;

use crate::bytes::{ceil_log2, MESSAGE_DIGEST_BITS};
use crate::error::{Error, Result};
use crate::horst::HorstParams;
use crate::wots::WotsParams;

/// The leaf address field is fixed at 5 bits regardless of parameter set
/// (see `address.rs`), which bounds how many subtree leaves (`2^subh`) a
/// hyper-tree layer may address.
const MAX_SUBH: usize = 5;

/// A SPHINCS-256 parameter set: hyper-tree height `h`, layer count `d`,
/// Winternitz parameter `w`, HORST depth `tau` and index count `k`.
pub trait ParameterSet: Clone + core::fmt::Debug {
    const NAME: &'static str;
    const H: usize;
    const D: usize;
    const W: usize;
    const TAU: usize;
    const K: usize;

    /// `h / d`, the height of each per-level hyper-tree subtree.
    fn subh() -> usize {
        Self::H / Self::D
    }

    fn wots_params() -> WotsParams {
        WotsParams::new(Self::W)
    }

    fn horst_params() -> HorstParams {
        HorstParams::new(Self::TAU, Self::K)
    }

    /// `p = max(w-1, 2*(h + ceil_log2(l)), 2*tau)`, the size of the shared
    /// mask pool `Q`.
    fn mask_count() -> usize {
        let l = Self::wots_params().l;
        let a = Self::W - 1;
        let b = 2 * (Self::H + ceil_log2(l));
        let c = 2 * Self::TAU;
        a.max(b).max(c)
    }

    /// Checks the self-consistency invariants a parameter set must satisfy
    /// before it can be used: `w` a power of two, `d` dividing `h`, `k*tau`
    /// matching the fixed 512-bit message digest, `tau` byte-aligned (so
    /// `message_indices` can chunk whole bytes), `subh` fitting the 5-bit
    /// leaf address field, and `h` fitting the 64-bit big-endian index
    /// extraction.
    fn validate() -> Result<()> {
        if !Self::W.is_power_of_two() || Self::W < 2 {
            return Err(Error::InvalidParameter {
                reason: "w must be a power of two greater than 1".to_string(),
            });
        }
        if Self::D == 0 || Self::H % Self::D != 0 {
            return Err(Error::InvalidParameter { reason: "d must evenly divide h".to_string() });
        }
        if Self::K * Self::TAU != MESSAGE_DIGEST_BITS {
            return Err(Error::InvalidParameter {
                reason: "k * tau must equal the 512-bit message digest width".to_string(),
            });
        }
        if Self::TAU % 8 != 0 {
            return Err(Error::InvalidParameter {
                reason: "tau must be a multiple of 8".to_string(),
            });
        }
        if Self::subh() > MAX_SUBH {
            return Err(Error::InvalidParameter {
                reason: "h/d must fit the 5-bit leaf address field".to_string(),
            });
        }
        if Self::H == 0 || Self::H > 64 {
            return Err(Error::InvalidParameter {
                reason: "h must be in 1..=64 for the big-endian index extraction".to_string(),
            });
        }
        Ok(())
    }
}

/// The production parameter set: n=256, h=60, d=12, w=16, tau=16, k=32,
/// l=67.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sphincs256;

impl ParameterSet for Sphincs256 {
    const NAME: &'static str = "SPHINCS-256";
    const H: usize = 60;
    const D: usize = 12;
    const W: usize = 16;
    const TAU: usize = 16;
    const K: usize = 32;
}

/// A reduced parameter set used only by this crate's own tests, so full
/// keygen/sign/verify can run without a 2^16-leaf HORST tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SphincsTest;

impl ParameterSet for SphincsTest {
    const NAME: &'static str = "SPHINCS-256-test";
    const H: usize = 8;
    const D: usize = 2;
    const W: usize = 4;
    const TAU: usize = 8;
    const K: usize = 64;
}
