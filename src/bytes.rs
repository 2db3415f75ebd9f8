//! Fixed-width byte operations and the little-endian integer codecs used
//! throughout the scheme.
//!
//! Per spec: every protocol-visible integer is little-endian *except* the
//! randomizer-derived index extraction (`be_bits_from_msb`), which is
//! big-endian by design — see the module-level note in [`crate::hashes`].

use alloc::vec::Vec;

/// Output width, in bytes, of every hash value in the scheme (n/8 for n=256).
pub const HASH_LEN: usize = 32;

/// Output width, in bits, of every hash value in the scheme.
pub const HASH_LEN_BITS: usize = HASH_LEN * 8;

/// Bit length of the message digest D produced by `Hmsg` (fixed by BLAKE-512).
pub const MESSAGE_DIGEST_BITS: usize = 512;

/// A single `n`-bit hash value.
pub type Digest = [u8; HASH_LEN];

/// XORs two equal-length byte slices. Panics if the lengths differ.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    assert_eq!(a.len(), b.len(), "xor: operand length mismatch");
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// Clears a scratch buffer of derived secret material (per-node WOTS+/HORST
/// secrets, the raw keystream they're chunked from) before it is dropped,
/// when the `zeroize` feature is enabled. A no-op otherwise — the buffer is
/// simply dropped normally.
pub fn clear_digests(buf: &mut Vec<Digest>) {
    #[cfg(feature = "zeroize")]
    zeroize::Zeroize::zeroize(buf);
    #[cfg(not(feature = "zeroize"))]
    let _ = buf;
}

/// As [`clear_digests`], for a raw byte buffer.
pub fn clear_bytes(buf: &mut [u8]) {
    #[cfg(feature = "zeroize")]
    zeroize::Zeroize::zeroize(buf);
    #[cfg(not(feature = "zeroize"))]
    let _ = buf;
}

/// XORs two digests element-wise.
pub fn xor_fixed(a: &Digest, b: &Digest) -> Digest {
    let mut out = [0u8; HASH_LEN];
    for i in 0..HASH_LEN {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Splits `a` into contiguous `n`-byte slices; the last may be short.
pub fn chunk(a: &[u8], n: usize) -> Vec<&[u8]> {
    a.chunks(n).collect()
}

/// Splits `a` into exact-multiple `n`-byte digests. Panics if `a.len()` is
/// not a multiple of `n`.
pub fn chunk_digests(a: &[u8], n: usize) -> Vec<Digest> {
    assert_eq!(a.len() % n, 0, "chunk_digests: length is not a multiple of n");
    assert_eq!(n, HASH_LEN, "chunk_digests only supports HASH_LEN-sized chunks");
    a.chunks_exact(n)
        .map(|c| c.try_into().expect("chunk has exact length"))
        .collect()
}

/// `ceil(log2(x))`, with `ceil_log2(0) == ceil_log2(1) == 0`.
pub fn ceil_log2(x: usize) -> usize {
    if x <= 1 {
        0
    } else {
        (x - 1).ilog2() as usize + 1
    }
}

/// Extracts `count` base-`2^log_w` digits from `bytes`, interpreted as one
/// little-endian integer, least-significant digit first.
///
/// Requires `log_w` to divide 8 evenly (true for every Winternitz parameter
/// used by this scheme, where `w` is a power of two no larger than 256), so
/// that no digit straddles a byte boundary.
pub fn base_w(bytes: &[u8], log_w: u32, count: usize) -> Vec<u32> {
    debug_assert!(log_w > 0 && 8 % log_w == 0, "log_w must divide 8");
    let mask = (1u32 << log_w) - 1;
    let mut out = Vec::with_capacity(count);
    let mut bit_pos = 0usize;
    for _ in 0..count {
        let byte_idx = bit_pos / 8;
        let bit_in_byte = bit_pos % 8;
        let byte = bytes.get(byte_idx).copied().unwrap_or(0);
        out.push((u32::from(byte) >> bit_in_byte) & mask);
        bit_pos += log_w as usize;
    }
    out
}

/// Decomposes the plain integer `x` into `count` base-`w` digits,
/// least-significant first (used for the WOTS+ checksum, which unlike the
/// message digits is never byte-encoded before decomposition).
pub fn int_to_basew(mut x: u64, w: usize, count: usize) -> Vec<usize> {
    let w = w as u64;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push((x % w) as usize);
        x /= w;
    }
    out
}

/// Extracts the most-significant `nbits` bits of the big-endian bit-stream
/// of `bytes`, returned right-aligned in a `u64`. Equivalent to
/// `(BE integer of bytes) >> (bytes.len() * 8 - nbits)`. `nbits` must be at
/// most 64.
pub fn be_bits_from_msb(bytes: &[u8], nbits: usize) -> u64 {
    debug_assert!(nbits <= 64, "be_bits_from_msb supports at most 64 bits");
    let mut acc: u64 = 0;
    let mut taken = 0usize;
    for &byte in bytes {
        if taken >= nbits {
            break;
        }
        let take = (nbits - taken).min(8);
        let top_bits = byte >> (8 - take);
        acc = (acc << take) | u64::from(top_bits);
        taken += take;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_roundtrip() {
        let a = [0xAAu8; HASH_LEN];
        let b = [0x55u8; HASH_LEN];
        let x = xor_fixed(&a, &b);
        assert_eq!(x, [0xFFu8; HASH_LEN]);
        assert_eq!(xor_fixed(&x, &b), a);
    }

    #[test]
    #[should_panic]
    fn xor_mismatched_lengths_panics() {
        xor(&[1, 2, 3], &[1, 2]);
    }

    #[test]
    fn ceil_log2_matches_expected() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(67), 7); // WOTS+ l=67 for the default parameter set
    }

    #[test]
    fn base_w_extracts_nibbles_little_endian() {
        // 0x01 0x23 little-endian -> low nibble of byte0 is the least
        // significant base-16 digit.
        let digits = base_w(&[0x01, 0x23], 4, 4);
        assert_eq!(digits, vec![1, 0, 3, 2]);
    }

    #[test]
    fn int_to_basew_matches_repeated_divmod() {
        assert_eq!(int_to_basew(0, 16, 3), vec![0, 0, 0]);
        assert_eq!(int_to_basew(255, 16, 3), vec![15, 15, 0]);
        assert_eq!(int_to_basew(4097, 16, 4), vec![1, 0, 1, 0]);
    }

    #[test]
    fn be_bits_from_msb_extracts_top_bits() {
        // 256-bit all-ones value; top 60 bits should be all ones too.
        let bytes = [0xFFu8; 32];
        assert_eq!(be_bits_from_msb(&bytes, 60), (1u64 << 60) - 1);

        // A single 0x01 byte, top 4 bits, should be 0 (0000); bottom nibble
        // is where the 1 lives.
        assert_eq!(be_bits_from_msb(&[0x01], 4), 0);
        assert_eq!(be_bits_from_msb(&[0x10], 4), 1);
    }
}
