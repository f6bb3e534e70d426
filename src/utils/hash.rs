//! Hash-to-curve and hash-to-scalar glue on top of the pairing library.
//!
//! `rabe_bn` gives us field and group arithmetic but not a hash-to-curve
//! function, so `HashG1`/`HashG2` from the external contract (§6) are built
//! here the way this codebase always has: hash the input with a
//! cryptographic hash, fold the digest into a scalar, and multiply the
//! generator by it. This is not a constant-time or domain-separated
//! hash-to-curve construction; it is adequate for the IND-CPA schemes this
//! crate implements.
use crate::utils::field::bytes_to_fr;
use rabe_bn::{Fr, G1, G2};
use sha3::{Digest, Sha3_256};

/// The 256-bit hash used for key derivation in [`super::envelope`] and as
/// the basis of [`hash_g1`]/[`hash_g2`].
pub fn hash_256(data: &[u8]) -> [u8; 32] {
    let digest = Sha3_256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `HashZp(bytes)`: folds a digest into a scalar, for schemes that need a
/// per-string field element rather than a group point (e.g. a large-universe
/// attribute offset).
pub fn hash_to_fr(data: &[u8]) -> Fr {
    bytes_to_fr(&hash_256(data))
}

/// `HashG1(bytes)`.
pub fn hash_g1(data: &[u8]) -> G1 {
    G1::one() * hash_to_fr(data)
}

/// `HashG2(bytes)`.
pub fn hash_g2(data: &[u8]) -> G2 {
    G2::one() * hash_to_fr(data)
}

/// Concatenates label parts with `:` the way every scheme in this crate
/// builds hash-to-curve inputs (attribute name, role tag, authority id...).
pub fn label(parts: &[&str]) -> Vec<u8> {
    parts.join(":").into_bytes()
}
