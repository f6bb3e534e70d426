//! Arithmetic helpers over the scalar field `Fr` of the pairing group.
//!
//! `Fr` itself (addition, multiplication, inversion, negation) comes from
//! `rabe_bn`; this module only adds the small amount of glue the schemes
//! need on top: uniform sampling, conversion from plain integers, and the
//! sign convention used throughout §4 (store every scalar canonically
//! reduced, fold signs into the group element being multiplied instead of
//! keeping a signed field element around).
use rabe_bn::{pairing, Fr, G1, G2, Gt};
use rand::Rng;

/// Samples a uniform element of `Z_p`.
pub fn sample_uniform<R: Rng>(rng: &mut R) -> Fr {
    rng.gen()
}

/// Samples `n` uniform elements of `Z_p`.
pub fn sample_uniform_vec<R: Rng>(rng: &mut R, n: usize) -> Vec<Fr> {
    (0..n).map(|_| sample_uniform(rng)).collect()
}

/// Samples a uniform element of the target group `Gt` the way the rest of
/// this codebase always has: as the pairing of two independently random
/// source-group elements, since `Gt` has no public generator of its own to
/// exponentiate.
pub fn sample_gt<R: Rng>(rng: &mut R) -> Gt {
    pairing(G1::random(rng), G2::random(rng))
}

/// Converts a small non-negative integer into `Fr`.
pub fn usize_to_fr(i: usize) -> Fr {
    let mut acc = Fr::zero();
    let one = Fr::one();
    for _ in 0..i {
        acc = acc + one;
    }
    acc
}

/// Converts an MSP matrix entry (`-1`, `0`, `1`) into its canonically
/// reduced field representative.
pub fn signed_to_fr(s: i8) -> Fr {
    match s.signum() {
        0 => Fr::zero(),
        1 => Fr::one(),
        _ => Fr::zero() - Fr::one(),
    }
}

/// Interprets `bytes` as a big-endian base-256 integer and reduces it into
/// `Fr` via Horner's method, using only the field ops `Fr` already exposes.
/// Used to fold a hash digest into a scalar for hash-to-curve.
pub fn bytes_to_fr(bytes: &[u8]) -> Fr {
    let mut base = Fr::one();
    let two = Fr::one() + Fr::one();
    for _ in 0..8 {
        base = base * two;
    }
    let mut acc = Fr::zero();
    for &byte in bytes {
        acc = acc * base + usize_to_fr(byte as usize);
    }
    acc
}
