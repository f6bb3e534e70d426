//! Vectors of group elements and the mixed field/group algebra the schemes
//! need: scalar-multiplying a group vector by a field vector/matrix, and
//! pairing two group vectors together component-wise.
//!
//! `G1` and `G2` are additive (`+`, scalar `*`); `Gt` is written
//! multiplicatively (`*` is the group op, `.pow()` is scalar exponentiation)
//! -- the same asymmetry the underlying pairing library exposes, so this
//! module keeps small, non-generic helpers rather than forcing a common
//! trait onto groups that don't share one. Matrices are taken as raw
//! `&[Vec<_>]` rather than [`super::linalg::Matrix`], since the callers that
//! need this (DIPPE's per-authority `W^T A`, built as a group-valued matrix
//! from the start) have no field-only matrix to wrap.
use crate::error::RabeError;
use rabe_bn::{pairing, Fr, G1, G2, Gt};

/// `g1 . scalars`, i.e. the point-wise scalar multiple of the generator `g1`
/// by every entry of `scalars`.
pub fn mul_g1(scalars: &[Fr]) -> Vec<G1> {
    let g = G1::one();
    scalars.iter().map(|s| g * *s).collect()
}

/// A `G1`-valued matrix times a field vector: each output row is the row's
/// entries scalar-multiplied by the matching entry of `v` and summed.
pub fn mat_g1_mul_vec(mat: &[Vec<G1>], v: &[Fr]) -> Result<Vec<G1>, RabeError> {
    if mat.iter().any(|row| row.len() != v.len()) {
        return Err(RabeError::new("mat_g1_mul_vec: dimension mismatch"));
    }
    Ok(mat
        .iter()
        .map(|row| row.iter().zip(v.iter()).fold(G1::zero(), |acc, (g, s)| acc + *g * *s))
        .collect())
}

/// A field matrix times a `G2`-valued vector: each output row is the row's
/// (field) entries scalar-multiplying the matching entry of `v` and summed.
pub fn mat_mul_vec_g2(mat: &[Vec<Fr>], v: &[G2]) -> Result<Vec<G2>, RabeError> {
    if mat.iter().any(|row| row.len() != v.len()) {
        return Err(RabeError::new("mat_mul_vec_g2: dimension mismatch"));
    }
    Ok(mat
        .iter()
        .map(|row| row.iter().zip(v.iter()).fold(G2::zero(), |acc, (s, g)| acc + *g * *s))
        .collect())
}

/// Component-wise pairing-and-accumulate: `prod_i e(a_i, b_i)` in `Gt`.
/// This is the operation `LinAlg`'s `Dot` performs once the vectors live in
/// `G1`/`G2` rather than `Z_p`: addition becomes the `Gt` group operation.
pub fn pair_dot(a: &[G1], b: &[G2]) -> Result<Gt, RabeError> {
    if a.len() != b.len() {
        return Err(RabeError::new("pair_dot: dimension mismatch"));
    }
    Ok(a.iter()
        .zip(b.iter())
        .fold(Gt::one(), |acc, (x, y)| acc * pairing(*x, *y)))
}
