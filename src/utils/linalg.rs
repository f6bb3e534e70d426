//! Dense vectors and matrices over `Z_p`.
//!
//! Row-major, total modulo dimension compatibility: every operation that can
//! fail on mismatched shapes returns a [`RabeError`] rather than panicking.
use crate::error::RabeError;
use rabe_bn::Fr;

/// A dense vector over `Z_p`.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    pub elems: Vec<Fr>,
}

impl Vector {
    pub fn new(elems: Vec<Fr>) -> Vector {
        Vector { elems }
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Dot product; fails if the two vectors have different lengths.
    pub fn dot(&self, other: &Vector) -> Result<Fr, RabeError> {
        if self.len() != other.len() {
            return Err(RabeError::new("dot: dimension mismatch"));
        }
        let mut acc = Fr::zero();
        for i in 0..self.len() {
            acc = acc + self.elems[i] * other.elems[i];
        }
        Ok(acc)
    }
}

/// A dense matrix over `Z_p`, stored as an ordered sequence of row vectors
/// of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub rows: Vec<Vec<Fr>>,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<Fr>>) -> Result<Matrix, RabeError> {
        if rows.is_empty() {
            return Err(RabeError::new("matrix: empty matrix is not allowed"));
        }
        let width = rows[0].len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(RabeError::new("matrix: rows must be non-empty and of equal length"));
        }
        Ok(Matrix { rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.rows[0].len()
    }

    /// `self^T`.
    pub fn transpose(&self) -> Matrix {
        let (r, c) = (self.num_rows(), self.num_cols());
        let mut out = vec![vec![Fr::zero(); r]; c];
        for i in 0..r {
            for j in 0..c {
                out[j][i] = self.rows[i][j];
            }
        }
        Matrix { rows: out }
    }

    /// `self * v`.
    pub fn mul_vec(&self, v: &Vector) -> Result<Vector, RabeError> {
        if self.num_cols() != v.len() {
            return Err(RabeError::new("mul_vec: dimension mismatch"));
        }
        let mut out = Vec::with_capacity(self.num_rows());
        for row in &self.rows {
            let mut acc = Fr::zero();
            for (a, b) in row.iter().zip(v.elems.iter()) {
                acc = acc + *a * *b;
            }
            out.push(acc);
        }
        Ok(Vector::new(out))
    }

    /// Row-vector times matrix: `v^T * self`, i.e. the linear combination of
    /// `self`'s rows weighted by `v`. This is the convention every scheme in
    /// this crate uses for reconstruction: `alpha . Mat = target`.
    pub fn vec_mul(&self, v: &Vector) -> Result<Vector, RabeError> {
        if self.num_rows() != v.len() {
            return Err(RabeError::new("vec_mul: dimension mismatch"));
        }
        let mut out = vec![Fr::zero(); self.num_cols()];
        for (row, coeff) in self.rows.iter().zip(v.elems.iter()) {
            for (j, entry) in row.iter().enumerate() {
                out[j] = out[j] + *coeff * *entry;
            }
        }
        Ok(Vector::new(out))
    }

    /// `self * other`.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix, RabeError> {
        if self.num_cols() != other.num_rows() {
            return Err(RabeError::new("mul: dimension mismatch"));
        }
        let (r, k, c) = (self.num_rows(), self.num_cols(), other.num_cols());
        let mut out = vec![vec![Fr::zero(); c]; r];
        for i in 0..r {
            for j in 0..c {
                let mut acc = Fr::zero();
                for l in 0..k {
                    acc = acc + self.rows[i][l] * other.rows[l][j];
                }
                out[i][j] = acc;
            }
        }
        Matrix::new(out)
    }
}
