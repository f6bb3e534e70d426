//! Gaussian elimination over `Z_p`, used to recover reconstruction
//! coefficients from a Monotone Span Program and a satisfying attribute set.
//!
//! Solves `M . alpha = t` for `alpha`, given `M` (m rows by n columns) and
//! `t` (length m). Pivoting is by first-nonzero entry, never by magnitude --
//! magnitude carries no meaning in `Z_p`. Free columns (those whose pivot
//! row turns out to be all-zero) are assigned `0`, which is what makes the
//! returned solution deterministic: callers after a *specific* particular
//! solution (e.g. coefficients that sum to one) bake that constraint into
//! `t` instead.
use crate::error::RabeError;
use crate::utils::linalg::{Matrix, Vector};
use rabe_bn::Fr;

/// Solves `m . alpha = t`. Returns `Err` both on shape mismatches and when
/// the system has no solution.
pub fn solve(m: &Matrix, t: &Vector) -> Result<Vector, RabeError> {
    let rows = m.num_rows();
    let cols = m.num_cols();
    if rows == 0 || cols == 0 {
        return Err(RabeError::new("gaussian: empty matrix"));
    }
    if rows != t.len() {
        return Err(RabeError::new("gaussian: row count does not match target length"));
    }

    // Augmented matrix [M | t], one extra column holding the target.
    let mut aug: Vec<Vec<Fr>> = m
        .rows
        .iter()
        .zip(t.elems.iter())
        .map(|(row, ti)| {
            let mut r = row.clone();
            r.push(*ti);
            r
        })
        .collect();

    let mut pivot_row_of_col: Vec<Option<usize>> = vec![None; cols];
    let mut pivot_row = 0usize;

    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        // first-nonzero pivot search, starting at the current pivot row.
        let found = (pivot_row..rows).find(|&r| aug[r][col] != Fr::zero());
        let sel = match found {
            Some(r) => r,
            None => continue, // free column, alpha[col] stays 0
        };
        aug.swap(pivot_row, sel);
        let inv = aug[pivot_row][col]
            .inverse()
            .ok_or_else(|| RabeError::new("gaussian: non-invertible pivot"))?;
        for v in aug[pivot_row].iter_mut() {
            *v = *v * inv;
        }
        for r in 0..rows {
            if r == pivot_row {
                continue;
            }
            let factor = aug[r][col];
            if factor == Fr::zero() {
                continue;
            }
            for c in col..=cols {
                aug[r][c] = aug[r][c] - factor * aug[pivot_row][c];
            }
        }
        pivot_row_of_col[col] = Some(pivot_row);
        pivot_row += 1;
    }

    // Any remaining all-zero row with a nonzero target entry means no solution.
    for r in pivot_row..rows {
        if aug[r][cols] != Fr::zero() {
            return Err(RabeError::new("gaussian: no solution"));
        }
    }

    let mut alpha = vec![Fr::zero(); cols];
    for col in 0..cols {
        if let Some(r) = pivot_row_of_col[col] {
            alpha[col] = aug[r][cols];
        }
    }
    Ok(Vector::new(alpha))
}

/// Convenience wrapper for the pattern every scheme's decrypt uses: given
/// the rows of the MSP restricted to the attributes a key-set actually
/// owns, find `alpha` with `alpha . owned_rows = target` (row-vector
/// convention), i.e. solve `owned_rows^T . alpha = target`.
pub fn reconstruct(owned_rows: &Matrix, target: &Vector) -> Result<Vector, RabeError> {
    solve(&owned_rows.transpose(), target)
}
