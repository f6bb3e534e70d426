//! Monotone boolean policy parsing and compilation to a Monotone Span
//! Program, following Lewko & Waters, "Decentralizing Attribute-Based
//! Encryption", Appendix G.
//!
//! Grammar (whitespace-insensitive):
//!
//! ```text
//! Expr      := Term | Expr "OR" Expr | Expr "AND" Expr | "(" Expr ")" | Attribute
//! Attribute := attribute token (integer or colon/underscore identifier)
//! ```
//!
//! `AND`/`OR` are picked by scanning left-to-right at brace-depth 0 for the
//! first operator keyword encountered -- not by any notion of AND binding
//! tighter than OR. This gives a right-associative, equal-precedence parse
//! that is unusual for a boolean grammar but is exactly what the Lewko-Waters
//! construction below assumes; a conventional precedence-climbing parser
//! would silently produce a different (and wrong) MSP.
use crate::error::RabeError;
use rabe_bn::Fr;

mod attribute;
mod lewko_waters;
mod parser;

pub use attribute::AttributeIdentifier;

/// A Monotone Span Program: an `r`-row by `c`-column matrix over `Z_p`
/// together with a map from row index to the attribute that row is labeled
/// with.
///
/// Semantic invariant: a set of attributes `A` satisfies the MSP iff the
/// rows whose attribute lies in `A` span `target()` in `Z_p^c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Msp<A: AttributeIdentifier> {
    pub mat: crate::utils::linalg::Matrix,
    pub row_to_attrib: Vec<A>,
    pub c: usize,
    convert_to_ones: bool,
}

impl<A: AttributeIdentifier> Msp<A> {
    /// The target vector rows are combined to reach: `[1,0,...,0]` in the
    /// raw Lewko-Waters basis, or `[1,1,...,1]` after the optional rebase.
    pub fn target(&self) -> crate::utils::linalg::Vector {
        let mut v = vec![Fr::zero(); self.c];
        if self.convert_to_ones {
            for x in v.iter_mut() {
                *x = Fr::one();
            }
        } else {
            v[0] = Fr::one();
        }
        crate::utils::linalg::Vector::new(v)
    }

    /// Returns the row indices whose attribute lies in `owned`, in MSP row
    /// order, together with the attribute each selected row is labeled with.
    pub fn rows_for(&self, owned: &[A]) -> Vec<(usize, A)> {
        self.row_to_attrib
            .iter()
            .enumerate()
            .filter(|(_, a)| owned.iter().any(|o| o == *a))
            .map(|(i, a)| (i, a.clone()))
            .collect()
    }

    /// Fails unless every attribute labels at most one row; required by
    /// FAME and MA-ABE, whose ciphertext/key structure assumes a bijection
    /// between rows and attributes.
    pub fn require_injective(&self) -> Result<(), RabeError> {
        for i in 0..self.row_to_attrib.len() {
            for j in (i + 1)..self.row_to_attrib.len() {
                if self.row_to_attrib[i] == self.row_to_attrib[j] {
                    return Err(RabeError::new(
                        "msp: row-to-attribute map is not injective (duplicate attribute)",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Parses `expr` and compiles it to a Monotone Span Program.
///
/// `convert_to_ones` selects the post-processing basis change from §4.3:
/// when `true`, `Mat` is right-multiplied so the realizing target becomes
/// `[1,1,...,1]` instead of the raw Lewko-Waters `[1,0,...,0]`.
pub fn boolean_to_msp<A: AttributeIdentifier>(
    expr: &str,
    convert_to_ones: bool,
) -> Result<Msp<A>, RabeError> {
    let ast = parser::parse(expr)?;
    lewko_waters::compile(&ast, convert_to_ones)
}
