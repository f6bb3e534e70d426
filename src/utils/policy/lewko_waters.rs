//! The Lewko-Waters reduction itself: walks the parse tree produced by
//! [`super::parser`] and builds the MSP matrix, tracking a label vector `v`
//! and a running column counter `c` as described in §4.3.
use super::attribute::AttributeIdentifier;
use super::parser::Ast;
use super::Msp;
use crate::error::RabeError;
use crate::utils::linalg::Matrix;
use rabe_bn::Fr;

const ZERO: i8 = 0;
const PLUS: i8 = 1;
const MINUS: i8 = -1;

/// One step of the reduction: compiles `ast` under label vector `v` and
/// column counter `c`, returning the rows produced (zero-padded to the
/// final column count reached), the attribute each row is labeled with, and
/// that final column count.
fn reduce<A: AttributeIdentifier>(
    ast: &Ast,
    v: &[i8],
    c: usize,
) -> Result<(Vec<Vec<i8>>, Vec<A>, usize), RabeError> {
    match ast {
        Ast::Attr(token) => {
            let attrib = A::parse_token(token)?;
            let mut row = v.to_vec();
            row.resize(c, ZERO);
            Ok((vec![row], vec![attrib], c))
        }
        Ast::Or(l, r) => {
            let (mut l_rows, mut l_attrs, c1) = reduce::<A>(l, v, c)?;
            let (r_rows, r_attrs, c_out) = reduce::<A>(r, v, c1)?;
            for row in l_rows.iter_mut() {
                row.resize(c_out, ZERO);
            }
            l_rows.extend(r_rows);
            l_attrs.extend(r_attrs);
            Ok((l_rows, l_attrs, c_out))
        }
        Ast::And(l, r) => {
            let mut v1 = vec![ZERO; c];
            v1.push(MINUS);
            let mut v2 = v.to_vec();
            v2.resize(c, ZERO);
            v2.push(PLUS);
            let (mut l_rows, mut l_attrs, c1) = reduce::<A>(l, &v1, c + 1)?;
            let (r_rows, r_attrs, c_out) = reduce::<A>(r, &v2, c1)?;
            for row in l_rows.iter_mut() {
                row.resize(c_out, ZERO);
            }
            l_rows.extend(r_rows);
            l_attrs.extend(r_attrs);
            Ok((l_rows, l_attrs, c_out))
        }
    }
}

/// Right-multiplies `rows` (each already zero-padded to `c` columns) by the
/// upper-triangular `c x c` matrix `T` whose first row is all ones and
/// whose remaining diagonal entries are one (zero elsewhere), which is the
/// unique such `T` that is both upper-triangular and sends `[1,0,...,0]` to
/// `[1,1,...,1]` under the row-vector convention `alpha . Mat = target`
/// used throughout this crate. In closed form: `row'[0] = row[0]`,
/// `row'[j] = row[0] + row[j]` for `j > 0`.
fn rebase_to_ones(rows: &mut [Vec<Fr>]) {
    for row in rows.iter_mut() {
        if row.is_empty() {
            continue;
        }
        let first = row[0];
        for entry in row.iter_mut().skip(1) {
            *entry = *entry + first;
        }
    }
}

pub fn compile<A: AttributeIdentifier>(
    ast: &Ast,
    convert_to_ones: bool,
) -> Result<Msp<A>, RabeError> {
    let (rows_signed, attrs, c) = reduce::<A>(ast, &[PLUS], 1)?;
    let mut rows: Vec<Vec<Fr>> = rows_signed
        .into_iter()
        .map(|row| row.into_iter().map(crate::utils::field::signed_to_fr).collect())
        .collect();
    if convert_to_ones {
        rebase_to_ones(&mut rows);
    }
    let mat = Matrix::new(rows)?;
    Ok(Msp {
        mat,
        row_to_attrib: attrs,
        c,
        convert_to_ones,
    })
}
