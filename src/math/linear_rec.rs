use log::debug;

use super::num_mod::{Field, ModOp};
use super::poly::{Poly, PolyOp};
use super::rational::consecutive_terms_of_frac;
use crate::error::{Error, Result};

/// `a_i = sum_j coeffs[j] * a_{i-1-j}` for `i >= d`, seeded with `init = [a_0, .., a_{d-1}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    init: Vec<u32>,
    coeffs: Vec<u32>,
}

impl Recurrence {
    pub fn new(init: Vec<u32>, coeffs: Vec<u32>) -> Result<Self> {
        if init.len() != coeffs.len() {
            return Err(Error::LengthMismatch {
                terms: init.len(),
                coeffs: coeffs.len(),
            });
        }
        Ok(Self { init, coeffs })
    }

    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    pub fn init(&self) -> &[u32] {
        &self.init
    }

    pub fn coeffs(&self) -> &[u32] {
        &self.coeffs
    }
}

pub fn next<M: ModOp<u32>>(op: &M, coeffs: &[u32], seq: &[u32]) -> u32 {
    debug_assert!(seq.len() >= coeffs.len());
    coeffs
        .iter()
        .zip(seq.iter().rev())
        .fold(op.zero(), |acc, (&c, &a)| op.add(acc, op.mul(c, a)))
}

// naive O((k + m) d)
pub fn terms_naive<M: ModOp<u32>>(op: &M, rec: &Recurrence, k: usize, m: usize) -> Vec<u32> {
    let mut seq = rec.init.clone();
    while seq.len() < k + m {
        let value = next(op, &rec.coeffs, &seq);
        seq.push(value);
    }
    seq[k..k + m].to_vec()
}

/// `[a_k, a_{k+1}, .., a_{k+m-1}]` of a linear recurrent sequence.
///
/// The generating function is split as `R + P/Q` with `Q = 1 - sum_j coeffs[j] x^{j+1}`
/// and `deg P < deg Q`; `R` only has finitely many terms, and the window of `P/Q` is
/// extracted by doubling on `x^{-k} mod Q`.
pub fn consecutive_terms<M: Field>(
    ops: &PolyOp<'_, M>,
    rec: &Recurrence,
    k: u64,
    m: usize,
) -> Result<Vec<u32>> {
    let op = ops.field();
    let d = rec.order();

    let q: Poly = std::iter::once(op.one())
        .chain(rec.coeffs.iter().map(|&c| op.neg(c)))
        .collect();
    let q = q.trimmed();

    // A(x) Q(x) mod x^d = P(x) + Q(x) R(x)
    let t = ops.mul(&Poly::from(rec.init.as_slice()), &q)?.mod_xk(d);
    let (r, p) = ops.div_rem(&t, &q)?;
    debug!(
        "recurrence of order {}: deg Q = {}, polynomial part has {} terms",
        d,
        q.len().saturating_sub(1),
        r.len()
    );

    let r = r.div_xk(k).resized(m);
    let s = consecutive_terms_of_frac(ops, &p, &q, k, m)?;
    Ok(r.0.iter().zip(&s).map(|(&a, &b)| op.add(a, b)).collect())
}
