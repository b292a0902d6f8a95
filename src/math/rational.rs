use log::trace;

use super::num_mod::{Field, InvOp, ModOp};
use super::poly::{Poly, PolyOp};
use crate::error::{Error, Result};

// x^{-1} mod Q: writing Q = c + x Q', x (-Q'/c) = 1 (mod Q)
fn inv_x_mod<M: Field>(ops: &PolyOp<'_, M>, q: &Poly) -> Result<Poly> {
    let op = ops.field();
    let neg_inv_q0 = op.neg(op.inv(q.0[0])?);
    Ok(q.0[1..].iter().map(|&c| op.mul(c, neg_inv_q0)).collect())
}

// x^{-k} mod Q
//
// With f = x^{-ceil(k/2)} mod Q, x^{-k} = f^2 (k even) or x f^2 (k odd). Unrolled, the
// chain of ceil-halvings from k down to 1 reads the bits of k - 1 from the top:
// a set bit squares, a clear bit squares and multiplies by x.
fn inv_x_pow_mod<M: Field>(ops: &PolyOp<'_, M>, q: &Poly, k: u64) -> Result<Poly> {
    let d = q.len() - 1;
    if k == 0 {
        return Ok(if d > 0 { Poly::new(vec![ops.field().one()]) } else { Poly::zero() });
    }

    let mut f = inv_x_mod(ops, q)?;
    let j = k - 1;
    let n_bits = u64::BITS - j.leading_zeros();
    for i in (0..n_bits).rev() {
        let mut sq = ops.mul(&f, &f)?;
        if (j >> i) & 1 == 0 {
            sq = sq.mul_xk(1);
        }
        f = ops.rem(&sq, q)?;
    }
    Ok(f)
}

/// `[x^k], [x^{k+1}], .., [x^{k+m-1}]` of the series `p / q`.
///
/// `q` must have a nonzero constant term and no trailing zeros, and `deg p < deg q`.
/// Runs in O(d log d log k + m log m) for d = deg q.
pub fn consecutive_terms_of_frac<M: Field>(
    ops: &PolyOp<'_, M>,
    p: &Poly,
    q: &Poly,
    k: u64,
    m: usize,
) -> Result<Vec<u32>> {
    if q.is_empty() || q.0[0] == 0 || q.0[q.len() - 1] == 0 {
        return Err(Error::InvalidDenominator);
    }
    let p = p.clone().trimmed();
    if p.len() >= q.len() {
        return Err(Error::ImproperFraction {
            numer: p.len(),
            denom: q.len(),
        });
    }
    trace!("extracting {} terms of P/Q at offset {}, deg Q = {}", m, k, q.len() - 1);

    // P/Q = R + x^k P_k/Q with P_k = x^{-k} P (mod Q), deg R < k
    let inv_x_k = inv_x_pow_mod(ops, q, k)?;
    let p_k = ops.rem(&ops.mul(&inv_x_k, &p)?, q)?;
    let terms = ops.mul(&p_k, &ops.inv(q, m)?)?.resized(m);
    Ok(terms.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ntt::Ntt;
    use crate::math::num_mod::{Mod998244353, PowBy, DEFAULT_MODULUS};
    use crate::test_utils::Rng;

    // Long division of the series p / q, one coefficient at a time.
    fn expand_naive<M: Field>(op: &M, p: &Poly, q: &Poly, n: usize) -> Vec<u32> {
        let q0_inv = op.inv(q.0[0]).unwrap();
        let mut res: Vec<u32> = Vec::with_capacity(n);
        for i in 0..n {
            let mut acc = p.coeff(i);
            for j in 1..q.len().min(i + 1) {
                acc = op.sub(acc, op.mul(q.0[j], res[i - j]));
            }
            res.push(op.mul(acc, q0_inv));
        }
        res
    }

    fn random_frac(rng: &mut Rng, d: usize) -> (Poly, Poly) {
        let mut q = Poly::new(rng.residues(d + 1, DEFAULT_MODULUS));
        q.0[0] = rng.range_u32(1..DEFAULT_MODULUS);
        q.0[d] = rng.range_u32(1..DEFAULT_MODULUS);
        let p = Poly::new(rng.residues(d, DEFAULT_MODULUS));
        (p, q)
    }

    #[test]
    fn test_matches_expansion() {
        let ntt = Ntt::new(Mod998244353::new()).unwrap();
        let ops = PolyOp::new(&ntt);
        let mut rng = Rng::new(21);
        for d in 0..=10 {
            let (p, q) = random_frac(&mut rng, d);
            let expanded = expand_naive(ntt.op(), &p, &q, 3000);
            for k in [0, 1, 2, 3, 7, 64, 65, 1000, 2987] {
                for m in [0, 1, 4, 13] {
                    let terms = consecutive_terms_of_frac(&ops, &p, &q, k, m).unwrap();
                    assert_eq!(terms, &expanded[k as usize..k as usize + m], "{:?}", (d, k, m));
                }
            }
        }
    }

    #[test]
    fn test_large_offset() {
        let ntt = Ntt::new(Mod998244353::new()).unwrap();
        let ops = PolyOp::new(&ntt);
        let mut rng = Rng::new(22);
        let (p, q) = random_frac(&mut rng, 10);
        let expanded = expand_naive(ntt.op(), &p, &q, 1_000_010);
        for k in [999_983u64, 1_000_000] {
            let terms = consecutive_terms_of_frac(&ops, &p, &q, k, 10).unwrap();
            assert_eq!(terms, &expanded[k as usize..k as usize + 10]);
        }
    }

    #[test]
    fn test_geometric_series() {
        // 1 / (1 - 2x) = sum 2^i x^i
        let ntt = Ntt::new(Mod998244353::new()).unwrap();
        let ops = PolyOp::new(&ntt);
        let op = ntt.op();
        let q = Poly::new(vec![1, DEFAULT_MODULUS - 2]);
        let p = Poly::new(vec![1]);
        let k = 1u64 << 62;
        let terms = consecutive_terms_of_frac(&ops, &p, &q, k, 3).unwrap();
        let base = op.pow(2, k);
        assert_eq!(terms, vec![base, op.mul(base, 2), op.mul(base, 4)]);
    }

    #[test]
    fn test_constant_denominator() {
        let ntt = Ntt::new(Mod998244353::new()).unwrap();
        let ops = PolyOp::new(&ntt);
        let q = Poly::new(vec![5]);
        for k in [0, 1, 2, u64::MAX] {
            let terms = consecutive_terms_of_frac(&ops, &Poly::zero(), &q, k, 3).unwrap();
            assert_eq!(terms, vec![0, 0, 0]);
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        let ntt = Ntt::new(Mod998244353::new()).unwrap();
        let ops = PolyOp::new(&ntt);
        let p = Poly::new(vec![1]);
        for q in [vec![], vec![0, 1], vec![1, 2, 0]] {
            assert!(matches!(
                consecutive_terms_of_frac(&ops, &p, &Poly::new(q), 5, 1),
                Err(Error::InvalidDenominator)
            ));
        }
        let q = Poly::new(vec![1, 1]);
        assert!(matches!(
            consecutive_terms_of_frac(&ops, &Poly::new(vec![1, 2]), &q, 5, 1),
            Err(Error::ImproperFraction { numer: 2, denom: 2 })
        ));
        // trailing zeros in the numerator do not count towards its degree
        assert!(consecutive_terms_of_frac(&ops, &Poly::new(vec![1, 0, 0]), &q, 5, 1).is_ok());
    }
}
