use super::ntt::Ntt;
use super::num_mod::{Field, InvOp, ModOp};
use crate::error::{Error, Result};

/// Coefficient list of a polynomial or truncated power series; index `i` holds `[x^i]`.
///
/// Trailing zeros are kept unless removed with `pop_zeros`; an empty list is the
/// zero polynomial.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Poly(pub Vec<u32>);

impl Poly {
    pub fn new(coeffs: Vec<u32>) -> Self {
        Self(coeffs)
    }
    pub fn zero() -> Self {
        Self(vec![])
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn pop_zeros(&mut self) {
        while self.0.last() == Some(&0) {
            self.0.pop();
        }
    }
    pub fn trimmed(mut self) -> Self {
        self.pop_zeros();
        self
    }
    // size - 1, without trimming; None for the empty list
    pub fn degree(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }
    pub fn coeff(&self, i: usize) -> u32 {
        self.0.get(i).copied().unwrap_or(0)
    }
    pub fn reverse(&mut self) {
        self.0.reverse()
    }
    pub fn mod_xk(mut self, k: usize) -> Self {
        self.0.truncate(k);
        self
    }
    pub fn mul_xk(self, k: usize) -> Self {
        std::iter::repeat(0).take(k).chain(self.0).collect()
    }
    pub fn div_xk(mut self, k: u64) -> Self {
        let k = usize::try_from(k).map_or(self.0.len(), |k| k.min(self.0.len()));
        self.0.drain(..k);
        self
    }
    // Truncates or zero-pads to exactly n coefficients
    pub fn resized(mut self, n: usize) -> Self {
        self.0.resize(n, 0);
        self
    }
}

impl From<Vec<u32>> for Poly {
    fn from(coeffs: Vec<u32>) -> Self {
        Self(coeffs)
    }
}

impl From<&[u32]> for Poly {
    fn from(coeffs: &[u32]) -> Self {
        Self(coeffs.to_vec())
    }
}

impl FromIterator<u32> for Poly {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Power series arithmetic over the field of an [`Ntt`].
#[derive(Debug, Clone, Copy)]
pub struct PolyOp<'a, M> {
    ntt: &'a Ntt<M>,
}

impl<'a, M: Field> PolyOp<'a, M> {
    pub fn new(ntt: &'a Ntt<M>) -> Self {
        Self { ntt }
    }

    pub fn field(&self) -> &'a M {
        self.ntt.op()
    }

    pub fn add(&self, f: &Poly, g: &Poly) -> Poly {
        let op = self.field();
        let mut res = f.clone().resized(f.len().max(g.len()));
        res.0.iter_mut().zip(&g.0).for_each(|(a, &b)| *a = op.add(*a, b));
        res
    }

    pub fn sub(&self, f: &Poly, g: &Poly) -> Poly {
        let op = self.field();
        let mut res = f.clone().resized(f.len().max(g.len()));
        res.0.iter_mut().zip(&g.0).for_each(|(a, &b)| *a = op.sub(*a, b));
        res
    }

    pub fn mul(&self, f: &Poly, g: &Poly) -> Result<Poly> {
        self.ntt.convolve(&f.0, &g.0).map(Poly)
    }

    /// First `n` coefficients of `1 / f`, by Newton's iteration `res <- 2 res - f res^2`.
    pub fn inv(&self, f: &Poly, n: usize) -> Result<Poly> {
        let op = self.field();
        if f.coeff(0) == 0 {
            return Err(Error::ZeroConstantTerm);
        }

        let mut res = Poly::new(vec![op.inv(f.0[0])?]);
        let mut k = 1;
        while k < n {
            k *= 2;
            let sq = self.mul(&res, &res)?;
            let prod = self.mul(&f.clone().mod_xk(k), &sq)?.resized(k);
            res = res.resized(k);
            res.0
                .iter_mut()
                .zip(&prod.0)
                .for_each(|(r, &p)| *r = op.sub(op.add(*r, *r), p));
        }
        Ok(res.resized(n))
    }

    /// Quotient of polynomial division, via reversal and a series inverse.
    pub fn div(&self, f: &Poly, g: &Poly) -> Result<Poly> {
        let mut f = f.clone().trimmed();
        let mut g = g.clone().trimmed();
        if g.is_empty() {
            return Err(Error::DivisionByZero);
        }
        if f.len() < g.len() {
            return Ok(Poly::zero());
        }

        let n_quot = f.len() - g.len() + 1;
        f.reverse();
        g.reverse();
        let f = f.mod_xk(n_quot);
        let g_inv = self.inv(&g.mod_xk(n_quot), n_quot)?;
        let mut q = self.mul(&f, &g_inv)?.resized(n_quot);
        q.reverse();
        Ok(q)
    }

    pub fn div_rem(&self, f: &Poly, g: &Poly) -> Result<(Poly, Poly)> {
        let q = self.div(f, g)?;
        let r = self.sub(f, &self.mul(g, &q)?).trimmed();
        let g_len = g.clone().trimmed().len();
        assert!(r.len() < g_len, "remainder must have lower degree than divisor");
        Ok((q, r))
    }

    pub fn rem(&self, f: &Poly, g: &Poly) -> Result<Poly> {
        self.div_rem(f, g).map(|(_, r)| r)
    }
}
