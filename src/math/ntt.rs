use log::trace;

use super::num_mod::{Field, InvOp, ModOp, PowBy};
use super::prime;
use crate::error::{Error, Result};

pub const DEFAULT_NAIVE_THRESHOLD: usize = 60;

// Smallest transform issued by `convolve` under the default threshold is 2^7 points.
const MIN_TWO_ADICITY: u32 = 7;

/// Roots of unity for every power-of-two order the modulus supports.
///
/// `root[i]` has order `2^i` and `iroot[i]` is its inverse. `rate2` and `rate3`
/// (with their inverses) advance the twiddle factor from one butterfly block to
/// the next, indexed by the number of trailing ones of the block index.
#[derive(Debug, Clone)]
pub struct RootTable {
    rank2: u32,
    root: Vec<u32>,
    iroot: Vec<u32>,
    rate2: Vec<u32>,
    irate2: Vec<u32>,
    rate3: Vec<u32>,
    irate3: Vec<u32>,
}

impl RootTable {
    fn new<M: Field>(op: &M) -> Result<Self> {
        let m = op.modulus();
        if !prime::is_prime(m) {
            return Err(Error::NotNttFriendly {
                modulus: m,
                reason: "modulus is not prime",
            });
        }
        let rank2 = prime::two_adicity(m);
        if rank2 < MIN_TWO_ADICITY {
            return Err(Error::NotNttFriendly {
                modulus: m,
                reason: "m - 1 has too few factors of two",
            });
        }

        let g = prime::primitive_root(m);
        let n_levels = rank2 as usize + 1;
        let mut root = vec![op.zero(); n_levels];
        let mut iroot = vec![op.zero(); n_levels];
        root[rank2 as usize] = op.pow(g, ((m - 1) >> rank2) as u64);
        iroot[rank2 as usize] = op.inv(root[rank2 as usize])?;
        for i in (0..rank2 as usize).rev() {
            root[i] = op.mul(root[i + 1], root[i + 1]);
            iroot[i] = op.mul(iroot[i + 1], iroot[i + 1]);
        }

        let rates = |step: usize| {
            let mut rate = Vec::with_capacity(n_levels - step);
            let mut irate = Vec::with_capacity(n_levels - step);
            let (mut prod, mut iprod) = (op.one(), op.one());
            for i in 0..n_levels - step {
                rate.push(op.mul(root[i + step], prod));
                irate.push(op.mul(iroot[i + step], iprod));
                prod = op.mul(prod, iroot[i + step]);
                iprod = op.mul(iprod, root[i + step]);
            }
            (rate, irate)
        };
        let (rate2, irate2) = rates(2);
        let (rate3, irate3) = rates(3);

        Ok(Self {
            rank2,
            root,
            iroot,
            rate2,
            irate2,
            rate3,
            irate3,
        })
    }
}

fn trailing_ones(s: usize) -> usize {
    (!s).trailing_zeros() as usize
}

/// Number-theoretic transform over a prime field, with its precomputed roots.
#[derive(Debug, Clone)]
pub struct Ntt<M> {
    op: M,
    table: RootTable,
    naive_threshold: usize,
}

impl<M: Field> Ntt<M> {
    pub fn new(op: M) -> Result<Self> {
        let table = RootTable::new(&op)?;
        Ok(Self {
            op,
            table,
            naive_threshold: DEFAULT_NAIVE_THRESHOLD,
        })
    }

    pub fn with_naive_threshold(mut self, naive_threshold: usize) -> Self {
        self.naive_threshold = naive_threshold;
        self
    }

    pub fn op(&self) -> &M {
        &self.op
    }

    pub fn naive_threshold(&self) -> usize {
        self.naive_threshold
    }

    pub fn max_len(&self) -> usize {
        1 << self.table.rank2
    }

    fn check_len(&self, n: usize) -> Result<u32> {
        if !n.is_power_of_two() {
            return Err(Error::NotPowerOfTwo(n));
        }
        let h = n.trailing_zeros();
        if h > self.table.rank2 {
            return Err(Error::TransformTooLong {
                len: n,
                max_log2: self.table.rank2,
                modulus: self.op.modulus(),
            });
        }
        Ok(h)
    }

    /// Forward transform in place. The output order is the one `inverse_transform` consumes.
    pub fn transform(&self, xs: &mut [u32]) -> Result<()> {
        let h = self.check_len(xs.len())?;
        let op = &self.op;
        let table = &self.table;

        // xs[i], xs[i + (n >> len)], xs[i + 2 * (n >> len)], .. are transformed
        let mut len = 0;
        while len < h {
            if h - len == 1 {
                // radix-2 butterfly
                let p = 1 << (h - len - 1);
                let mut rot = op.one();
                for (s, t) in xs.chunks_exact_mut(p * 2).enumerate() {
                    let (t0, t1) = t.split_at_mut(p);
                    for (a0, a1) in t0.iter_mut().zip(t1) {
                        let l = *a0;
                        let r = op.mul(*a1, rot);
                        *a0 = op.add(l, r);
                        *a1 = op.sub(l, r);
                    }
                    if s + 1 != 1 << len {
                        rot = op.mul(rot, table.rate2[trailing_ones(s)]);
                    }
                }
                len += 1;
            } else {
                // radix-4 butterfly
                let p = 1 << (h - len - 2);
                let imag = table.root[2];
                let mut rot = op.one();
                for (s, t) in xs.chunks_exact_mut(p * 4).enumerate() {
                    let rot2 = op.mul(rot, rot);
                    let rot3 = op.mul(rot2, rot);

                    let (t0, rest) = t.split_at_mut(p);
                    let (t1, rest) = rest.split_at_mut(p);
                    let (t2, t3) = rest.split_at_mut(p);
                    for (((a0, a1), a2), a3) in t0.iter_mut().zip(t1).zip(t2).zip(t3) {
                        let b0 = *a0;
                        let b1 = op.mul(*a1, rot);
                        let b2 = op.mul(*a2, rot2);
                        let b3 = op.mul(*a3, rot3);

                        let c0 = op.add(b0, b2);
                        let c1 = op.sub(b0, b2);
                        let c2 = op.add(b1, b3);
                        let c3 = op.mul(op.sub(b1, b3), imag);

                        *a0 = op.add(c0, c2);
                        *a1 = op.sub(c0, c2);
                        *a2 = op.add(c1, c3);
                        *a3 = op.sub(c1, c3);
                    }
                    if s + 1 != 1 << len {
                        rot = op.mul(rot, table.rate3[trailing_ones(s)]);
                    }
                }
                len += 2;
            }
        }
        Ok(())
    }

    /// Undoes `transform` up to a factor of `xs.len()`, which the caller divides out.
    pub fn inverse_transform(&self, xs: &mut [u32]) -> Result<()> {
        let h = self.check_len(xs.len())?;
        let op = &self.op;
        let table = &self.table;

        let mut len = h;
        while len > 0 {
            if len == 1 {
                let p = 1 << (h - len);
                let mut irot = op.one();
                for (s, t) in xs.chunks_exact_mut(p * 2).enumerate() {
                    let (t0, t1) = t.split_at_mut(p);
                    for (a0, a1) in t0.iter_mut().zip(t1) {
                        let l = *a0;
                        let r = *a1;
                        *a0 = op.add(l, r);
                        *a1 = op.mul(op.sub(l, r), irot);
                    }
                    if s + 1 != 1 << (len - 1) {
                        irot = op.mul(irot, table.irate2[trailing_ones(s)]);
                    }
                }
                len -= 1;
            } else {
                let p = 1 << (h - len);
                let iimag = table.iroot[2];
                let mut irot = op.one();
                for (s, t) in xs.chunks_exact_mut(p * 4).enumerate() {
                    let irot2 = op.mul(irot, irot);
                    let irot3 = op.mul(irot2, irot);

                    let (t0, rest) = t.split_at_mut(p);
                    let (t1, rest) = rest.split_at_mut(p);
                    let (t2, t3) = rest.split_at_mut(p);
                    for (((a0, a1), a2), a3) in t0.iter_mut().zip(t1).zip(t2).zip(t3) {
                        let b0 = *a0;
                        let b1 = *a1;
                        let b2 = *a2;
                        let b3 = *a3;

                        let c0 = op.add(b0, b1);
                        let c1 = op.sub(b0, b1);
                        let c2 = op.add(b2, b3);
                        let c3 = op.mul(op.sub(b2, b3), iimag);

                        *a0 = op.add(c0, c2);
                        *a1 = op.mul(op.add(c1, c3), irot);
                        *a2 = op.mul(op.sub(c0, c2), irot2);
                        *a3 = op.mul(op.sub(c1, c3), irot3);
                    }
                    if s + 1 != 1 << (len - 2) {
                        irot = op.mul(irot, table.irate3[trailing_ones(s)]);
                    }
                }
                len -= 2;
            }
        }
        Ok(())
    }

    /// Non-cyclic product of `lhs` and `rhs`, of length `lhs.len() + rhs.len() - 1`.
    pub fn convolve(&self, lhs: &[u32], rhs: &[u32]) -> Result<Vec<u32>> {
        let (n, m) = (lhs.len(), rhs.len());
        if n == 0 || m == 0 {
            return Ok(vec![]);
        }
        if n.min(m) <= self.naive_threshold {
            return Ok(convolve_naive(&self.op, lhs, rhs));
        }

        let op = &self.op;
        let n_res = n + m - 1;
        let n_padded = n_res.next_power_of_two();
        self.check_len(n_padded)?;
        trace!("convolution {} x {} via {}-point transform", n, m, n_padded);

        let mut a = lhs.to_vec();
        let mut b = rhs.to_vec();
        a.resize(n_padded, op.zero());
        b.resize(n_padded, op.zero());
        self.transform(&mut a)?;
        self.transform(&mut b)?;
        a.iter_mut().zip(&b).for_each(|(x, &y)| *x = op.mul(*x, y));
        self.inverse_transform(&mut a)?;

        a.truncate(n_res);
        let n_inv = op.inv(op.reduce(n_padded as u64))?;
        a.iter_mut().for_each(|x| *x = op.mul(*x, n_inv));
        Ok(a)
    }
}

// naive O(nm)
pub fn convolve_naive<M: ModOp<u32>>(op: &M, lhs: &[u32], rhs: &[u32]) -> Vec<u32> {
    if lhs.is_empty() || rhs.is_empty() {
        return vec![];
    }
    let (outer, inner) = if lhs.len() >= rhs.len() {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };
    let mut res = vec![op.zero(); lhs.len() + rhs.len() - 1];
    for (i, &x) in outer.iter().enumerate() {
        for (r, &y) in res[i..].iter_mut().zip(inner) {
            *r = op.add(*r, op.mul(x, y));
        }
    }
    res
}
