use super::prime;
use crate::error::{Error, Result};

pub const DEFAULT_MODULUS: u32 = 998_244_353;

// Arithmetic on canonical residues in [0, modulus), carried out by an operator object.
pub trait ModOp<T> {
    fn zero(&self) -> T;
    fn one(&self) -> T;
    fn modulus(&self) -> T;
    fn add(&self, lhs: T, rhs: T) -> T;
    fn sub(&self, lhs: T, rhs: T) -> T;
    fn mul(&self, lhs: T, rhs: T) -> T;
    fn reduce(&self, x: u64) -> T;

    fn neg(&self, x: T) -> T {
        self.sub(self.zero(), x)
    }
}

pub trait PowBy<T, E> {
    fn pow(&self, base: T, exp: E) -> T;
}

pub trait InvOp<T> {
    fn inv(&self, n: T) -> Result<T>;
}

impl<T: Copy, M: ModOp<T>> PowBy<T, u64> for M {
    fn pow(&self, mut base: T, mut exp: u64) -> T {
        let mut res = self.one();
        while exp > 0 {
            if exp % 2 == 1 {
                res = self.mul(res, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }
        res
    }
}

/// Everything the transform and series layers need from a residue ring.
pub trait Field: ModOp<u32> + InvOp<u32> + Clone + std::fmt::Debug {}

impl<M: ModOp<u32> + InvOp<u32> + Clone + std::fmt::Debug> Field for M {}

fn add_mod(x: u32, y: u32, m: u32) -> u32 {
    debug_assert!(x < m && y < m);
    let sum = x + y;
    if sum >= m {
        sum - m
    } else {
        sum
    }
}

fn sub_mod(x: u32, y: u32, m: u32) -> u32 {
    debug_assert!(x < m && y < m);
    if x >= y {
        x - y
    } else {
        x + m - y
    }
}

fn inv_by_gcd(n: u32, m: u32) -> Result<u32> {
    let (g, x) = prime::inv_gcd(n as i64, m as i64);
    if g != 1 {
        return Err(Error::NotInvertible {
            value: n,
            modulus: m,
        });
    }
    Ok(x as u32)
}

/// Modulus fixed at compile time.
///
/// Only constructible through `new` or `Default`, both of which evaluate the
/// `1 <= M < 2^31` check:
///
/// ```compile_fail
/// use linrec::math::num_mod::FixedModulus;
/// let _ = FixedModulus::<4_000_000_000>;
/// ```
///
/// ```compile_fail
/// use linrec::math::num_mod::FixedModulus;
/// let _ = FixedModulus::<0>::new();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedModulus<const M: u32>(());

pub type Mod998244353 = FixedModulus<DEFAULT_MODULUS>;

impl<const M: u32> FixedModulus<M> {
    const IN_RANGE: () = assert!(1 <= M && M < 1 << 31, "modulus must satisfy 1 <= M < 2^31");
    const IS_PRIME: bool = prime::is_prime(M);

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::IN_RANGE;
        Self(())
    }

    pub const fn is_prime(&self) -> bool {
        Self::IS_PRIME
    }
}

impl<const M: u32> Default for FixedModulus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const M: u32> ModOp<u32> for FixedModulus<M> {
    fn zero(&self) -> u32 {
        0
    }
    fn one(&self) -> u32 {
        1 % M
    }
    fn modulus(&self) -> u32 {
        M
    }
    fn add(&self, x: u32, y: u32) -> u32 {
        add_mod(x, y, M)
    }
    fn sub(&self, x: u32, y: u32) -> u32 {
        sub_mod(x, y, M)
    }
    fn mul(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < M && y < M);
        (x as u64 * y as u64 % M as u64) as u32
    }
    fn reduce(&self, x: u64) -> u32 {
        (x % M as u64) as u32
    }
}

impl<const M: u32> InvOp<u32> for FixedModulus<M> {
    fn inv(&self, n: u32) -> Result<u32> {
        debug_assert!(n < M);
        if Self::IS_PRIME {
            if n == 0 {
                return Err(Error::NotInvertible {
                    value: n,
                    modulus: M,
                });
            }
            Ok(self.pow(n, (M - 2) as u64))
        } else {
            inv_by_gcd(n, M)
        }
    }
}

/// Modulus chosen at runtime; products are reduced with a precomputed `ceil(2^64 / m)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeModulus {
    m: u32,
    im: u64,
}

impl RuntimeModulus {
    pub fn new(m: u32) -> Result<Self> {
        if m == 0 || m >= 1 << 31 {
            return Err(Error::ModulusOutOfRange(m as u64));
        }
        // ceil(2^64 / m); wraps to 0 for m = 1, where every product is 0 anyway
        let im = (u64::MAX / m as u64).wrapping_add(1);
        Ok(Self { m, im })
    }
}

impl ModOp<u32> for RuntimeModulus {
    fn zero(&self) -> u32 {
        0
    }
    fn one(&self) -> u32 {
        1 % self.m
    }
    fn modulus(&self) -> u32 {
        self.m
    }
    fn add(&self, x: u32, y: u32) -> u32 {
        add_mod(x, y, self.m)
    }
    fn sub(&self, x: u32, y: u32) -> u32 {
        sub_mod(x, y, self.m)
    }
    fn mul(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < self.m && y < self.m);
        // With z = x * y = c * m + d, the estimate (z * im) >> 64 is either c or c + 1.
        let z = x as u64 * y as u64;
        let c = ((z as u128 * self.im as u128) >> 64) as u64;
        let mut res = z.wrapping_sub(c.wrapping_mul(self.m as u64)) as u32;
        if self.m <= res {
            res = res.wrapping_add(self.m);
        }
        res
    }
    fn reduce(&self, x: u64) -> u32 {
        (x % self.m as u64) as u32
    }
}

impl InvOp<u32> for RuntimeModulus {
    fn inv(&self, n: u32) -> Result<u32> {
        debug_assert!(n < self.m);
        inv_by_gcd(n, self.m)
    }
}
