// Number-theoretic helpers on machine words, usable in const context.

/// `x^n mod m`.
pub const fn pow_mod(x: u64, mut n: u64, m: u32) -> u32 {
    if m == 1 {
        return 0;
    }
    let m = m as u64;
    let mut res = 1u64;
    let mut base = x % m;
    while n > 0 {
        if n & 1 == 1 {
            res = res * base % m;
        }
        base = base * base % m;
        n >>= 1;
    }
    res as u32
}

// Deterministic Miller-Rabin; bases {2, 7, 61} cover every n < 4_759_123_141.
pub const fn is_prime(n: u32) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 || n == 7 || n == 61 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let n_u64 = n as u64;
    let mut d = n_u64 - 1;
    while d % 2 == 0 {
        d /= 2;
    }

    let bases = [2u64, 7, 61];
    let mut i = 0;
    while i < bases.len() {
        let mut t = d;
        let mut y = pow_mod(bases[i], t, n) as u64;
        while t != n_u64 - 1 && y != 1 && y != n_u64 - 1 {
            y = y * y % n_u64;
            t <<= 1;
        }
        if y != n_u64 - 1 && t % 2 == 0 {
            return false;
        }
        i += 1;
    }
    true
}

// Extended euclidean algorithm
// Returns (g, x) such that g = gcd(a, b), x * a = g (mod b) and 0 <= x < b / g.
pub fn inv_gcd(a: i64, b: i64) -> (i64, i64) {
    debug_assert!(b >= 1);
    let a = a.rem_euclid(b);
    if a == 0 {
        return (b, 0);
    }

    // Invariants: s - m0 * a = 0 (mod b), t - m1 * a = 0 (mod b), s * |m1| + t * |m0| <= b
    let (mut s, mut t) = (b, a);
    let (mut m0, mut m1) = (0i64, 1i64);
    while t != 0 {
        let u = s / t;
        s -= t * u;
        m0 -= m1 * u;
        std::mem::swap(&mut s, &mut t);
        std::mem::swap(&mut m0, &mut m1);
    }
    if m0 < 0 {
        m0 += b / s;
    }
    (s, m0)
}

/// Smallest generator of the multiplicative group modulo the prime `m`.
pub const fn primitive_root(m: u32) -> u32 {
    assert!(m >= 2, "modulus must be a prime");
    if m == 2 {
        return 1;
    }

    // Distinct prime factors of m - 1; a u32 has at most 9 of them.
    let mut divs = [0u32; 20];
    divs[0] = 2;
    let mut n_divs = 1;
    let mut x = (m - 1) / 2;
    while x % 2 == 0 {
        x /= 2;
    }
    let mut p = 3u32;
    while (p as u64) * (p as u64) <= x as u64 {
        if x % p == 0 {
            divs[n_divs] = p;
            n_divs += 1;
            while x % p == 0 {
                x /= p;
            }
        }
        p += 2;
    }
    if x > 1 {
        divs[n_divs] = x;
        n_divs += 1;
    }

    let mut g = 2u32;
    loop {
        let mut is_generator = true;
        let mut i = 0;
        while i < n_divs {
            if pow_mod(g as u64, ((m - 1) / divs[i]) as u64, m) == 1 {
                is_generator = false;
                break;
            }
            i += 1;
        }
        if is_generator {
            return g;
        }
        g += 1;
    }
}

/// Exponent of the largest power of two dividing `m - 1`.
pub const fn two_adicity(m: u32) -> u32 {
    if m <= 1 {
        return 0;
    }
    (m - 1).trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prime_naive(n: u32) -> bool {
        n >= 2 && (2..).take_while(|&d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn test_is_prime() {
        for n in 0..10_000 {
            assert_eq!(is_prime(n), is_prime_naive(n), "{}", n);
        }
        for p in [998_244_353, 167_772_161, 469_762_049, 754_974_721, 2_147_483_647] {
            assert!(is_prime(p), "{}", p);
        }
        // Strong pseudoprimes to small bases
        for n in [561, 2047, 1_373_653, 25_326_001, 3_215_031_751] {
            assert_eq!(is_prime(n), is_prime_naive(n), "{}", n);
        }
    }

    #[test]
    fn test_primitive_root() {
        assert_eq!(primitive_root(2), 1);
        assert_eq!(primitive_root(998_244_353), 3);
        assert_eq!(primitive_root(167_772_161), 3);
        assert_eq!(primitive_root(469_762_049), 3);
        assert_eq!(primitive_root(754_974_721), 11);

        for m in (3..2000).filter(|&m| is_prime(m)) {
            let g = primitive_root(m);
            let order = (1..m)
                .position(|e| pow_mod(g as u64, e as u64, m) == 1)
                .map(|i| i as u32 + 1);
            assert_eq!(order, Some(m - 1), "{}", m);
        }
    }

    #[test]
    fn test_inv_gcd() {
        for b in 1..60i64 {
            for a in -60..60i64 {
                let (g, x) = inv_gcd(a, b);
                let mut d = a.rem_euclid(b);
                let mut e = b;
                while d != 0 {
                    (d, e) = (e % d, d);
                }
                assert_eq!(g, e, "{:?}", (a, b));
                assert!(0 <= x && x < b / g, "{:?}", (a, b));
                assert_eq!((x * a).rem_euclid(b), g % b, "{:?}", (a, b));
            }
        }
    }

    #[test]
    fn test_two_adicity() {
        assert_eq!(two_adicity(998_244_353), 23);
        assert_eq!(two_adicity(1_000_000_007), 1);
        assert_eq!(two_adicity(7681), 9);
        assert_eq!(two_adicity(1), 0);
    }
}
