// Written in 2015 by Sebastiano Vigna (vigna@acm.org)
// https://xoshiro.di.unimi.it/splitmix64.c
use std::ops::Range;

pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        assert_ne!(seed, 0);
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut x = self.0;
        x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }

    pub fn range_u64(&mut self, range: Range<u64>) -> u64 {
        let Range { start, end } = range;
        assert!(start < end);

        let width = end - start;
        let test = (u64::MAX - width) % width;
        loop {
            let value = self.next_u64();
            if value >= test {
                return start + value % width;
            }
        }
    }

    pub fn range_u32(&mut self, range: Range<u32>) -> u32 {
        self.range_u64(range.start as u64..range.end as u64) as u32
    }

    pub fn residues(&mut self, n: usize, modulus: u32) -> Vec<u32> {
        (0..n).map(|_| self.range_u32(0..modulus)).collect()
    }
}
