//! Synthetic Benford-distributed positive integers

use crate::{benford_table, DIGITS};
use rand::Rng;

/// Default largest power of ten used for generated numbers
pub const DEFAULT_MAX_MAGNITUDE: u32 = 6;

/// Generates integers whose leading digits follow Benford's Law
#[derive(Debug, Clone)]
pub struct BenfordSampler {
    /// Cumulative probabilities for digits 1..=9
    cumulative: [f64; 9],
    max_magnitude: u32,
}

impl BenfordSampler {
    pub fn new() -> Self {
        let mut cumulative = [0.0; 9];
        let mut sum = 0.0;
        for (slot, digit) in cumulative.iter_mut().zip(DIGITS) {
            sum += benford_table()[&digit];
            *slot = sum;
        }
        Self {
            cumulative,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
        }
    }

    /// Numbers span `10^1` up to `10^(max_magnitude + 1)`. Clamped to 1..=18 to stay in `u64`.
    pub fn with_max_magnitude(mut self, max_magnitude: u32) -> Self {
        self.max_magnitude = max_magnitude.clamp(1, 18);
        self
    }

    /// Draw a leading digit by inverse CDF over the Benford table
    pub fn sample_digit<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let u: f64 = rng.gen();
        self.cumulative
            .iter()
            .position(|&c| u < c)
            .map(|i| i as u8 + 1)
            // u lands above the last cumulative value only through rounding
            .unwrap_or(9)
    }

    /// `digit * 10^m + uniform(0..10^m)` with `m` in `1..=max_magnitude`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let digit = self.sample_digit(rng) as u64;
        let magnitude = rng.gen_range(1..=self.max_magnitude);
        let scale = 10u64.pow(magnitude);
        digit * scale + rng.gen_range(0..scale)
    }

    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<u64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

impl Default for BenfordSampler {
    fn default() -> Self {
        Self::new()
    }
}
