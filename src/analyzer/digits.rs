//! Leading-digit extraction

use std::num::NonZeroU64;

/// Most significant decimal digit of `n`.
///
/// Divides by the largest power of ten not exceeding `n`, so the result is
/// exact for every `u64`.
pub fn first_digit(n: NonZeroU64) -> u8 {
    let n = n.get();
    let magnitude = 10u64.pow(n.ilog10());
    (n / magnitude) as u8
}
