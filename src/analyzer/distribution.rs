//! Observed and theoretical leading-digit distributions, and the comparison between them

use crate::{BenfordDistribution, DigitFrequency, DIGITS};
use std::sync::OnceLock;

use super::validation::PositiveInt;

/// Default maximum absolute per-digit difference for a sequence to conform
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Leading-digit probabilities of `numbers`. Digits that never occur are absent.
pub fn observed_distribution(numbers: &[PositiveInt]) -> DigitFrequency {
    let mut counts = [0usize; 10];
    for n in numbers {
        counts[n.leading_digit() as usize] += 1;
    }

    let total = numbers.len() as f64;
    DIGITS
        .filter(|&d| counts[d as usize] > 0)
        .map(|d| (d, counts[d as usize] as f64 / total))
        .collect()
}

/// Benford's expected probability `log10(1 + 1/d)` for every digit 1..=9
pub fn benford_distribution() -> BenfordDistribution {
    DIGITS
        .map(|d| (d, (1.0 + 1.0 / d as f64).log10()))
        .collect()
}

/// Process-wide cached copy of [`benford_distribution`]
pub fn benford_table() -> &'static BenfordDistribution {
    static TABLE: OnceLock<BenfordDistribution> = OnceLock::new();
    TABLE.get_or_init(benford_distribution)
}

/// Whether every expected digit is within `threshold` of its observed probability.
///
/// Digits missing from `observed` count as probability 0.
pub fn conforms(
    observed: &DigitFrequency,
    expected: &BenfordDistribution,
    threshold: f64,
) -> bool {
    for (digit, &probability) in expected {
        let seen = observed.get(digit).copied().unwrap_or(0.0);
        let deviation = (seen - probability).abs();
        if deviation > threshold {
            tracing::trace!(digit, seen, probability, deviation, "digit outside threshold");
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[u64]) -> Vec<PositiveInt> {
        values.iter().map(|&n| PositiveInt::new(n).unwrap()).collect()
    }

    #[test]
    fn test_benford_values() {
        let table = benford_distribution();
        assert_eq!(table.len(), 9);
        assert!((table[&1] - 0.30103).abs() < 1e-5);
        assert!((table[&2] - 0.17609).abs() < 1e-5);
        assert!((table[&9] - 0.04576).abs() < 1e-5);
        for d in DIGITS {
            assert_eq!(table[&d], (1.0 + 1.0 / d as f64).log10());
        }
    }

    #[test]
    fn test_benford_sums_to_one() {
        let sum: f64 = benford_distribution().values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum = {}", sum);
    }

    #[test]
    fn test_benford_table_matches_computation() {
        assert_eq!(benford_table(), &benford_distribution());
        assert!(std::ptr::eq(benford_table(), benford_table()));
    }

    #[test]
    fn test_observed_only_contains_seen_digits() {
        let observed = observed_distribution(&numbers(&[1, 10, 300, 3]));
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[&1], 0.5);
        assert_eq!(observed[&3], 0.5);
        assert!(!observed.contains_key(&2));
    }

    #[test]
    fn test_observed_empty_input_is_empty() {
        assert!(observed_distribution(&[]).is_empty());
    }

    #[test]
    fn test_observed_ignores_order() {
        let a = observed_distribution(&numbers(&[12, 222, 35, 18]));
        let b = observed_distribution(&numbers(&[18, 35, 222, 12]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_conforms_exact_match() {
        let expected = benford_distribution();
        assert!(conforms(&expected.clone(), &expected, DEFAULT_THRESHOLD));
        assert!(conforms(&expected.clone(), &expected, 0.0));
    }

    #[test]
    fn test_conforms_missing_digit_counts_as_zero() {
        let expected = benford_distribution();
        let mut observed = expected.clone();
        // digit 9 expected ~0.046, within 0.1 of zero
        observed.remove(&9);
        assert!(conforms(&observed, &expected, DEFAULT_THRESHOLD));

        // digit 1 expected ~0.301, not within 0.1 of zero
        let mut observed = expected.clone();
        observed.remove(&1);
        assert!(!conforms(&observed, &expected, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_conforms_threshold_is_inclusive() {
        let expected: BenfordDistribution = [(1u8, 0.5)].into_iter().collect();
        let observed: DigitFrequency = [(1u8, 0.75)].into_iter().collect();
        assert!(conforms(&observed, &expected, 0.25));
        assert!(!conforms(&observed, &expected, 0.2));
    }

    #[test]
    fn test_conforms_single_digit_cluster_fails() {
        let observed = observed_distribution(&numbers(&[222, 223, 224, 225, 226, 227, 228, 229, 230]));
        assert_eq!(observed[&2], 1.0);
        assert!(!conforms(&observed, benford_table(), DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_looser_threshold_accepts_cluster() {
        let observed = observed_distribution(&numbers(&[222, 230]));
        assert!(conforms(&observed, benford_table(), 1.0));
    }
}
