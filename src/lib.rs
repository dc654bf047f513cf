//! Benford: Benford's Law conformity checker
//!
//! This library decides whether a collection of positive integers follows the
//! logarithmic leading-digit distribution described by Benford's Law, and
//! reports both the observed and the theoretical distributions.

pub mod analyzer;
pub mod config;
pub mod input;
pub mod logging;
pub mod mcp;
pub mod reporter;
pub mod sample;

pub use analyzer::{
    benford_distribution, benford_table, check_benfords_law, conforms, first_digit,
    observed_distribution, validate_input, BenfordAnalyzer, PositiveInt, ValidatedSequence,
    ValidationError, WideDigits, DEFAULT_THRESHOLD,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed probability per leading digit. Only digits seen at least once are present.
pub type DigitFrequency = BTreeMap<u8, f64>;

/// Theoretical probability per leading digit. All nine digits are present.
pub type BenfordDistribution = BTreeMap<u8, f64>;

/// Leading digits considered by the analysis (base 10)
pub const DIGITS: std::ops::RangeInclusive<u8> = 1..=9;

/// The result of checking one sequence against Benford's Law
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformityVerdict {
    /// Whether every digit is within the threshold of its expected probability
    pub conforms_to_benford: bool,
    /// Observed leading-digit probabilities
    pub observed_distribution: DigitFrequency,
    /// Expected leading-digit probabilities
    pub benfords_distribution: BenfordDistribution,
    /// Threshold the verdict was computed with
    #[serde(skip, default = "default_threshold")]
    pub threshold: f64,
    /// Number of elements in the analyzed sequence
    #[serde(skip)]
    pub sample_size: usize,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl ConformityVerdict {
    /// Per-digit comparison of observed and expected probabilities, digits 1 through 9
    pub fn deviations(&self) -> Vec<DigitDeviation> {
        self.benfords_distribution
            .iter()
            .map(|(&digit, &expected)| {
                let observed = self
                    .observed_distribution
                    .get(&digit)
                    .copied()
                    .unwrap_or(0.0);
                let deviation = (observed - expected).abs();
                DigitDeviation {
                    digit,
                    observed,
                    expected,
                    deviation,
                    within_threshold: deviation <= self.threshold,
                }
            })
            .collect()
    }

    /// The digit with the largest absolute deviation, if any
    pub fn worst_digit(&self) -> Option<DigitDeviation> {
        self.deviations()
            .into_iter()
            .max_by(|a, b| a.deviation.total_cmp(&b.deviation))
    }
}

/// Observed vs expected probability for one leading digit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitDeviation {
    pub digit: u8,
    pub observed: f64,
    pub expected: f64,
    /// Absolute difference between observed and expected
    pub deviation: f64,
    pub within_threshold: bool,
}
