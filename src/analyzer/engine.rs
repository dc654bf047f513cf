//! Analysis engine - validation, distributions and verdict in one pass

use crate::ConformityVerdict;
use serde_json::Value;

use super::distribution::{benford_table, conforms, observed_distribution, DEFAULT_THRESHOLD};
use super::validation::{validate_input, ValidatedSequence, ValidationError};

/// Checks sequences against Benford's Law under a fixed per-digit threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenfordAnalyzer {
    /// Maximum absolute difference allowed per digit
    threshold: f64,
}

impl BenfordAnalyzer {
    /// Create an analyzer with the default threshold (0.1)
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Use a different per-digit threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Validate a dynamic input and analyze it. Validation errors are returned unchanged.
    pub fn check(&self, input: &Value) -> Result<ConformityVerdict, ValidationError> {
        let sequence = validate_input(input)?;
        Ok(self.analyze(&sequence))
    }

    /// Analyze an already validated sequence
    pub fn analyze(&self, sequence: &ValidatedSequence) -> ConformityVerdict {
        let observed = observed_distribution(sequence.as_slice());
        let expected = benford_table();
        let conforms_to_benford = conforms(&observed, expected, self.threshold);

        tracing::debug!(
            sample_size = sequence.len(),
            threshold = self.threshold,
            conforms_to_benford,
            "benford check complete"
        );

        ConformityVerdict {
            conforms_to_benford,
            observed_distribution: observed,
            benfords_distribution: expected.clone(),
            threshold: self.threshold,
            sample_size: sequence.len(),
        }
    }
}

impl Default for BenfordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Check an input with the default threshold
pub fn check_benfords_law(input: &Value) -> Result<ConformityVerdict, ValidationError> {
    BenfordAnalyzer::new().check(input)
}
