//! Input validation: dynamic values to a sequence of positive integers

use serde_json::{Number, Value};
use std::fmt;
use std::num::NonZeroU64;
use thiserror::Error;

use super::digits::first_digit;

/// Reasons an input cannot be analyzed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input. Please provide an array of numbers.")]
    NotASequence,
    #[error("Invalid input. Please provide an array of numbers.")]
    EmptySequence,
    #[error("All elements must be positive integers.")]
    InvalidElement { index: usize },
}

impl ValidationError {
    /// Stable machine-readable code for adapters
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NotASequence => "not_a_sequence",
            ValidationError::EmptySequence => "empty_sequence",
            ValidationError::InvalidElement { .. } => "invalid_element",
        }
    }

    /// True for "not a sequence / empty", false for "contains invalid elements"
    pub fn is_shape_error(&self) -> bool {
        !matches!(self, ValidationError::InvalidElement { .. })
    }
}

/// A validated element: a strictly positive integer of any magnitude
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositiveInt {
    Native(NonZeroU64),
    /// Beyond `u64`
    Wide(WideDigits),
}

/// Canonical decimal digits of an integer beyond `u64`: no sign, no leading zero.
/// Only built by [`PositiveInt::from_decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WideDigits(String);

impl WideDigits {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First byte is `1..=9` by construction
    fn leading_digit(&self) -> u8 {
        self.0.as_bytes()[0] - b'0'
    }
}

impl fmt::Display for WideDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PositiveInt {
    pub fn new(n: u64) -> Option<Self> {
        NonZeroU64::new(n).map(PositiveInt::Native)
    }

    /// Parse a canonical decimal digit string. Values that fit in `u64` become `Native`.
    pub fn from_decimal(digits: &str) -> Option<Self> {
        let bytes = digits.as_bytes();
        if bytes.is_empty() || bytes[0] == b'0' || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        match digits.parse::<u64>() {
            Ok(n) => PositiveInt::new(n),
            Err(_) => Some(PositiveInt::Wide(WideDigits(digits.to_string()))),
        }
    }

    /// Most significant decimal digit, 1 through 9
    pub fn leading_digit(&self) -> u8 {
        match self {
            PositiveInt::Native(n) => first_digit(*n),
            PositiveInt::Wide(digits) => digits.leading_digit(),
        }
    }

    fn from_number(number: &Number) -> Option<Self> {
        if let Some(n) = number.as_u64() {
            return PositiveInt::new(n);
        }
        // Fractions, exponents and signs all fail the digit check
        PositiveInt::from_decimal(&number.to_string())
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositiveInt::Native(n) => write!(f, "{}", n),
            PositiveInt::Wide(digits) => f.write_str(digits.as_str()),
        }
    }
}

/// A non-empty sequence of positive integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSequence(Vec<PositiveInt>);

impl ValidatedSequence {
    /// Build from native integers, applying the same rules as [`validate_input`]
    pub fn from_u64s(numbers: &[u64]) -> Result<Self, ValidationError> {
        if numbers.is_empty() {
            return Err(ValidationError::EmptySequence);
        }
        numbers
            .iter()
            .enumerate()
            .map(|(index, &n)| PositiveInt::new(n).ok_or(ValidationError::InvalidElement { index }))
            .collect::<Result<Vec<_>, _>>()
            .map(ValidatedSequence)
    }

    pub fn as_slice(&self) -> &[PositiveInt] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PositiveInt> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<PositiveInt> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ValidatedSequence {
    type Item = &'a PositiveInt;
    type IntoIter = std::slice::Iter<'a, PositiveInt>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validate a dynamic input value as a non-empty sequence of positive integers.
///
/// Elements are checked in order and the first violation is reported.
pub fn validate_input(input: &Value) -> Result<ValidatedSequence, ValidationError> {
    let Value::Array(items) = input else {
        return Err(ValidationError::NotASequence);
    };
    if items.is_empty() {
        return Err(ValidationError::EmptySequence);
    }

    let mut numbers = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let number = match item {
            Value::Number(n) => PositiveInt::from_number(n),
            _ => None,
        };
        match number {
            Some(n) => numbers.push(n),
            None => return Err(ValidationError::InvalidElement { index }),
        }
    }

    tracing::debug!(count = numbers.len(), "validated input sequence");
    Ok(ValidatedSequence(numbers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_sequence() {
        assert_eq!(
            validate_input(&json!("not an array")),
            Err(ValidationError::NotASequence)
        );
        assert_eq!(validate_input(&json!(42)), Err(ValidationError::NotASequence));
        assert_eq!(validate_input(&Value::Null), Err(ValidationError::NotASequence));
        assert_eq!(
            validate_input(&json!({ "numbers": [1, 2] })),
            Err(ValidationError::NotASequence)
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_input(&json!([])), Err(ValidationError::EmptySequence));
    }

    #[test]
    fn test_rejects_negative_element() {
        assert_eq!(
            validate_input(&json!([12, -5, 7])),
            Err(ValidationError::InvalidElement { index: 1 })
        );
    }

    #[test]
    fn test_rejects_fractional_element() {
        assert_eq!(
            validate_input(&json!([1, 2.5, 3])),
            Err(ValidationError::InvalidElement { index: 1 })
        );
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(
            validate_input(&json!([3, 0])),
            Err(ValidationError::InvalidElement { index: 1 })
        );
    }

    #[test]
    fn test_rejects_non_numeric_elements() {
        for bad in [json!(["12"]), json!([true]), json!([null]), json!([[1]]), json!([{}])] {
            assert_eq!(
                validate_input(&bad),
                Err(ValidationError::InvalidElement { index: 0 }),
                "input {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_float_literal_with_integral_value() {
        let input: Value = serde_json::from_str("[1, 2.0]").unwrap();
        assert_eq!(
            validate_input(&input),
            Err(ValidationError::InvalidElement { index: 1 })
        );

        let input: Value = serde_json::from_str("[1e3]").unwrap();
        assert_eq!(
            validate_input(&input),
            Err(ValidationError::InvalidElement { index: 0 })
        );
    }

    #[test]
    fn test_reports_first_violation() {
        assert_eq!(
            validate_input(&json!([1, 2, -1, 0, 2.5])),
            Err(ValidationError::InvalidElement { index: 2 })
        );
    }

    #[test]
    fn test_accepts_positive_integers_unchanged() {
        let seq = validate_input(&json!([7, 1, 300])).unwrap();
        let rendered: Vec<String> = seq.iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered, vec!["7", "1", "300"]);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_accepts_integers_beyond_u64() {
        let input: Value =
            serde_json::from_str("[98765432109876543210987654321, 18446744073709551615]").unwrap();
        let seq = validate_input(&input).unwrap();

        assert!(matches!(seq.as_slice()[0], PositiveInt::Wide(_)));
        assert_eq!(seq.as_slice()[0].leading_digit(), 9);
        assert!(matches!(seq.as_slice()[1], PositiveInt::Native(_)));
        assert_eq!(seq.as_slice()[1].leading_digit(), 1);
    }

    #[test]
    fn test_rejects_huge_negative() {
        let input: Value = serde_json::from_str("[-98765432109876543210987654321]").unwrap();
        assert_eq!(
            validate_input(&input),
            Err(ValidationError::InvalidElement { index: 0 })
        );
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(PositiveInt::from_decimal("42"), PositiveInt::new(42));
        assert_eq!(PositiveInt::from_decimal("0"), None);
        assert_eq!(PositiveInt::from_decimal("042"), None);
        assert_eq!(PositiveInt::from_decimal(""), None);
        assert_eq!(PositiveInt::from_decimal("-1"), None);
        assert_eq!(PositiveInt::from_decimal("1.5"), None);
        assert!(matches!(
            PositiveInt::from_decimal("123456789012345678901234567890"),
            Some(PositiveInt::Wide(_))
        ));
    }

    #[test]
    fn test_wide_values_are_always_canonical() {
        for text in [
            "18446744073709551616",
            "98765432109876543210987654321",
            "0018446744073709551616",
            "x18446744073709551616",
            "+18446744073709551616",
            "18446744073709551616.0",
        ] {
            if let Some(PositiveInt::Wide(digits)) = PositiveInt::from_decimal(text) {
                let first = digits.as_str().as_bytes()[0];
                assert!((b'1'..=b'9').contains(&first), "{} kept a bad lead", text);
                assert!(digits.as_str().bytes().all(|b| b.is_ascii_digit()));
            }
        }
        assert_eq!(PositiveInt::from_decimal("0018446744073709551616"), None);
        assert_eq!(PositiveInt::from_decimal("x18446744073709551616"), None);
    }

    #[test]
    fn test_wide_values_count_toward_distribution() {
        let wide = PositiveInt::from_decimal("98765432109876543210987654321").unwrap();
        let numbers = [wide, PositiveInt::new(5).unwrap()];
        let observed = crate::observed_distribution(&numbers);

        assert_eq!(observed.get(&9), Some(&0.5));
        assert_eq!(observed.get(&5), Some(&0.5));
        let sum: f64 = observed.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_u64s() {
        assert_eq!(
            ValidatedSequence::from_u64s(&[]),
            Err(ValidationError::EmptySequence)
        );
        assert_eq!(
            ValidatedSequence::from_u64s(&[4, 0]),
            Err(ValidationError::InvalidElement { index: 1 })
        );
        assert_eq!(ValidatedSequence::from_u64s(&[4, 40]).unwrap().len(), 2);
    }

    #[test]
    fn test_error_codes_and_categories() {
        assert_eq!(ValidationError::NotASequence.code(), "not_a_sequence");
        assert_eq!(ValidationError::EmptySequence.code(), "empty_sequence");
        let invalid = ValidationError::InvalidElement { index: 3 };
        assert_eq!(invalid.code(), "invalid_element");

        assert!(ValidationError::NotASequence.is_shape_error());
        assert!(ValidationError::EmptySequence.is_shape_error());
        assert!(!invalid.is_shape_error());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::NotASequence.to_string(),
            "Invalid input. Please provide an array of numbers."
        );
        assert_eq!(
            ValidationError::InvalidElement { index: 0 }.to_string(),
            "All elements must be positive integers."
        );
    }
}
