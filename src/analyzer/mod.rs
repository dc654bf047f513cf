//! Analyzer module - Benford's Law conformity engine

pub mod digits;
pub mod distribution;
pub mod engine;
pub mod validation;

pub use digits::first_digit;
pub use distribution::{
    benford_distribution, benford_table, conforms, observed_distribution, DEFAULT_THRESHOLD,
};
pub use engine::{check_benfords_law, BenfordAnalyzer};
pub use validation::{
    validate_input, PositiveInt, ValidatedSequence, ValidationError, WideDigits,
};
