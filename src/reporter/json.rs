//! JSON reporter for machine-readable output

use crate::{ConformityVerdict, ValidationError};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a verdict: `conforms_to_benford`, `observed_distribution`, `benfords_distribution`
    pub fn report(&self, verdict: &ConformityVerdict) -> String {
        self.to_json(verdict)
    }

    /// Report a validation failure as `{"error": "..."}`
    pub fn report_error(&self, error: &ValidationError) -> String {
        self.to_json(&JsonError {
            error: error.to_string(),
        })
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonError {
    error: String,
}
