//! Console reporter with colored output

use crate::{ConformityVerdict, DigitDeviation, ValidationError};
use colored::Colorize;
use std::fmt::Write;

/// Width of the probability bars, in characters, for probability 1.0
const BAR_WIDTH: usize = 40;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to show the per-digit table
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { verbose: true }
    }

    /// Only print the verdict line
    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    /// Print a verdict to stdout
    pub fn report(&self, verdict: &ConformityVerdict) {
        print!("{}", self.render(verdict));
    }

    /// Print a validation error to stderr
    pub fn report_error(&self, error: &ValidationError) {
        eprintln!("{}: {}", "Error".red().bold(), error);
        if let ValidationError::InvalidElement { index } = error {
            eprintln!("   first offending element at index {}", index);
        }
    }

    /// Render a verdict as text
    pub fn render(&self, verdict: &ConformityVerdict) -> String {
        let mut out = String::new();
        if !self.verbose {
            let _ = writeln!(out, "{}", self.verdict_label(verdict));
            return out;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Benford's Law Analysis".bold());
        let _ = writeln!(
            out,
            "   Numbers: {} | Threshold: {}",
            verdict.sample_size, verdict.threshold
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "   Result: {}", self.verdict_label(verdict));
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "   {}",
            format!(
                "{:<5} {:>9} {:>9} {:>9}  Distribution",
                "Digit", "Observed", "Expected", "Diff"
            )
            .bold()
        );
        for deviation in verdict.deviations() {
            let _ = writeln!(out, "   {}", self.render_row(&deviation));
        }

        if let Some(worst) = verdict.worst_digit().filter(|w| !w.within_threshold) {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "   {} digit {} deviates by {:.3} (allowed {})",
                "→".cyan(),
                worst.digit,
                worst.deviation,
                verdict.threshold
            );
        }
        let _ = writeln!(out);
        out
    }

    fn verdict_label(&self, verdict: &ConformityVerdict) -> colored::ColoredString {
        if verdict.conforms_to_benford {
            "conforms to Benford's Law".green().bold()
        } else {
            "does not conform to Benford's Law".red().bold()
        }
    }

    fn render_row(&self, deviation: &DigitDeviation) -> String {
        let diff = format!("{:>9.4}", deviation.observed - deviation.expected);
        let diff = if deviation.within_threshold {
            diff.green()
        } else {
            diff.red()
        };
        format!(
            "{:<5} {:>9.4} {:>9.4} {}  {}",
            deviation.digit,
            deviation.observed,
            deviation.expected,
            diff,
            self.create_bars(deviation.observed, deviation.expected)
        )
    }

    /// Observed bar, with the expected position marked by `|`
    fn create_bars(&self, observed: f64, expected: f64) -> String {
        let filled = (observed * BAR_WIDTH as f64).round() as usize;
        let marker = (expected * BAR_WIDTH as f64).round() as usize;
        let width = filled.max(marker + 1).min(BAR_WIDTH + 1);

        (0..width)
            .map(|i| {
                if i == marker {
                    '|'
                } else if i < filled {
                    '█'
                } else {
                    ' '
                }
            })
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
