use crate::error::RuntimeError;

/// Printed in place of a value when the expression of a print statement
/// fails.
pub const INVALID_PRINT: &str = "Print: invalid value or error";

/// Receives everything a running program produces.
///
/// `output` gets the text of print statements, one call per statement.
/// `diagnostic` gets every statement failure. Errors are rendered here and
/// nowhere else.
pub trait Reporter {
    /// Writes the text produced by a print statement.
    fn output(&mut self, text: &str);

    /// Reports a failed statement.
    fn diagnostic(&mut self, error: &RuntimeError);
}

/// Writes printed text to stdout and diagnostics to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn output(&mut self, text: &str) {
        println!("{text}");
    }

    fn diagnostic(&mut self, error: &RuntimeError) {
        eprintln!("{error}");
    }
}

/// Collects output and diagnostics in memory.
///
/// # Example
/// ```
/// use matcalc::{
///     error::RuntimeError,
///     interpreter::evaluator::report::{Reporter, Transcript},
/// };
///
/// let mut transcript = Transcript::default();
/// transcript.output("4");
/// transcript.diagnostic(&RuntimeError::DivisionByZero { line: 2 });
///
/// assert_eq!(transcript.output, vec!["4".to_string()]);
/// assert_eq!(transcript.diagnostics.len(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transcript {
    /// Printed text, one entry per print statement.
    pub output:      Vec<String>,
    /// Reported failures in the order they happened.
    pub diagnostics: Vec<RuntimeError>,
}

impl Reporter for Transcript {
    fn output(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn diagnostic(&mut self, error: &RuntimeError) {
        self.diagnostics.push(error.clone());
    }
}
