/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected tokens, missing delimiters, malformed declarations and
/// literals that do not fit the numeric model.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: dimension
/// and type mismatches, unknown variables, division by zero and malformed
/// matrix literals.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::{ErrorKind, RuntimeError};
