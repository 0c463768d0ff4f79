use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// A parse error stops the run before any statement is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered, or a description of what was expected.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing token such as `)` or `]` was expected but not found.
    #[error("Error on line {line}: Expected '{expected}' but none found.")]
    ExpectedClosing {
        /// The missing token.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found extra tokens after a complete statement.
    #[error("Error on line {line}: Extra tokens after statement. Check your input: {token}")]
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A declaration with neither a type annotation nor an initializer.
    #[error("Error on line {line}: Declaration of '{name}' needs a type or an initial value.")]
    EmptyDeclaration {
        /// The declared name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A matrix type annotation with a zero dimension.
    #[error("Error on line {line}: Matrix dimensions must be positive, found {rows}x{columns}.")]
    InvalidDimensions {
        /// Declared row count.
        rows:    usize,
        /// Declared column count.
        columns: usize,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A literal value was too large to be represented safely.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}
