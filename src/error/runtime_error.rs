use thiserror::Error;

use crate::interpreter::value::matrix::MatrixError;

/// Broad category of a [`RuntimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Matrix shapes disagree.
    DimensionMismatch,
    /// Element types cannot be promoted, or a scalar met a matrix where that
    /// is not allowed.
    TypeIncompatibility,
    /// A variable was used before being bound.
    UndefinedReference,
    /// Division by zero.
    Arithmetic,
    /// A matrix literal with rows of unequal length.
    MalformedLiteral,
    /// An internal invariant was broken while building a matrix.
    Construction,
}

/// Represents all errors that can occur during evaluation.
///
/// A failing expression produces one of these instead of a value. The
/// statement runner reports it and moves on to the next statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Matrix shapes do not fit the operation, assignment or declaration.
    #[error("Error on line {line}: Dimension mismatch: {details}.")]
    DimensionMismatch {
        /// What was attempted and which shapes were involved.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to use an undefined variable.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A matrix literal whose rows are not all the same length.
    #[error("Error on line {line}: Matrix literal is not rectangular: row {row} has {found} elements, expected {expected}.")]
    RaggedMatrixLiteral {
        /// Zero-based index of the offending row.
        row:      usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A matrix could not be built from its buffer.
    #[error("Error on line {line}: Internal error: {details}.")]
    Construction {
        /// Details about the broken invariant.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// The category of this error.
    ///
    /// # Example
    /// ```
    /// use matcalc::error::{ErrorKind, RuntimeError};
    ///
    /// let e = RuntimeError::DivisionByZero { line: 3 };
    /// assert_eq!(e.kind(), ErrorKind::Arithmetic);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::TypeMismatch { .. } => ErrorKind::TypeIncompatibility,
            Self::UnknownVariable { .. } => ErrorKind::UndefinedReference,
            Self::DivisionByZero { .. } => ErrorKind::Arithmetic,
            Self::RaggedMatrixLiteral { .. } => ErrorKind::MalformedLiteral,
            Self::Construction { .. } => ErrorKind::Construction,
        }
    }

    /// The source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::DimensionMismatch { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::UnknownVariable { line, .. }
            | Self::DivisionByZero { line }
            | Self::RaggedMatrixLiteral { line, .. }
            | Self::Construction { line, .. } => *line,
        }
    }

    /// Attaches a source line to an error raised by the matrix engine.
    #[must_use]
    pub fn from_matrix(error: &MatrixError, line: usize) -> Self {
        let details = error.to_string();
        match error {
            MatrixError::DimensionMismatch { .. } | MatrixError::TooLarge { .. } => {
                Self::DimensionMismatch { details, line }
            },
            MatrixError::IncompatibleElementTypes { .. } => Self::TypeMismatch { details, line },
            MatrixError::BufferLength { .. } => Self::Construction { details, line },
        }
    }
}
