/// Core evaluation logic and context management.
///
/// Contains the runtime context, its configuration, expression dispatch and
/// literal evaluation.
pub mod core;

/// The variable table.
///
/// Owns every binding created while a program runs.
pub mod environment;

/// Binary operator evaluation logic.
///
/// Handles `+ - * / @` for every combination of scalar and matrix operands,
/// including type promotion and dimension checks.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric negation.
pub mod unary;

/// Statement evaluation.
///
/// Declarations, assignments and prints, and the statement runner that hands
/// their results to a [`Reporter`](report::Reporter).
pub mod statement;

/// Output and diagnostic sinks.
pub mod report;
