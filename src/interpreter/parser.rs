/// Core parsing entry points.
///
/// Contains the program-level loop and the top of the expression grammar.
pub mod core;

/// Statement parsing.
///
/// Declarations with optional type annotations, assignments and prints.
pub mod statement;

/// Binary operator parsing.
///
/// Handles the two precedence levels: `+ -` and `* / @`.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Negation, literals, matrix literals, grouping, variables and the
/// `producto` call.
pub mod unary;

/// Utility functions for the parser.
///
/// Token expectations and comma-separated list parsing shared by the other
/// parser modules.
pub mod utils;
