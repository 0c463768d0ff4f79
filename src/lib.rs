//! # matcalc
//!
//! matcalc is an interpreter for a small scalar and matrix arithmetic
//! language written in Rust. Programs declare typed variables, combine
//! numbers and matrices with `+ - * / @` and print the results.
//!
//! ```text
//! declarar a: matriz<entero>[2, 2] = [[1, 2], [3, 4]]
//! declarar b = producto(a, a) * 0.5
//! imprimir(b)
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{
        evaluator::{
            core::{Context, EvalConfig},
            report::Reporter,
        },
        lexer::tokenize,
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of a program as a tree. The AST is built by the parser
/// and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression, statement and type annotation nodes.
/// - Attaches source lines to nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Parse errors stop a program before it runs. Runtime errors stop a single
/// statement; each carries the source line and an [`error::ErrorKind`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and formatting.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Round and format numbers the way the language prints them.
pub mod util;

/// Tokenizes and parses a whole program.
///
/// # Errors
/// Returns the first lexing or parsing error.
///
/// # Examples
/// ```
/// use matcalc::parse_source;
///
/// let program = parse_source("declarar x: entero = 2\nimprimir(x * 3)").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// // Neither a type nor a value.
/// assert!(parse_source("declarar x").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&tokens)
}

/// Parses and runs a program, returning the context it ran in.
///
/// Nothing runs if the source does not parse. Otherwise every statement is
/// executed in order; failures are handed to `reporter` and do not stop the
/// run. The returned context holds the final variables.
///
/// # Errors
/// Returns a `ParseError` if the source is not a valid program.
///
/// # Examples
/// ```
/// use matcalc::{
///     interpreter::evaluator::{core::EvalConfig, report::Transcript},
///     run_source,
/// };
///
/// let source = "declarar m = [[1, 2], [3, 4]]\n\
///               imprimir(m @ m)\n\
///               imprimir(1 / 0)";
/// let mut transcript = Transcript::default();
/// let context = run_source(source, EvalConfig::default(), &mut transcript).unwrap();
///
/// assert_eq!(transcript.output,
///            vec!["Matrix 2 x 2\n[[7, 10], [15, 22]]".to_string(),
///                 "Print: invalid value or error".to_string()]);
/// assert_eq!(transcript.diagnostics.len(), 1);
/// assert!(context.environment().contains("m"));
/// ```
pub fn run_source(source: &str,
                  config: EvalConfig,
                  reporter: &mut impl Reporter)
                  -> Result<Context, ParseError> {
    let program = parse_source(source)?;
    let mut context = Context::with_config(config);
    context.run(&program, reporter);
    Ok(context)
}
