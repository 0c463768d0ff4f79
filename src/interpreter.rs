/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// applies the promotion and dimension rules of every operator, manages
/// variable state, and reports results. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles declarations, assignments and prints.
/// - Reports runtime errors such as division by zero or mismatched shapes.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source line.
/// - Handles numeric literals, identifiers, keywords and operators.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of statements and
/// expressions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the two kinds of runtime values, scalars and
/// matrices, together with the element type tag they carry and the rule for
/// combining tags.
///
/// # Responsibilities
/// - Defines the `Value` enum and its variants.
/// - Implements the matrix engine, including both multiplication kernels.
/// - Provides the promotion between `Integer` and `Float`.
pub mod value;
