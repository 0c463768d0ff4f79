use std::iter::Peekable;

use crate::{
    ast::{Expr, NumberLiteral, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, expect_closing, parse_comma_separated},
        },
        value::element_type::ElementType,
    },
    util::num::i64_to_f64_checked,
};

/// Parses a unary expression.
///
/// The only prefix operator is `-` (numeric negation). It is
/// right-associative, so `--x` written with a space (`- -x`) is `-(-x)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                           expr: Box::new(expr),
                           line })
    } else {
        parse_primary(tokens)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric literals
/// - matrix literals (`[[...], ...]`)
/// - parenthesized expressions
/// - variable references
/// - the built-in `producto(a, b)` call
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER
///              | matrix
///              | "(" expression ")"
///              | IDENT
///              | "producto" "(" expression "," expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Integer(_) | Token::Float(_), line) => {
            let line = *line;
            let value = parse_number(tokens)?;
            Ok(Expr::Number { value, line })
        },
        (Token::LBracket, _) => parse_matrix_literal(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::Product, _) => parse_product_call(tokens),
        (Token::Identifier(name), line) => {
            let expr = Expr::Variable { name: name.clone(),
                                        line: *line, };
            tokens.next();
            Ok(expr)
        },
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses a numeric literal token into a [`NumberLiteral`].
///
/// Integer tokens become `Integer` literals and decimal tokens become `Float`
/// literals.
///
/// # Errors
/// - `LiteralTooLarge` if an integer cannot be represented exactly as `f64`.
/// - `UnexpectedToken` if the next token is not a number.
fn parse_number<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NumberLiteral>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Integer(n), line)) => {
            let value = i64_to_f64_checked(*n, ParseError::LiteralTooLarge { line: *line })?;
            Ok(NumberLiteral::new(value, ElementType::Integer))
        },
        Some((Token::Float(x), _)) => Ok(NumberLiteral::new(*x, ElementType::Float)),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected number, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a number inside a matrix literal, allowing a leading `-`.
fn parse_signed_number<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<NumberLiteral>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, _)) = tokens.peek() {
        tokens.next();
        return Ok(parse_number(tokens)?.negated());
    }
    parse_number(tokens)
}

/// Parses a matrix literal of the form `[[1, 2], [3, 4]]`.
///
/// The literal must have at least one row and every row at least one number.
/// Rows of different lengths are accepted here; the evaluator rejects them so
/// the error is reported like any other runtime failure.
///
/// Grammar:
/// ```text
///     matrix := "[" row ("," row)* "]"
///     row    := "[" "-"? NUMBER ("," "-"? NUMBER)* "]"
/// ```
///
/// # Errors
/// Returns a `ParseError` for empty literals, empty rows, non-numeric elements
/// or missing brackets.
fn parse_matrix_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBracket, "[")?;

    let rows = parse_comma_separated(tokens, parse_matrix_row, &Token::RBracket)?;
    if rows.is_empty() {
        return Err(ParseError::UnexpectedToken { token: "Matrix literal needs at least one row".to_string(),
                                                 line });
    }

    Ok(Expr::MatrixLiteral { rows, line })
}

fn parse_matrix_row<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<NumberLiteral>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBracket, "[")?;

    let row = parse_comma_separated(tokens, parse_signed_number, &Token::RBracket)?;
    if row.is_empty() {
        return Err(ParseError::UnexpectedToken { token: "Matrix row needs at least one element".to_string(),
                                                 line });
    }
    Ok(row)
}

/// Parses a parenthesized expression `( expr )`.
///
/// Parentheses only group; they leave no node in the tree.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LParen, "(")?;
    let expr = parse_expression(tokens)?;
    expect_closing(tokens, &Token::RParen, ")", line)?;
    Ok(expr)
}

/// Parses the built-in product call `producto(a, b)`.
///
/// # Errors
/// Returns a `ParseError` if the call does not have exactly two
/// comma-separated arguments.
fn parse_product_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Product, "producto")?;
    expect(tokens, &Token::LParen, "(")?;
    let left = parse_expression(tokens)?;
    expect(tokens, &Token::Comma, ",")?;
    let right = parse_expression(tokens)?;
    expect_closing(tokens, &Token::RParen, ")", line)?;

    Ok(Expr::ProductCall { left: Box::new(left),
                           right: Box::new(right),
                           line })
}
