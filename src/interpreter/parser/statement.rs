use std::iter::Peekable;

use crate::{
    ast::{Statement, TypeAnnotation},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, expect_closing, parse_identifier},
        },
        value::element_type::ElementType,
    },
    util::num::i64_to_usize_checked,
};

/// Parses a single statement.
/// A statement may be one of:
/// - a declaration (`declarar x: entero = 4`),
/// - a print (`imprimir(x)`),
/// - an assignment (`x = 4`).
///
/// The statement's source line is the line of its first token.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns a `ParseError` when the tokens do not start any of the three
/// statement forms, or when a statement is malformed.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Declare, _)) => parse_declaration(tokens),
        Some((Token::Print, _)) => parse_print(tokens),
        Some((Token::Identifier(_), _)) => parse_assignment(tokens),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected a statement, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a declaration statement.
///
/// Forms:
///
/// - `declarar <identifier> = <expression>`
/// - `declarar <identifier> : <annotation>`
/// - `declarar <identifier> : <annotation> = <expression>`
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is missing,
/// - the annotation is malformed,
/// - there is neither an annotation nor an initializer.
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Declare, "declarar")?;
    let (name, _) = parse_identifier(tokens)?;

    let annotation = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        Some(parse_type_annotation(tokens)?)
    } else {
        None
    };

    let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    if annotation.is_none() && initializer.is_none() {
        return Err(ParseError::EmptyDeclaration { name, line });
    }

    Ok(Statement::Declaration { name,
                                annotation,
                                initializer,
                                line })
}

/// Parses a type annotation.
///
/// Grammar:
/// ```text
///     annotation := "entero" | "flotante"
///                 | "matriz" "<" element ">" "[" INT "," INT "]"
/// ```
///
/// # Errors
/// Returns `InvalidDimensions` when either dimension is zero, and
/// `UnexpectedToken` for anything that is not a type.
fn parse_type_annotation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeAnnotation>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::IntegerType, _)) => Ok(TypeAnnotation::Scalar(ElementType::Integer)),
        Some((Token::FloatType, _)) => Ok(TypeAnnotation::Scalar(ElementType::Float)),
        Some((Token::Matrix, line)) => {
            let line = *line;
            expect(tokens, &Token::Less, "<")?;
            let element_type = parse_element_type(tokens)?;
            expect_closing(tokens, &Token::Greater, ">", line)?;

            expect(tokens, &Token::LBracket, "[")?;
            let rows = parse_dimension(tokens)?;
            expect(tokens, &Token::Comma, ",")?;
            let columns = parse_dimension(tokens)?;
            expect_closing(tokens, &Token::RBracket, "]", line)?;

            if rows == 0 || columns == 0 {
                return Err(ParseError::InvalidDimensions { rows,
                                                           columns,
                                                           line });
            }

            Ok(TypeAnnotation::Matrix { element_type,
                                        rows,
                                        columns })
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected a type, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

fn parse_element_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ElementType>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::IntegerType, _)) => Ok(ElementType::Integer),
        Some((Token::FloatType, _)) => Ok(ElementType::Float),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected 'entero' or 'flotante', found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

fn parse_dimension<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Integer(n), line)) => {
            i64_to_usize_checked(*n, ParseError::LiteralTooLarge { line: *line })
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected a dimension, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses `imprimir(<expression>)`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Print, "imprimir")?;
    expect(tokens, &Token::LParen, "(")?;
    let expr = parse_expression(tokens)?;
    expect_closing(tokens, &Token::RParen, ")", line)?;

    Ok(Statement::Print { expr, line })
}

/// Parses `<identifier> = <expression>`.
///
/// # Errors
/// Returns a `ParseError` if the identifier is not followed by `=` or the
/// expression is malformed.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals, "=")?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assignment { name, value, line })
}
