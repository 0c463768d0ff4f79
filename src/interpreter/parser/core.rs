use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_additive, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// Statements are separated by line breaks or `;`. Empty lines and stray
/// separators are skipped. Anything left on a line after a complete statement
/// is an error.
///
/// Grammar: `program := (separator* statement separator*)*`
///
/// # Parameters
/// - `tokens`: `(Token, line)` pairs as produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The parsed [`Program`].
///
/// # Example
/// ```
/// use matcalc::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("declarar x = 1; imprimir(x)\n").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        while let Some((Token::NewLine | Token::Semicolon, _)) = iter.peek() {
            iter.next();
        }
        if iter.peek().is_none() {
            break;
        }

        statements.push(parse_statement(&mut iter)?);

        match iter.peek() {
            None | Some((Token::NewLine | Token::Semicolon, _)) => {},
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                                  line:  *line, });
            },
        }
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, addition, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := additive`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens)
}
