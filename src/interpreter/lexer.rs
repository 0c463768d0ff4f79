use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Keywords are matched without regard to case, so `IMPRIMIR` and `imprimir`
/// are the same token.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Decimal literal tokens, such as `3.14` or `2.0`. A decimal point makes
    /// a literal `Float`.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// `declarar`
    #[token("declarar", ignore(case))]
    Declare,
    /// `imprimir`
    #[token("imprimir", ignore(case))]
    Print,
    /// `producto`
    #[token("producto", ignore(case))]
    Product,
    /// `matriz` (also accepted as `matrix`)
    #[token("matriz", ignore(case))]
    #[token("matrix", ignore(case))]
    Matrix,
    /// `entero`
    #[token("entero", ignore(case))]
    IntegerType,
    /// `flotante`
    #[token("flotante", ignore(case))]
    FloatType,
    /// Identifier tokens; variable names such as `x` or `total_2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `-- Comments.`
    #[regex(r"--[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `@`
    #[token("@")]
    At,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,

    /// Line breaks separate statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Whether this token opens a bracketed group inside which line breaks
    /// are not significant.
    #[must_use]
    pub const fn opens_group(&self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::Less)
    }

    /// Whether this token closes a bracketed group.
    #[must_use]
    pub const fn closes_group(&self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::Greater)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a floating-point literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit an `i64`, which makes it a lexing
///   error.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Splits source text into `(Token, line)` pairs.
///
/// Line breaks are kept as [`Token::NewLine`] because they end statements,
/// except inside `()`, `[]` or `<>` where they are dropped so a long matrix
/// literal can span several lines.
///
/// # Errors
/// Returns `UnexpectedToken` with the offending text for any character the
/// language does not know.
///
/// # Example
/// ```
/// use matcalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("declarar m = [[1,\n 2]]\nimprimir(m)").unwrap();
///
/// assert_eq!(tokens.iter().filter(|(t, _)| *t == Token::NewLine).count(), 1);
/// assert_eq!(tokens.last(), Some(&(Token::RParen, 3)));
/// assert!(tokenize("declarar x = 1 $ 2").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut depth = 0usize;

    while let Some(token) = lexer.next() {
        let Ok(tok) = token else {
            return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                     line:  lexer.extras.line, });
        };

        if tok.opens_group() {
            depth += 1;
        } else if tok.closes_group() {
            depth = depth.saturating_sub(1);
        } else if tok == Token::NewLine {
            if depth > 0 {
                continue;
            }
            // The newline belongs to the line it ends.
            tokens.push((tok, lexer.extras.line - 1));
            continue;
        }

        tokens.push((tok, lexer.extras.line));
    }

    Ok(tokens)
}
