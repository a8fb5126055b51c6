pub mod error;
pub mod token;

use error::LexerError;
use nom::Parser;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, multispace0, satisfy},
    combinator::{map, peek, recognize},
    multi::many0,
    number::complete::recognize_float,
    sequence::{pair, preceded},
};
use token::{Operator, Token, TokenKind};

use crate::number::Number;
use crate::range::{Range, Span};
use crate::resolver::Resolver;

macro_rules! define_token_parser {
    ($name:ident, $tag:expr, $kind:expr) => {
        fn $name(input: Span) -> IResult<Span, Token<'static>> {
            map(tag($tag), |span: Span| Token {
                range: span.into(),
                kind: $kind,
            })
            .parse(input)
        }
    };
}

define_token_parser!(l_paren, "(", TokenKind::LParen);
define_token_parser!(r_paren, ")", TokenKind::RParen);
define_token_parser!(comma, ",", TokenKind::Comma);
define_token_parser!(plus, "+", TokenKind::Operator(Operator::Plus));
define_token_parser!(minus, "-", TokenKind::Operator(Operator::Minus));
define_token_parser!(asterisk, "*", TokenKind::Operator(Operator::Asterisk));
define_token_parser!(slash, "/", TokenKind::Operator(Operator::Slash));
define_token_parser!(percent, "%", TokenKind::Operator(Operator::Percent));
define_token_parser!(ampersand, "&", TokenKind::Operator(Operator::Ampersand));
define_token_parser!(pipe, "|", TokenKind::Operator(Operator::Pipe));
define_token_parser!(caret, "^", TokenKind::Operator(Operator::Caret));
define_token_parser!(tilde, "~", TokenKind::Operator(Operator::Tilde));
define_token_parser!(lt, "<", TokenKind::Operator(Operator::Lt));
define_token_parser!(gt, ">", TokenKind::Operator(Operator::Gt));

fn punctuations(input: Span) -> IResult<Span, Token<'static>> {
    alt((l_paren, r_paren, comma)).parse(input)
}

fn operators(input: Span) -> IResult<Span, Token<'static>> {
    alt((
        plus, minus, asterisk, slash, percent, ampersand, pipe, caret, tilde, lt, gt,
    ))
    .parse(input)
}

// A literal starts with a digit or a dot; signs belong to the grammar.
fn number_literal(input: Span) -> IResult<Span, Span> {
    preceded(
        peek(satisfy(|c: char| c.is_ascii_digit() || c == '.')),
        recognize_float,
    )
    .parse(input)
}

fn ident(input: Span) -> IResult<Span, Span> {
    recognize(pair(alpha1, many0(alt((alphanumeric1, tag("_")))))).parse(input)
}

fn skip_whitespace(input: Span) -> Span {
    multispace0::<_, nom::error::Error<Span>>(input)
        .map(|(rest, _)| rest)
        .unwrap_or(input)
}

fn number_token(span: Span) -> Result<Token<'static>, LexerError> {
    span.fragment()
        .parse::<f64>()
        .map(|value| Token {
            range: span.into(),
            kind: TokenKind::NumberLiteral(Number::from_literal(value)),
        })
        .map_err(|_| LexerError::InvalidNumber(span.fragment().to_string(), span.into()))
}

/// Pull-based scanner producing one token per call.
///
/// Identifiers are resolved while scanning, so an unknown name is reported
/// at the position where it appears.
pub struct Lexer<'s, 'a> {
    input: Span<'s>,
    resolver: Resolver<'s, 'a>,
}

impl<'s, 'a> Lexer<'s, 'a> {
    pub fn new(code: &'s str, resolver: Resolver<'s, 'a>) -> Self {
        Self {
            input: Span::new(code),
            resolver,
        }
    }

    /// Returns the next token. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexerError> {
        let input = skip_whitespace(self.input);
        let (rest, token) = self.scan(input)?;

        tracing::trace!(%token, start = token.range.start, end = token.range.end, "scanned token");
        self.input = rest;
        Ok(token)
    }

    /// Scans the remaining input, including the trailing `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>, LexerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let eof = token.is_eof();
            tokens.push(token);

            if eof {
                return Ok(tokens);
            }
        }
    }

    fn scan(&self, input: Span<'s>) -> Result<(Span<'s>, Token<'a>), LexerError> {
        let start = input.location_offset();

        if input.fragment().is_empty() {
            return Ok((
                input,
                Token {
                    range: Range::empty(start),
                    kind: TokenKind::Eof,
                },
            ));
        }

        match number_literal(input) {
            Ok((rest, span)) => return number_token(span).map(|token| (rest, token)),
            Err(nom::Err::Failure(e)) => {
                let end = e.input.location_offset();
                let literal = input.fragment().get(..end - start).unwrap_or(input.fragment());
                return Err(LexerError::InvalidNumber(
                    literal.to_string(),
                    Range::new(start, end),
                ));
            }
            Err(_) => {}
        }

        if let Ok((rest, token)) = alt((punctuations, operators)).parse(input) {
            return Ok((rest, token));
        }

        if let Ok((rest, name)) = ident(input) {
            let range = Range::from(name);
            return match self.resolver.resolve(name.fragment()) {
                Some(symbol) => Ok((
                    rest,
                    Token {
                        range,
                        kind: TokenKind::Ident(symbol),
                    },
                )),
                None => Err(LexerError::UndefinedIdentifier(
                    name.fragment().to_string(),
                    range,
                )),
            };
        }

        let c = input.fragment().chars().next().unwrap_or_default();
        Err(LexerError::UnexpectedCharacter(
            c,
            Range::new(start, start + c.len_utf8()),
        ))
    }
}
