use std::fmt::{self, Display, Formatter};

use crate::{number::Number, range::Range, resolver::Symbol};

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Lt,
    Gt,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Asterisk => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Ampersand => "&",
            Operator::Pipe => "|",
            Operator::Caret => "^",
            Operator::Tilde => "~",
            Operator::Lt => "<",
            Operator::Gt => ">",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub range: Range,
    pub kind: TokenKind<'a>,
}

impl Token<'_> {
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TokenKind<'a> {
    NumberLiteral(Number),
    Ident(Symbol<'a>),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
    Eof,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.kind)
    }
}

impl Display for TokenKind<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TokenKind::NumberLiteral(n) => write!(f, "{}", n),
            TokenKind::Ident(symbol) => write!(f, "{}", symbol.name),
            TokenKind::Operator(op) => write!(f, "{}", op),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}
