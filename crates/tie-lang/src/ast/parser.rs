use smallvec::SmallVec;

use crate::{
    binding::{BindingKind, Function},
    builtin,
    error::InnerError,
    lexer::{
        Lexer,
        token::{Operator, Token, TokenKind},
    },
    resolver::Symbol,
};

use super::{
    error::ParseError,
    node::{Callee, Node},
};

type Result<T> = std::result::Result<T, InnerError>;
type Arguments<'a> = SmallVec<[Node<'a>; 7]>;
type BinaryOp = (&'static str, Function);

/// Recursive-descent parser with one token of lookahead.
///
/// Precedence, loosest first: `,` then `+ -` then `* / %` then `< >` then
/// `& | ^` then unary signs. Every binary tier is left-associative.
pub struct Parser<'s, 'a> {
    lexer: Lexer<'s, 'a>,
    token: Token<'a>,
}

impl<'s, 'a> Parser<'s, 'a> {
    pub fn new(mut lexer: Lexer<'s, 'a>) -> Result<Self> {
        let token = lexer.next_token()?;
        Ok(Self { lexer, token })
    }

    pub fn parse(mut self) -> Result<Node<'a>> {
        let root = self.parse_list()?;

        match self.token.kind {
            TokenKind::Eof => Ok(root),
            _ => Err(ParseError::TrailingInput(self.token.to_string(), self.token.range).into()),
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.token = self.lexer.next_token()?;
        Ok(())
    }

    fn fold_left(
        &mut self,
        mut operand: impl FnMut(&mut Self) -> Result<Node<'a>>,
        operator: fn(&TokenKind<'a>) -> Option<BinaryOp>,
    ) -> Result<Node<'a>> {
        let mut lhs = operand(self)?;

        while let Some((name, function)) = operator(&self.token.kind) {
            self.advance()?;
            let rhs = operand(self)?;
            lhs = Node::operator(name, function, [lhs, rhs])?;
        }

        Ok(lhs)
    }

    fn parse_list(&mut self) -> Result<Node<'a>> {
        self.fold_left(Self::parse_expr, |kind| match kind {
            TokenKind::Comma => Some((",", Function::Arity2(builtin::comma))),
            _ => None,
        })
    }

    fn parse_expr(&mut self) -> Result<Node<'a>> {
        self.fold_left(Self::parse_term, |kind| match kind {
            TokenKind::Operator(Operator::Plus) => Some(("+", Function::Arity2(builtin::add))),
            TokenKind::Operator(Operator::Minus) => Some(("-", Function::Arity2(builtin::sub))),
            _ => None,
        })
    }

    fn parse_term(&mut self) -> Result<Node<'a>> {
        self.fold_left(Self::parse_shift, |kind| match kind {
            TokenKind::Operator(Operator::Asterisk) => Some(("*", Function::Arity2(builtin::mul))),
            TokenKind::Operator(Operator::Slash) => Some(("/", Function::Arity2(builtin::div))),
            TokenKind::Operator(Operator::Percent) => Some(("%", Function::Arity2(builtin::rem))),
            _ => None,
        })
    }

    fn parse_shift(&mut self) -> Result<Node<'a>> {
        self.fold_left(Self::parse_bitwise, |kind| match kind {
            TokenKind::Operator(Operator::Lt) => {
                Some(("<<", Function::Arity2(builtin::shift_left)))
            }
            TokenKind::Operator(Operator::Gt) => {
                Some((">>", Function::Arity2(builtin::shift_right)))
            }
            _ => None,
        })
    }

    fn parse_bitwise(&mut self) -> Result<Node<'a>> {
        self.fold_left(Self::parse_power, |kind| match kind {
            TokenKind::Operator(Operator::Ampersand) => {
                Some(("&", Function::Arity2(builtin::bitwise_and)))
            }
            TokenKind::Operator(Operator::Pipe) => {
                Some(("|", Function::Arity2(builtin::bitwise_or)))
            }
            TokenKind::Operator(Operator::Caret) => {
                Some(("^", Function::Arity2(builtin::bitwise_xor)))
            }
            _ => None,
        })
    }

    // A run of signs collapses to at most one negation.
    fn parse_power(&mut self) -> Result<Node<'a>> {
        let mut negative = false;

        while let TokenKind::Operator(op @ (Operator::Plus | Operator::Minus)) = self.token.kind {
            negative ^= op == Operator::Minus;
            self.advance()?;
        }

        let base = self.parse_base()?;

        if negative {
            Ok(Node::operator("neg", Function::Arity1(builtin::negate), [base])?)
        } else {
            Ok(base)
        }
    }

    fn parse_base(&mut self) -> Result<Node<'a>> {
        let token = self.token;

        match token.kind {
            TokenKind::NumberLiteral(value) => {
                self.advance()?;
                Ok(Node::constant(value))
            }
            TokenKind::Ident(symbol) => self.parse_ident(symbol),
            TokenKind::LParen => {
                self.advance()?;
                let node = self.parse_list()?;
                self.expect_closing_paren()?;
                Ok(node)
            }
            TokenKind::Eof => Err(ParseError::UnexpectedEOFDetected(token.range).into()),
            _ => Err(ParseError::UnexpectedToken(token.to_string(), token.range).into()),
        }
    }

    fn parse_ident(&mut self, symbol: Symbol<'a>) -> Result<Node<'a>> {
        let callee = match symbol.kind {
            BindingKind::Variable(cell) => {
                self.advance()?;
                return Ok(Node::variable(symbol.name, cell));
            }
            BindingKind::Function(function) => Callee::Function(function),
            BindingKind::Closure(closure, context) => Callee::Closure(closure, context),
        };

        self.advance()?;

        match callee.arity() {
            0 => {
                if matches!(self.token.kind, TokenKind::LParen) {
                    self.advance()?;
                    self.expect_closing_paren()?;
                }
                Ok(Node::call(symbol.name, callee, symbol.pure, [])?)
            }
            1 => {
                let arg = self.parse_power()?;
                Ok(Node::call(symbol.name, callee, symbol.pure, [arg])?)
            }
            arity => {
                let args = self.parse_arguments(symbol.name, arity)?;
                Ok(Node::call(symbol.name, callee, symbol.pure, args)?)
            }
        }
    }

    fn parse_arguments(&mut self, name: &str, arity: usize) -> Result<Arguments<'a>> {
        if !matches!(self.token.kind, TokenKind::LParen) {
            return Err(ParseError::ExpectedOpenParen(self.token.to_string(), self.token.range).into());
        }

        let mut args = Arguments::new();

        loop {
            self.advance()?;
            args.push(self.parse_expr()?);

            if args.len() == arity || !matches!(self.token.kind, TokenKind::Comma) {
                break;
            }
        }

        match self.token.kind {
            TokenKind::RParen if args.len() == arity => {
                self.advance()?;
                Ok(args)
            }
            TokenKind::RParen => Err(ParseError::InvalidNumberOfArguments {
                name: name.to_string(),
                expected: arity,
                got: args.len(),
                range: self.token.range,
            }
            .into()),
            _ => Err(ParseError::ExpectedClosingParen(self.token.to_string(), self.token.range).into()),
        }
    }

    fn expect_closing_paren(&mut self) -> Result<()> {
        match self.token.kind {
            TokenKind::RParen => self.advance(),
            _ => Err(ParseError::ExpectedClosingParen(self.token.to_string(), self.token.range).into()),
        }
    }
}
