use miette::{Diagnostic, SourceSpan};

use crate::{
    ast::error::{AllocationError, ParseError},
    lexer::error::LexerError,
    range::Range,
};

#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum InnerError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

impl InnerError {
    /// Range of the token at which compilation stopped.
    pub fn range(&self) -> Option<Range> {
        match self {
            InnerError::Lexer(err) => Some(err.range()),
            InnerError::Parse(err) => Some(err.range()),
            InnerError::Allocation(_) => None,
        }
    }
}

/// Represents a compile error with diagnostic information for the user.
#[derive(PartialEq, Debug, Clone, thiserror::Error)]
#[error("{cause}")]
pub struct Error {
    /// The underlying cause of the error.
    pub cause: InnerError,
    /// The source code related to the error.
    pub source_code: String,
    /// The location in the source code for diagnostics.
    pub location: SourceSpan,
}

impl Error {
    /// Code reported for allocation failures.
    pub const ALLOCATION_FAILURE: i32 = -1;

    pub fn from_error(source_code: impl Into<String>, cause: InnerError) -> Self {
        let location = cause
            .range()
            .map(SourceSpan::from)
            .unwrap_or_else(|| SourceSpan::from(0..0));

        Self {
            cause,
            source_code: source_code.into(),
            location,
        }
    }

    /// Byte offset just past the token at which compilation stopped.
    ///
    /// `None` for allocation failures, which have no source position.
    pub fn offset(&self) -> Option<usize> {
        self.cause.range().map(|range| range.end)
    }

    /// Numeric error code.
    ///
    /// Lexical and syntax errors report their [`offset`](Self::offset), with
    /// an offset of zero reported as 1 so that every failure is non-zero.
    /// Allocation failures report [`Error::ALLOCATION_FAILURE`].
    pub fn code(&self) -> i32 {
        match self.offset() {
            Some(offset) => i32::try_from(offset.max(1)).unwrap_or(i32::MAX),
            None => Self::ALLOCATION_FAILURE,
        }
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let c = match &self.cause {
            InnerError::Lexer(LexerError::UnexpectedCharacter(_, _)) => "LexerError::UnexpectedCharacter",
            InnerError::Lexer(LexerError::UndefinedIdentifier(_, _)) => "LexerError::UndefinedIdentifier",
            InnerError::Lexer(LexerError::InvalidNumber(_, _)) => "LexerError::InvalidNumber",
            InnerError::Parse(ParseError::UnexpectedToken(_, _)) => "ParseError::UnexpectedToken",
            InnerError::Parse(ParseError::UnexpectedEOFDetected(_)) => "ParseError::UnexpectedEOFDetected",
            InnerError::Parse(ParseError::ExpectedOpenParen(_, _)) => "ParseError::ExpectedOpenParen",
            InnerError::Parse(ParseError::ExpectedClosingParen(_, _)) => "ParseError::ExpectedClosingParen",
            InnerError::Parse(ParseError::InvalidNumberOfArguments { .. }) => {
                "ParseError::InvalidNumberOfArguments"
            }
            InnerError::Parse(ParseError::TrailingInput(_, _)) => "ParseError::TrailingInput",
            InnerError::Allocation(_) => "AllocationError",
        };

        Some(Box::new(c))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let msg = match &self.cause {
            InnerError::Lexer(LexerError::UnexpectedCharacter(_, _)) => {
                Some("Only digits, identifiers, `+ - * / % & | ^ < >`, parentheses and commas are allowed.".to_string())
            }
            InnerError::Lexer(LexerError::UndefinedIdentifier(name, _)) => Some(format!(
                "`{name}` is neither a bound name nor one of the builtins `abs`, `floor` and `if`."
            )),
            InnerError::Lexer(LexerError::InvalidNumber(_, _)) => {
                Some("An exponent must be followed by at least one digit.".to_string())
            }
            InnerError::Parse(ParseError::UnexpectedEOFDetected(_)) => {
                Some("Input ended unexpectedly. Make sure all expressions are complete.".to_string())
            }
            InnerError::Parse(ParseError::InvalidNumberOfArguments { name, expected, .. }) => {
                Some(format!("`{name}` takes exactly {expected} comma-separated arguments."))
            }
            InnerError::Parse(ParseError::ExpectedClosingParen(_, _)) => {
                Some("Add a closing parenthesis `)`.".to_string())
            }
            InnerError::Parse(ParseError::ExpectedOpenParen(_, _)) => {
                Some("Functions with more than one argument need parentheses.".to_string())
            }
            InnerError::Parse(ParseError::UnexpectedToken(_, _) | ParseError::TrailingInput(_, _)) => {
                Some("Check for syntax errors or misplaced tokens.".to_string())
            }
            InnerError::Allocation(_) => None,
        };

        msg.map(|m| Box::new(m) as Box<dyn std::fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(
            miette::LabeledSpan::new_with_span(Some(format!("{}", self.cause)), self.location),
        )))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }
}
