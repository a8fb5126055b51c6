use thiserror::Error;

use crate::range::Range;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseError {
    #[error("Unexpected token `{0}`")]
    UnexpectedToken(String, Range),
    #[error("Unexpected EOF detected")]
    UnexpectedEOFDetected(Range),
    #[error("Expected an opening parenthesis `(` but got `{0}`")]
    ExpectedOpenParen(String, Range),
    #[error("Expected a closing parenthesis `)` but got `{0}` delimiter")]
    ExpectedClosingParen(String, Range),
    #[error("Invalid number of arguments in `{name}`, expected {expected}, got {got}")]
    InvalidNumberOfArguments {
        name: String,
        expected: usize,
        got: usize,
        range: Range,
    },
    #[error("Unexpected trailing input `{0}`")]
    TrailingInput(String, Range),
}

impl ParseError {
    pub fn range(&self) -> Range {
        match self {
            ParseError::UnexpectedToken(_, range)
            | ParseError::UnexpectedEOFDetected(range)
            | ParseError::ExpectedOpenParen(_, range)
            | ParseError::ExpectedClosingParen(_, range)
            | ParseError::InvalidNumberOfArguments { range, .. }
            | ParseError::TrailingInput(_, range) => *range,
        }
    }
}

/// Storage for the children of a node could not be reserved.
#[derive(Error, Debug, PartialEq, Clone)]
#[error("Failed to allocate {0} argument slots")]
pub struct AllocationError(pub usize);
