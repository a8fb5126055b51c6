use thiserror::Error;

use crate::range::Range;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum LexerError {
    #[error("Unexpected character `{0}`")]
    UnexpectedCharacter(char, Range),
    #[error("Undefined identifier `{0}`")]
    UndefinedIdentifier(String, Range),
    #[error("Invalid number literal `{0}`")]
    InvalidNumber(String, Range),
}

impl LexerError {
    pub fn range(&self) -> Range {
        match self {
            LexerError::UnexpectedCharacter(_, range)
            | LexerError::UndefinedIdentifier(_, range)
            | LexerError::InvalidNumber(_, range) => *range,
        }
    }
}
