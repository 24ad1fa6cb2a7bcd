//! Error handling for nn-lang
//!
//! The tokenizer and the generator never fail; only the parser and
//! file-level helpers produce these.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Translator error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Parser Errors ====================

    #[error("line {line}: unexpected token: expected {expected}, got {got}")]
    UnexpectedToken {
        expected: String,
        got: String,
        line: usize,
    },

    #[error("line {line}: unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String, line: usize },

    #[error("line {line}: illegal character '{ch}'")]
    IllegalCharacter { ch: String, line: usize },

    #[error("line {line}: expected expression, got {got}")]
    ExpectedExpr { got: String, line: usize },

    #[error("line {line}: nesting too deep (limit {limit})")]
    NestingTooDeep { limit: usize, line: usize },

    // ==================== Driver Errors ====================

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Get the source line associated with this error
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { line, .. } => Some(*line),
            Self::UnexpectedEof { line, .. } => Some(*line),
            Self::IllegalCharacter { line, .. } => Some(*line),
            Self::ExpectedExpr { line, .. } => Some(*line),
            Self::NestingTooDeep { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
