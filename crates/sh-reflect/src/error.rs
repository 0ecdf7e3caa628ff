use std::fmt;

use crate::lexer::TokenKind;

/// Position in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize, // Character offset
    pub line: usize,   // Line number (1-based)
    pub column: usize, // Column number (1-based)
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset, line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lexer errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string literal starting at {pos}")]
    UnterminatedString { pos: Position },
}

/// Parser errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Expected {expected}, found {found} '{text}' at {pos}")]
    TokenMismatch { expected: TokenKind, found: TokenKind, text: String, pos: Position },

    #[error("Expected a literal, found {found} '{text}' at {pos}")]
    ExpectedLiteral { found: TokenKind, text: String, pos: Position },

    #[error("Expected {expected}, found end of input")]
    UnexpectedEof { expected: TokenKind },

    #[error("Lexer error: {0}")]
    LexError(#[from] LexError),
}

impl ParseError {
    /// Source position of the offending token, when there is one.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::TokenMismatch { pos, .. } | ParseError::ExpectedLiteral { pos, .. } => {
                Some(*pos)
            }
            ParseError::UnexpectedEof { .. } => None,
            ParseError::LexError(LexError::UnterminatedString { pos }) => Some(*pos),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
