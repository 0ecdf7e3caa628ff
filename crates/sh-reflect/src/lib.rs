//! Reflection metadata for annotated C++ headers.
//!
//! The pipeline is [`lexer::tokenize`] → [`Parser`] → [`extract()`] →
//! [`ReflectionWriter::render`].

pub mod ast;
pub mod emit;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod model;
pub mod parser;

// Re-export commonly used items
pub use ast::{CompilationUnit, Node, NodeKind};
pub use emit::{IndentPrinter, ReflectionWriter};
pub use error::{LexError, ParseError, Position, Result};
pub use extract::extract;
pub use lexer::{tokenize, Token, TokenKind};
pub use model::{Attribute, Clazz, Field, Marker};
pub use parser::Parser;

/// Tokenize, parse and extract one file's text in a single call.
pub fn extract_source(source: &str, declaring_file: &str) -> Result<Vec<Clazz>> {
    let unit = Parser::parse_str(source)?;
    Ok(extract(&unit, declaring_file))
}
