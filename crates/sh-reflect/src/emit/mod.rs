//! Code generation from the reflection model.

mod printer;
mod writer;

pub use printer::{Indent, IndentPrinter};
pub use writer::{ReflectionWriter, DEFAULT_RUNTIME_HEADER};
