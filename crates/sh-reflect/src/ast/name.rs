use std::fmt;

use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Identifier,
    Number,
}

impl LiteralKind {
    pub fn of(kind: TokenKind) -> Option<LiteralKind> {
        match kind {
            TokenKind::StringLiteral => Some(LiteralKind::String),
            TokenKind::Identifier => Some(LiteralKind::Identifier),
            TokenKind::NumberLiteral => Some(LiteralKind::Number),
            _ => None,
        }
    }
}

/// A single identifier, number or string token.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub token: Token,
    pub kind: LiteralKind,
}

impl Literal {
    pub fn new(token: Token, kind: LiteralKind) -> Self {
        Self { token, kind }
    }

    pub fn value(&self) -> &str {
        self.token.literal_value()
    }
}

/// Identifier path such as `ShadowEngine::Entities::Component`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub parts: Vec<Literal>,
}

impl QualifiedName {
    pub fn new(parts: Vec<Literal>) -> Self {
        debug_assert!(!parts.is_empty(), "qualified names have at least one part");
        Self { parts }
    }

    /// Last component, e.g. `Component` for `Entities::Component`.
    pub fn simple_name(&self) -> &str {
        self.parts.last().map(Literal::value).unwrap_or_default()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(part.value())?;
        }
        Ok(())
    }
}

/// Render a type from its leading name and the tokens folded after it.
///
/// Adjacent words are separated by one space and commas are followed by one,
/// everything else is glued: `std::map<int, float>`, `const char*`.
pub fn type_text(name: &QualifiedName, suffix: &[Token]) -> String {
    let mut text = name.to_string();

    for token in suffix {
        if token.is_word() && text.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
            text.push(' ');
        }
        text.push_str(&token.text);
        if token.kind == TokenKind::Comma {
            text.push(' ');
        }
    }

    text
}
