use std::fmt;

use crate::error::Position;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Space,
    Eol,
    Comment,

    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,

    AttributeStart,
    AttributeEnd,

    Colon,
    Comma,
    Semicolon,

    Class,
    Struct,
    Namespace,
    Auto,
    Public,
    Private,
    Protected,
    Template,
    Using,

    Macro,

    Identifier,
    NumberLiteral,
    StringLiteral,
    CharLiteral,
}

impl TokenKind {
    /// Keyword for an exact identifier-like text.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        match text {
            "class" => Some(TokenKind::Class),
            "struct" => Some(TokenKind::Struct),
            "namespace" => Some(TokenKind::Namespace),
            "auto" => Some(TokenKind::Auto),
            "public" => Some(TokenKind::Public),
            "private" => Some(TokenKind::Private),
            "protected" => Some(TokenKind::Protected),
            "template" => Some(TokenKind::Template),
            "using" => Some(TokenKind::Using),
            _ => None,
        }
    }

    /// Single-character punctuation. Anything unknown lexes as an identifier.
    pub fn punctuation(ch: char) -> TokenKind {
        match ch {
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '#' => TokenKind::Macro,
            _ => TokenKind::Identifier,
        }
    }

    /// Tokens the parser never sees.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Eol | TokenKind::Comment)
    }

    pub fn is_access_specifier(self) -> bool {
        matches!(self, TokenKind::Public | TokenKind::Private | TokenKind::Protected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Space => "whitespace",
            TokenKind::Eol => "end of line",
            TokenKind::Comment => "comment",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::AttributeStart => "'[['",
            TokenKind::AttributeEnd => "']]'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Class => "'class'",
            TokenKind::Struct => "'struct'",
            TokenKind::Namespace => "'namespace'",
            TokenKind::Auto => "'auto'",
            TokenKind::Public => "'public'",
            TokenKind::Private => "'private'",
            TokenKind::Protected => "'protected'",
            TokenKind::Template => "'template'",
            TokenKind::Using => "'using'",
            TokenKind::Macro => "'#'",
            TokenKind::Identifier => "identifier",
            TokenKind::NumberLiteral => "number literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "character literal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text. String literals keep their quotes.
    pub text: String,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Position) -> Self {
        Self { kind, text: text.into(), pos }
    }

    /// Value of a literal: string contents without the surrounding quotes,
    /// the raw text for everything else.
    pub fn literal_value(&self) -> &str {
        if self.kind == TokenKind::StringLiteral {
            let inner = self.text.strip_prefix('"').unwrap_or(&self.text);
            inner.strip_suffix('"').unwrap_or(inner)
        } else {
            &self.text
        }
    }

    /// True when the token is a word (identifier, keyword or number) rather
    /// than punctuation.
    pub fn is_word(&self) -> bool {
        self.text.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_')
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.text, self.pos)
    }
}
