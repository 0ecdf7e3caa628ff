//! Tokenizer for the annotated C++ subset.
//!
//! Every character of the input ends up in exactly one token; nothing is
//! dropped. Whitespace, line breaks and comments are emitted as trivia tokens
//! and filtered out by the parser.

mod token;

pub use token::{Token, TokenKind};

use crate::error::{LexError, Position};

/// Tokenize a whole file.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

pub struct Lexer {
    input: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Carriage returns are removed before scanning.
    pub fn new(input: &str) -> Self {
        Self { input: input.chars().filter(|&c| c != '\r').collect(), current: 0, line: 1, column: 1 }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current_char() {
            tokens.push(self.next_token(ch)?);
        }

        log::trace!("tokenized {} characters into {} tokens", self.input.len(), tokens.len());
        Ok(tokens)
    }

    fn next_token(&mut self, ch: char) -> Result<Token, LexError> {
        let pos = self.current_position();
        let start = self.current;

        let kind = match ch {
            ' ' | '\t' => {
                self.advance();
                TokenKind::Space
            }
            '\n' => {
                self.advance();
                TokenKind::Eol
            }
            '[' if self.peek() == Some('[') => {
                self.advance_by(2);
                TokenKind::AttributeStart
            }
            ']' if self.peek() == Some(']') => {
                self.advance_by(2);
                TokenKind::AttributeEnd
            }
            '/' if self.peek() == Some('/') => {
                self.read_line_comment();
                TokenKind::Comment
            }
            '/' if self.peek() == Some('*') => {
                self.read_block_comment();
                TokenKind::Comment
            }
            '"' => {
                self.read_string(pos)?;
                TokenKind::StringLiteral
            }
            '\'' if self.read_char_literal() => TokenKind::CharLiteral,
            _ if ch.is_ascii_digit() => {
                self.advance_while(|c| c.is_ascii_digit());
                TokenKind::NumberLiteral
            }
            _ if is_word_start(ch) => {
                self.advance_while(is_word_char);
                let text: String = self.input[start..self.current].iter().collect();
                return Ok(Token {
                    kind: TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier),
                    text,
                    pos,
                });
            }
            _ => {
                self.advance();
                TokenKind::punctuation(ch)
            }
        };

        let text: String = self.input[start..self.current].iter().collect();
        Ok(Token { kind, text, pos })
    }

    fn read_string(&mut self, pos: Position) -> Result<(), LexError> {
        self.advance(); // Skip opening '"'

        loop {
            match self.current_char() {
                None => return Err(LexError::UnterminatedString { pos }),
                Some('"') => {
                    self.advance();
                    return Ok(());
                }
                Some('\\') => {
                    self.advance();
                    if self.is_at_end() {
                        return Err(LexError::UnterminatedString { pos });
                    }
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Consume `'x'` or `'\''`. A quote left open at the end of its line is
    /// not a literal; the cursor is put back and it lexes as punctuation.
    fn read_char_literal(&mut self) -> bool {
        let (current, column) = (self.current, self.column);
        self.advance(); // Skip opening '\''

        loop {
            match self.current_char() {
                None | Some('\n') => break,
                Some('\'') => {
                    self.advance();
                    return true;
                }
                Some('\\') => {
                    self.advance();
                    if self.current_char().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some(_) => self.advance(),
            }
        }

        self.current = current;
        self.column = column;
        false
    }

    fn read_line_comment(&mut self) {
        self.advance_while(|c| c != '\n');
    }

    fn read_block_comment(&mut self) {
        self.advance_by(2); // Skip "/*"

        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek() == Some('/') {
                self.advance_by(2);
                return;
            }
            self.advance();
        }
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.current_char() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.current += 1;

            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn current_position(&self) -> Position {
        Position::new(self.current, self.line, self.column)
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_double_bracket_is_attribute_marker() {
        assert_eq!(kinds("[[x]]"), vec![
            TokenKind::AttributeStart,
            TokenKind::Identifier,
            TokenKind::AttributeEnd
        ]);
        assert_eq!(kinds("[x]"), vec![
            TokenKind::OpenBracket,
            TokenKind::Identifier,
            TokenKind::CloseBracket
        ]);
    }

    #[test]
    fn test_carriage_returns_are_removed() {
        let tokens = tokenize("a\r\nb").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Eol);
        assert_eq!(tokens[2].pos.line, 2);
        assert_eq!(tokens[2].pos.column, 1);
    }

    #[test]
    fn test_comment_is_trivia() {
        let tokens = tokenize("// a \"quote\nclass").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// a \"quote");
        assert_eq!(tokens[2].kind, TokenKind::Class);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = tokenize("/* open").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Comment);
    }
}
