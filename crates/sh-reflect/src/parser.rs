//! Recursive-descent parser over the significant tokens of one file.
//!
//! Declarations outside the supported grammar are skipped, with `{ ... }`
//! regions consumed as a whole. Attribute sequences are parsed strictly: the
//! first malformed one aborts the parse.

use crate::ast::*;
use crate::error::{ParseError, Result};
use crate::lexer::{self, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Whitespace, line and comment tokens are dropped here.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect();
        Self { tokens, current: 0 }
    }

    pub fn parse_str(input: &str) -> Result<CompilationUnit> {
        let tokens = lexer::tokenize(input)?;
        let mut parser = Parser::new(tokens);
        parser.parse()
    }

    pub fn parse(&mut self) -> Result<CompilationUnit> {
        let declarations = self.parse_declarations(false)?;
        Ok(CompilationUnit::new(declarations))
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    /// Parse declarations until end of input, or until the closing brace of
    /// the enclosing namespace when `nested`.
    fn parse_declarations(&mut self, nested: bool) -> Result<Vec<Node>> {
        let mut declarations = Vec::new();

        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Class | TokenKind::Struct => {
                    if let Some(class) = self.parse_class()? {
                        declarations.push(Node::Class(class));
                    }
                }
                TokenKind::Namespace => self.parse_namespace(&mut declarations)?,
                TokenKind::Macro => declarations.push(Node::Macro(self.parse_macro()?)),
                TokenKind::AttributeStart => {
                    // Attributes on free functions and variables: checked, not kept
                    self.parse_attribute_sequence()?;
                }
                TokenKind::CloseBrace if nested => break,
                TokenKind::OpenBrace => {
                    self.consume_balanced(TokenKind::OpenBrace, TokenKind::CloseBrace)?;
                }
                TokenKind::Template => {
                    self.advance();
                    if self.check_text("<") {
                        self.skip_angle_brackets();
                    }
                }
                TokenKind::Using => self.skip_statement(),
                TokenKind::Identifier if self.check_text("enum") => {
                    // `enum class` is not a class
                    self.advance();
                    if self.check(TokenKind::Class) || self.check(TokenKind::Struct) {
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }

        Ok(declarations)
    }

    /// `namespace A::B { ... }`. Anonymous namespaces add their declarations
    /// to the enclosing scope; aliases are skipped.
    fn parse_namespace(&mut self, out: &mut Vec<Node>) -> Result<()> {
        let keyword = self.expect(TokenKind::Namespace)?;

        if self.check(TokenKind::OpenBrace) {
            self.advance();
            let declarations = self.parse_declarations(true)?;
            self.expect(TokenKind::CloseBrace)?;
            out.extend(declarations);
            return Ok(());
        }

        let name = self.parse_qualified_name()?;

        if self.check_text("=") {
            self.skip_statement();
            return Ok(());
        }

        self.expect(TokenKind::OpenBrace)?;
        let declarations = self.parse_declarations(true)?;
        self.expect(TokenKind::CloseBrace)?;

        out.push(Node::Namespace(Namespace { keyword, name, declarations }));
        Ok(())
    }

    fn parse_macro(&mut self) -> Result<Macro> {
        let hash = self.expect(TokenKind::Macro)?;
        let mut rest = Vec::new();

        // Trivia is gone, so the directive ends where the line does.
        while let Some(token) = self.peek().filter(|t| t.pos.line == hash.pos.line) {
            match LiteralKind::of(token.kind) {
                Some(literal_kind @ (LiteralKind::Identifier | LiteralKind::String)) => {
                    if let Some(token) = self.advance() {
                        rest.push(Literal::new(token, literal_kind));
                    }
                }
                _ => break,
            }
        }

        Ok(Macro { hash, rest })
    }

    /// Anonymous classes and structs have nothing to reflect and yield `None`.
    fn parse_class(&mut self) -> Result<Option<Class>> {
        let keyword =
            self.advance().ok_or(ParseError::UnexpectedEof { expected: TokenKind::Class })?;

        let mut attribute_sequences = Vec::new();
        while self.check(TokenKind::AttributeStart) {
            attribute_sequences.push(self.parse_attribute_sequence()?);
        }

        if !self.check(TokenKind::Identifier) {
            self.parse_member_block()?;
            return Ok(None);
        }

        let name = self.parse_qualified_name()?;

        let bases = if self.check(TokenKind::Colon) && !self.check_at(1, TokenKind::Colon) {
            self.advance();
            self.parse_base_clause()?
        } else {
            Vec::new()
        };

        let members = self.parse_member_block()?;

        Ok(Some(Class { keyword, name, attribute_sequences, bases, members }))
    }

    fn parse_base_clause(&mut self) -> Result<Vec<QualifiedName>> {
        let mut bases = Vec::new();

        loop {
            while self.peek_kind().is_some_and(TokenKind::is_access_specifier)
                || self.check_text("virtual")
            {
                self.advance();
            }

            bases.push(self.parse_qualified_name()?);
            if self.check_text("<") {
                self.skip_angle_brackets();
            }

            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        Ok(bases)
    }

    /// Scan a class body with a single brace-depth counter, collecting the
    /// annotated members declared directly in it.
    ///
    /// Tokens before the opening brace (`final`, ...) are skipped. A `;`
    /// before any brace ends a forward declaration.
    fn parse_member_block(&mut self) -> Result<Vec<Member>> {
        loop {
            match self.peek_kind() {
                None => return Err(ParseError::UnexpectedEof { expected: TokenKind::OpenBrace }),
                Some(TokenKind::OpenBrace) => break,
                Some(TokenKind::Semicolon) => {
                    self.advance();
                    return Ok(Vec::new());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let mut members = Vec::new();
        let mut depth = 0usize;

        loop {
            let Some(kind) = self.peek_kind() else {
                return Err(ParseError::UnexpectedEof { expected: TokenKind::CloseBrace });
            };

            match kind {
                TokenKind::OpenBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::CloseBrace => {
                    depth -= 1;
                    self.advance();
                }
                kind if kind.is_access_specifier() => {
                    self.advance();
                    if self.check(TokenKind::Colon) {
                        self.advance();
                    }
                }
                TokenKind::AttributeStart if depth == 1 => {
                    members.push(self.parse_member_declaration()?);
                }
                _ => {
                    self.advance();
                }
            }

            if depth == 0 {
                break;
            }
        }

        Ok(members)
    }

    /// `[[...]] Type name` optionally followed by a parameter list, which
    /// makes it a method.
    fn parse_member_declaration(&mut self) -> Result<Member> {
        let mut attribute_sequences = Vec::new();
        while self.check(TokenKind::AttributeStart) {
            attribute_sequences.push(self.parse_attribute_sequence()?);
        }

        let ty = self.parse_type_name()?;
        let type_suffix = self.parse_type_suffix();
        let name = self.expect_identifier()?;

        if self.check(TokenKind::OpenParen) {
            let discarded_params =
                self.consume_balanced(TokenKind::OpenParen, TokenKind::CloseParen)?;
            return Ok(Member::Method(Method {
                name,
                return_type: ty,
                return_type_suffix: type_suffix,
                attribute_sequences,
                discarded_params,
            }));
        }

        Ok(Member::Field(Field { name, ty, type_suffix, attribute_sequences }))
    }

    fn parse_type_name(&mut self) -> Result<QualifiedName> {
        if self.check(TokenKind::Auto) {
            let token = self.expect(TokenKind::Auto)?;
            return Ok(QualifiedName::new(vec![Literal::new(token, LiteralKind::Identifier)]));
        }
        self.parse_qualified_name()
    }

    /// Tokens that still belong to a member's type after its leading name.
    fn parse_type_suffix(&mut self) -> Vec<Token> {
        let mut suffix = Vec::new();

        loop {
            if self.check_text("<") {
                suffix.extend(self.skip_angle_brackets());
            } else if self.check_text("*") || self.check_text("&") {
                suffix.extend(self.advance());
            } else if self.check(TokenKind::Colon)
                && self.check_at(1, TokenKind::Colon)
                && self.check_at(2, TokenKind::Identifier)
            {
                for _ in 0..3 {
                    suffix.extend(self.advance());
                }
            } else if self.continues_type() {
                suffix.extend(self.advance());
            } else {
                break;
            }
        }

        suffix
    }

    /// A word followed by another word, a `*`/`&` or a `::` is part of the
    /// type, not the member name (`unsigned int x`, `const char* s`).
    fn continues_type(&self) -> bool {
        let Some(token) = self.peek() else { return false };
        if token.kind != TokenKind::Identifier || !token.is_word() {
            return false;
        }

        match self.peek_at(1) {
            Some(next) if next.kind == TokenKind::Identifier => {
                next.is_word() || next.text == "*" || next.text == "&"
            }
            Some(next) if next.kind == TokenKind::Colon => self.check_at(2, TokenKind::Colon),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    fn parse_attribute_sequence(&mut self) -> Result<AttributeSequence> {
        let start = self.expect(TokenKind::AttributeStart)?;

        let using = if self.check(TokenKind::Using) {
            self.advance();
            let namespace = self.expect_identifier()?;
            self.expect(TokenKind::Colon)?;
            Some(namespace)
        } else {
            None
        };

        let mut attributes = vec![self.parse_attribute()?];
        loop {
            if self.check(TokenKind::Comma) {
                self.advance();
            }
            if self.check(TokenKind::AttributeEnd) || self.is_at_end() {
                break;
            }
            attributes.push(self.parse_attribute()?);
        }

        let end = self.expect(TokenKind::AttributeEnd)?;

        Ok(AttributeSequence { start, using, attributes, end })
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let first = self.expect_identifier()?;

        let (namespace, name) =
            if self.check(TokenKind::Colon) && self.check_at(1, TokenKind::Colon) {
                self.advance();
                self.advance();
                (Some(first), self.expect_identifier()?)
            } else {
                (None, first)
            };

        let params =
            if self.check(TokenKind::OpenParen) { Some(self.parse_params()?) } else { None };

        Ok(Attribute { namespace, name, params })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>> {
        self.expect(TokenKind::OpenParen)?;

        let mut params = Vec::new();
        while !self.check(TokenKind::CloseParen) {
            params.push(Param { value: self.parse_literal()? });
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(TokenKind::CloseParen)?;
        Ok(params)
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedEof { expected: TokenKind::Identifier });
        };

        match LiteralKind::of(token.kind) {
            Some(kind) => {
                let token_kind = token.kind;
                let token = self.expect(token_kind)?;
                Ok(Literal::new(token, kind))
            }
            None => Err(ParseError::ExpectedLiteral {
                found: token.kind,
                text: token.text.clone(),
                pos: token.pos,
            }),
        }
    }

    fn parse_qualified_name(&mut self) -> Result<QualifiedName> {
        let mut parts = vec![self.expect_identifier()?];

        while self.check(TokenKind::Colon) && self.check_at(1, TokenKind::Colon) {
            self.advance();
            self.advance();
            parts.push(self.expect_identifier()?);
        }

        Ok(QualifiedName::new(parts))
    }

    // ------------------------------------------------------------------
    // Skipping
    // ------------------------------------------------------------------

    /// Consume from an `open` token to its matching `close`, nested pairs
    /// included. Returns every consumed token.
    fn consume_balanced(&mut self, open: TokenKind, close: TokenKind) -> Result<Vec<Token>> {
        let mut consumed = Vec::new();
        let mut depth = 0usize;

        loop {
            let Some(token) = self.advance() else {
                return Err(ParseError::UnexpectedEof { expected: close });
            };

            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth = depth.saturating_sub(1);
            }
            consumed.push(token);

            if depth == 0 {
                return Ok(consumed);
            }
        }
    }

    /// `<` ... `>` by text, since angle brackets lex as identifiers.
    /// Stops quietly at end of input.
    fn skip_angle_brackets(&mut self) -> Vec<Token> {
        let mut consumed = Vec::new();
        let mut depth = 0usize;

        while let Some(token) = self.advance() {
            match token.text.as_str() {
                "<" => depth += 1,
                ">" => depth = depth.saturating_sub(1),
                _ => {}
            }
            consumed.push(token);

            if depth == 0 {
                break;
            }
        }

        consumed
    }

    /// Skip up to and including the next `;`.
    fn skip_statement(&mut self) {
        while let Some(token) = self.advance() {
            if token.kind == TokenKind::Semicolon {
                break;
            }
        }
    }

    // ------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance().ok_or(ParseError::UnexpectedEof { expected: kind })
            }
            Some(token) => Err(ParseError::TokenMismatch {
                expected: kind,
                found: token.kind,
                text: token.text.clone(),
                pos: token.pos,
            }),
            None => Err(ParseError::UnexpectedEof { expected: kind }),
        }
    }

    fn expect_identifier(&mut self) -> Result<Literal> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Literal::new(token, LiteralKind::Identifier))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_at(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.current + n)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.check_at(0, kind)
    }

    fn check_at(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_at(n).is_some_and(|t| t.kind == kind)
    }

    fn check_text(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.text == text)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }
}
