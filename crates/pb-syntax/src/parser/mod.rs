//! Parser for Paperbots source code.

mod decl;
mod expr;
mod stmt;

use thiserror::Error;

use pb_common::{CompilerError, Location, SourceFile};

use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Lexical or syntactic error with its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub location: Location,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl From<SyntaxError> for CompilerError {
    fn from(err: SyntaxError) -> Self {
        CompilerError::new(err.message, err.location)
    }
}

/// Parser for Paperbots source code.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    /// Location of the last consumed token.
    previous: Location,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source file.
    pub fn new(file: &'a SourceFile) -> Self {
        let mut lexer = Lexer::new(file);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            previous: Location::unknown(),
        }
    }

    /// Parse a complete program.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut items = Vec::new();
        loop {
            items.extend(self.take_comments().into_iter().map(Item::Statement));
            match &self.current.kind {
                TokenKind::Eof => break,
                TokenKind::Fun => items.push(Item::Function(self.parse_function()?)),
                TokenKind::Record => items.push(Item::Record(self.parse_record()?)),
                _ => items.push(Item::Statement(self.parse_stmt()?)),
            }
        }
        tracing::debug!(items = items.len(), "parsed program");
        Ok(Program { items })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Token Management
    // ═══════════════════════════════════════════════════════════════════════

    /// Advance to the next token, failing on lexical errors.
    fn next_token(&mut self) -> ParseResult<()> {
        self.previous = self.current.location;
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
        self.check_lexical()
    }

    /// Reports a lexical error sitting in the current token.
    fn check_lexical(&self) -> ParseResult<()> {
        match &self.current.kind {
            TokenKind::Invalid(text) => Err(self.error(&format!("Unexpected character '{}'.", text))),
            TokenKind::UnterminatedString => Err(self.error("Unterminated string literal.")),
            _ => Ok(()),
        }
    }

    /// Check if current token matches the given kind.
    fn cur_is(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Check if peek token matches the given kind.
    fn peek_is(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek.kind) == std::mem::discriminant(kind)
    }

    /// Consume current token if it matches, return true if consumed.
    fn eat(&mut self, kind: &TokenKind) -> ParseResult<bool> {
        if self.cur_is(kind) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expect current token to match, consume and return its location.
    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Location> {
        if self.cur_is(kind) {
            let location = self.current.location;
            self.next_token()?;
            Ok(location)
        } else {
            Err(self.error(&format!(
                "Expected '{}', but found '{}'.",
                kind.name(),
                self.current.kind.name()
            )))
        }
    }

    /// Comments that precede the current token, as comment statements.
    fn take_comments(&mut self) -> Vec<Stmt> {
        self.lexer
            .take_comments_before(self.current.location.start.offset)
            .into_iter()
            .filter_map(|token| match token.kind {
                TokenKind::Comment(text) => Some(Stmt::new(StmtKind::Comment(text), token.location)),
                _ => None,
            })
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Error Helpers
    // ═══════════════════════════════════════════════════════════════════════

    /// Create an error at the current token.
    fn error(&self, message: &str) -> SyntaxError {
        SyntaxError::new(message, self.current.location)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Common Parsers
    // ═══════════════════════════════════════════════════════════════════════

    /// Parse an identifier.
    fn parse_ident(&mut self) -> ParseResult<Identifier> {
        match &self.current.kind {
            TokenKind::Ident(name) => {
                let ident = Identifier::new(name.clone(), self.current.location);
                self.next_token()?;
                Ok(ident)
            }
            other => Err(self.error(&format!(
                "Expected an identifier, but found '{}'.",
                other.name()
            ))),
        }
    }

    /// Parse `: typeName`.
    fn parse_type_annotation(&mut self) -> ParseResult<TypeName> {
        self.expect(&TokenKind::Colon)?;
        Ok(TypeName {
            id: self.parse_ident()?,
        })
    }
}

/// Parse a Paperbots source file.
pub fn parse(file: &SourceFile) -> ParseResult<Program> {
    let mut parser = Parser::new(file);
    parser.check_lexical()?;
    parser.parse_program()
}
