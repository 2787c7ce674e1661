//! Lexer for Paperbots source code.
//!
//! Wraps the logos-generated scanner, attaching line/column locations to every
//! token. Comments are not handed to the parser as ordinary tokens; they are
//! collected on the side and drained by the statement list parser.

use logos::Logos;

use pb_common::SourceFile;

use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    file: &'a SourceFile,
    comments: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self {
            inner: TokenKind::lexer(file.source()),
            file,
            comments: Vec::new(),
        }
    }

    /// Returns the next non-comment token, or `Eof` once input is exhausted.
    /// Lexical errors are returned as `Invalid`/`UnterminatedString` tokens.
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(result) = self.inner.next() else {
                let end = self.file.source().len();
                return Token::new(TokenKind::Eof, self.file.location(end, end));
            };
            let span = self.inner.span();
            let location = self.file.location(span.start, span.end);
            let kind = match result {
                Ok(TokenKind::Comment(text)) => {
                    self.comments.push(Token::new(TokenKind::Comment(text), location));
                    continue;
                }
                Ok(kind) => kind,
                Err(()) => {
                    let slice = self.inner.slice();
                    if slice.starts_with('"') || slice.starts_with('\'') {
                        TokenKind::UnterminatedString
                    } else {
                        TokenKind::Invalid(slice.to_string())
                    }
                }
            };
            return Token::new(kind, location);
        }
    }

    /// Removes and returns the comments that start before `offset`.
    pub fn take_comments_before(&mut self, offset: u32) -> Vec<Token> {
        let split = self
            .comments
            .partition_point(|c| c.location.start.offset < offset);
        self.comments.drain(..split).collect()
    }
}

/// Tokenizes a whole file, comments excluded. Mostly useful for tests and tools.
pub fn tokenize(file: &SourceFile) -> Vec<Token> {
    let mut lexer = Lexer::new(file);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
