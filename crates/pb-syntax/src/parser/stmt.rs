//! Statement parsing.

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parse statements until one of `terminators` (or end of file) is current.
    /// The terminator itself is left for the caller.
    pub(super) fn parse_block(&mut self, terminators: &[TokenKind]) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            stmts.extend(self.take_comments());
            if self.cur_is(&TokenKind::Eof) || terminators.iter().any(|t| self.cur_is(t)) {
                return Ok(stmts);
            }
            stmts.push(self.parse_stmt()?);
        }
    }

    /// Parse a single statement.
    pub(super) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match &self.current.kind {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::If => {
                let start = self.expect(&TokenKind::If)?;
                let mut stmt = self.parse_if_rest(start)?;
                let end = self.expect(&TokenKind::End)?;
                stmt.location = start.to(end);
                Ok(stmt)
            }
            TokenKind::While => self.parse_while(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let location = self.expect(&TokenKind::Break)?;
                Ok(Stmt::new(StmtKind::Break, location))
            }
            TokenKind::Continue => {
                let location = self.expect(&TokenKind::Continue)?;
                Ok(Stmt::new(StmtKind::Continue, location))
            }
            TokenKind::Fun => Err(self.error("Functions can only be declared at the top level.")),
            TokenKind::Record => Err(self.error("Records can only be declared at the top level.")),
            TokenKind::Ident(_) if self.peek_is(&TokenKind::Assign) => self.parse_assignment(),
            kind if kind.starts_expr() => {
                let expr = self.parse_expr()?;
                let location = expr.location;
                Ok(Stmt::new(StmtKind::Expr(expr), location))
            }
            other => Err(self.error(&format!("Expected a statement, but found '{}'.", other.name()))),
        }
    }

    /// Parse `var name [: type] = value`.
    fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(&TokenKind::Var)?;
        let name = self.parse_ident()?;
        let type_name = if self.cur_is(&TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        self.expect(&TokenKind::Assign)?;
        let value = self.parse_expr()?;
        let location = start.to(value.location);
        Ok(Stmt::new(
            StmtKind::Var(VarDecl {
                name,
                type_name,
                value,
                ty: None,
                slot: None,
            }),
            location,
        ))
    }

    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let target = self.parse_ident()?;
        self.expect(&TokenKind::Assign)?;
        let value = self.parse_expr()?;
        let location = target.location.to(value.location);
        Ok(Stmt::new(StmtKind::Assign(Assignment { target, value }), location))
    }

    /// Parse the part of an `if`/`elseif` after its keyword, up to but not
    /// including the closing `end`.
    fn parse_if_rest(&mut self, start: pb_common::Location) -> ParseResult<Stmt> {
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Then)?;
        let then_block = self.parse_block(&[TokenKind::ElseIf, TokenKind::Else, TokenKind::End])?;

        let else_block = if self.cur_is(&TokenKind::ElseIf) {
            let elseif = self.expect(&TokenKind::ElseIf)?;
            vec![self.parse_if_rest(elseif)?]
        } else if self.eat(&TokenKind::Else)? {
            self.parse_block(&[TokenKind::End])?
        } else {
            Vec::new()
        };

        Ok(Stmt::new(
            StmtKind::If(IfStmt {
                condition,
                then_block,
                else_block,
            }),
            start.to(self.previous),
        ))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(&TokenKind::While)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;
        let body = self.parse_block(&[TokenKind::End])?;
        let end = self.expect(&TokenKind::End)?;
        Ok(Stmt::new(
            StmtKind::While(WhileStmt { condition, body }),
            start.to(end),
        ))
    }

    fn parse_repeat(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(&TokenKind::Repeat)?;
        let count = self.parse_expr()?;
        self.expect(&TokenKind::Times)?;
        let body = self.parse_block(&[TokenKind::End])?;
        let end = self.expect(&TokenKind::End)?;
        Ok(Stmt::new(
            StmtKind::Repeat(RepeatStmt { count, body }),
            start.to(end),
        ))
    }

    /// `return` only takes a value that starts on the same line.
    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let start = self.expect(&TokenKind::Return)?;
        let same_line = self.current.location.start.line == start.start.line;
        if same_line && self.current.kind.starts_expr() {
            let value = self.parse_expr()?;
            let location = start.to(value.location);
            Ok(Stmt::new(StmtKind::Return(Some(value)), location))
        } else {
            Ok(Stmt::new(StmtKind::Return(None), start))
        }
    }
}
