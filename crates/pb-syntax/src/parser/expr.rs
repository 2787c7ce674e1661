//! Expression parsing.
//!
//! Precedence, lowest first: `and or xor`, comparisons, `+ - ..`, `* /`,
//! unary `not -`, postfix `.field` / `[index]`, primary.

use pb_common::{BinaryOp, UnaryOp};

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parse an expression.
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_binary(0)
    }

    /// Binary operator at the current token with its precedence level.
    fn binary_op(&self) -> Option<(BinaryOp, u8)> {
        let op = match self.current.kind {
            TokenKind::And => (BinaryOp::And, 0),
            TokenKind::Or => (BinaryOp::Or, 0),
            TokenKind::Xor => (BinaryOp::Xor, 0),
            TokenKind::Lt => (BinaryOp::Less, 1),
            TokenKind::LtEq => (BinaryOp::LessEqual, 1),
            TokenKind::Gt => (BinaryOp::Greater, 1),
            TokenKind::GtEq => (BinaryOp::GreaterEqual, 1),
            TokenKind::Eq => (BinaryOp::Equal, 1),
            TokenKind::NotEq => (BinaryOp::NotEqual, 1),
            TokenKind::Plus => (BinaryOp::Add, 2),
            TokenKind::Minus => (BinaryOp::Sub, 2),
            TokenKind::DotDot => (BinaryOp::Concat, 2),
            TokenKind::Star => (BinaryOp::Mul, 3),
            TokenKind::Slash => (BinaryOp::Div, 3),
            _ => return None,
        };
        Some(op)
    }

    /// Left-associative precedence climbing.
    fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        while let Some((op, prec)) = self.binary_op() {
            if prec < min_prec {
                break;
            }
            self.next_token()?;
            let right = self.parse_binary(prec + 1)?;
            let location = left.location.to(right.location);
            left = Expr::new(
                ExprKind::Binary(BinaryExpr {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                }),
                location,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.current.kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Negate,
            _ => return self.parse_postfix(),
        };
        let start = self.current.location;
        self.next_token()?;
        let operand = self.parse_unary()?;
        let location = start.to(operand.location);
        Ok(Expr::new(
            ExprKind::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
            }),
            location,
        ))
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::Dot)? {
                let field = self.parse_ident()?;
                let location = expr.location.to(field.location);
                expr = Expr::new(
                    ExprKind::Field(FieldAccess {
                        record: Box::new(expr),
                        field,
                    }),
                    location,
                );
            } else if self.eat(&TokenKind::LBracket)? {
                let index = self.parse_expr()?;
                let end = self.expect(&TokenKind::RBracket)?;
                let location = expr.location.to(end);
                expr = Expr::new(
                    ExprKind::Index(IndexAccess {
                        array: Box::new(expr),
                        index: Box::new(index),
                    }),
                    location,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let location = self.current.location;
        let kind = match &self.current.kind {
            TokenKind::Number(n) => ExprKind::Number(*n),
            TokenKind::String(s) => ExprKind::String(s.clone()),
            TokenKind::True => ExprKind::Boolean(true),
            TokenKind::False => ExprKind::Boolean(false),
            TokenKind::Ident(_) => return self.parse_variable_or_call(),
            TokenKind::LParen => {
                self.next_token()?;
                let mut inner = self.parse_expr()?;
                let end = self.expect(&TokenKind::RParen)?;
                inner.location = location.to(end);
                return Ok(inner);
            }
            other => {
                return Err(self.error(&format!(
                    "Expected an expression, but found '{}'.",
                    other.name()
                )))
            }
        };
        self.next_token()?;
        Ok(Expr::new(kind, location))
    }

    fn parse_variable_or_call(&mut self) -> ParseResult<Expr> {
        let name = self.parse_ident()?;
        if !self.cur_is(&TokenKind::LParen) {
            let location = name.location;
            return Ok(Expr::new(ExprKind::Variable(name), location));
        }
        self.next_token()?;
        let mut args = Vec::new();
        if !self.cur_is(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        let end = self.expect(&TokenKind::RParen)?;
        let location = name.location.to(end);
        Ok(Expr::new(ExprKind::Call(CallExpr { name, args }), location))
    }
}
