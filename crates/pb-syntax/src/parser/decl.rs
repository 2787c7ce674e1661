//! Function and record declaration parsing.

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parse `fun name(a: t, ...) [: t] ... end`.
    pub(super) fn parse_function(&mut self) -> ParseResult<FunctionDecl> {
        let start = self.expect(&TokenKind::Fun)?;
        let name = self.parse_ident()?;

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.cur_is(&TokenKind::RParen) {
            loop {
                let name = self.parse_ident()?;
                let type_name = self.parse_type_annotation()?;
                params.push(Param {
                    name,
                    type_name,
                    ty: None,
                    slot: None,
                });
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let return_type_name = if self.cur_is(&TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        let body = self.parse_block(&[TokenKind::End])?;
        let end = self.expect(&TokenKind::End)?;

        Ok(FunctionDecl {
            name,
            params,
            return_type_name,
            return_type: None,
            body,
            location: start.to(end),
        })
    }

    /// Parse `record name field: t ... end`.
    pub(super) fn parse_record(&mut self) -> ParseResult<RecordDecl> {
        let start = self.expect(&TokenKind::Record)?;
        let name = self.parse_ident()?;
        let mut fields = Vec::new();
        while !self.cur_is(&TokenKind::End) {
            let _ = self.take_comments();
            let field = self.parse_ident()?;
            let type_name = self.parse_type_annotation()?;
            fields.push(RecordField {
                name: field,
                type_name,
                ty: None,
            });
        }
        let end = self.expect(&TokenKind::End)?;
        Ok(RecordDecl {
            name,
            fields,
            location: start.to(end),
        })
    }
}
