use tracing::{debug, trace};

use super::error::ParseResult;
use super::token::TokenKind;
use super::Parser;
use crate::ast::{Expression, ExpressionKind, List, ListSeparator, Map, Span};

/// Tokens a list value may end at when it stands for a whole value.
const VALUE_END: &[TokenKind] = &[
    TokenKind::Semicolon,
    TokenKind::BraceEnd,
    TokenKind::ParenEnd,
    TokenKind::InterpolationEnd,
    TokenKind::Eof,
];

impl Parser {
    /// `( key: value, key: value )`
    ///
    /// Anything that does not fit the shape is a mismatch, so the caller can
    /// try a list instead.
    pub fn parse_map(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_map");
        self.ttry(|p| {
            let start = p.position();
            if p.accept(TokenKind::ParenStart).is_none() {
                return Ok(None);
            }

            let mut map = Map::default();
            while p.accept(TokenKind::ParenEnd).is_none() {
                let Some(key) = p.parse_expression()? else {
                    return Ok(None);
                };
                if p.accept(TokenKind::Colon).is_none() {
                    return Ok(None);
                }
                let Some(value) = p.parse_expression()? else {
                    return Ok(None);
                };
                map.insert(key, value);
                p.accept(TokenKind::Comma);
            }

            Ok(Some(Expression::new(
                ExpressionKind::Map(map),
                Span::new(start, p.position()),
            )))
        })
    }

    /// Tries a map, then a list, then a plain expression.
    pub fn parse_value(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_value");
        let start = self.mark();

        if let Some(map) = self.parse_map()? {
            debug!(pos = start.position(), "value is a map");
            return Ok(Some(map));
        }

        if let Some(list) = self.parse_list()? {
            let span = Span::new(start.position(), self.position());
            if !self.peek_one(VALUE_END) {
                debug!(pos = self.position(), "list stopped inside the value");
                self.restore_at_mark(start);
            } else if is_bare_expression(&list, span) {
                debug!(pos = start.position(), "list holds a single expression");
                self.restore_at_mark(start);
            } else {
                debug!(pos = start.position(), "value is a list");
                return Ok(Some(unwrap_parenthesized(list, span)));
            }
        }

        self.parse_expression()
    }

    pub fn parse_list(&mut self) -> ParseResult<Option<List>> {
        trace!(pos = self.position(), "parse_list");
        self.ttry(|p| p.parse_comma_sep_list())
    }

    /// `Item (',' Item)*` where an item is a parenthesized comma list or a
    /// space list. Stops in front of `,`, `;` and `}`.
    pub fn parse_comma_sep_list(&mut self) -> ParseResult<Option<List>> {
        self.nested(|p| p.parse_comma_sep_list_inner())
    }

    fn parse_comma_sep_list_inner(&mut self) -> ParseResult<Option<List>> {
        trace!(pos = self.position(), "parse_comma_sep_list");
        let start = self.mark();
        let mut list = List::new(ListSeparator::Comma);

        while !self.peek_one(&[TokenKind::Comma, TokenKind::Semicolon, TokenKind::BraceEnd]) {
            if self.peek(TokenKind::ParenStart) {
                let item_start = self.position();
                if let Some(sublist) = self.parse_parenthesized_list()? {
                    list.append(Expression::new(
                        ExpressionKind::List(sublist),
                        Span::new(item_start, self.position()),
                    ));
                }
            } else {
                let item_start = self.position();
                match self.parse_space_sep_list()? {
                    Some(sublist) => list.append(Expression::new(
                        ExpressionKind::List(sublist),
                        Span::new(item_start, self.position()),
                    )),
                    None => break,
                }
            }

            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
        }

        if list.is_empty() {
            self.restore_at_mark(start);
            return Ok(None);
        }
        Ok(Some(list))
    }

    /// `'(' CommaSepList ')'`, an empty pair of parentheses yields `None` but
    /// is still consumed.
    fn parse_parenthesized_list(&mut self) -> ParseResult<Option<List>> {
        self.expect(TokenKind::ParenStart)?;
        let sublist = self.parse_comma_sep_list()?;
        self.expect(TokenKind::ParenEnd)?;
        Ok(sublist)
    }

    /// `('(' CommaSepList ')')? Expression*`, stops in front of `,`, `;`, `}`
    /// or the first token that starts no expression.
    pub fn parse_space_sep_list(&mut self) -> ParseResult<Option<List>> {
        trace!(pos = self.position(), "parse_space_sep_list");
        let start = self.mark();
        let mut list = List::new(ListSeparator::Space);

        if self.peek(TokenKind::ParenStart) {
            let item_start = self.position();
            if let Some(sublist) = self.parse_parenthesized_list()? {
                list.append(Expression::new(
                    ExpressionKind::List(sublist),
                    Span::new(item_start, self.position()),
                ));
            }
        }

        while !self.peek_one(&[TokenKind::Semicolon, TokenKind::BraceEnd]) {
            let Some(expr) = self.parse_expression()? else {
                break;
            };
            list.append(expr);
            if self.peek(TokenKind::Comma) {
                break;
            }
        }

        if list.is_empty() {
            self.restore_at_mark(start);
            return Ok(None);
        }
        Ok(Some(list))
    }
}

/// A lone unparenthesized expression, which reads better as the expression
/// itself.
fn is_bare_expression(list: &List, span: Span) -> bool {
    let [item] = list.items.as_slice() else {
        return false;
    };
    match item.as_list() {
        Some(inner) => {
            item.span == span
                && inner.separator == ListSeparator::Space
                && inner.len() == 1
                && !inner.items[0].is_list()
        }
        None => false,
    }
}

/// `(a, b)` parses as a comma list holding the parenthesized list, the
/// parentheses delimit the value so the outer wrapper is dropped.
fn unwrap_parenthesized(mut list: List, span: Span) -> Expression {
    if list.len() == 1 {
        let is_group = list.items[0]
            .as_list()
            .is_some_and(|inner| inner.separator == ListSeparator::Comma);
        if is_group && list.items[0].span == span {
            if let Some(item) = list.items.pop() {
                return item;
            }
        }
    }
    Expression::new(ExpressionKind::List(list), span)
}
