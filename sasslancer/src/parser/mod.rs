//! Recursive-descent parser from a lexed token stream to the [`crate::ast`].
//!
//! Every production returns `ParseResult<Option<T>>`: `Ok(None)` means the
//! production did not match and left the cursor where it found it, `Err` is a
//! hard failure that aborts the whole parse.

pub mod cursor;
pub mod error;
mod expression;
mod statement;
pub mod token;
mod value;

#[cfg(test)]
mod test_util;

use tracing::debug;

use crate::ast::RuleSetId;
use crate::config::ParserConfig;
use cursor::{Mark, TokenCursor};
use error::{ParseError, ParseResult};
use token::{Token, TokenKind};

pub struct Parser {
    cursor: TokenCursor,
    config: ParserConfig,
    depth: usize,
    next_rule_set: u32,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, config: ParserConfig) -> Self {
        return Self {
            cursor: TokenCursor::new(tokens),
            config,
            depth: 0,
            next_rule_set: 0,
        };
    }

    pub fn with_default_config(tokens: Vec<Token>) -> Self {
        Self::new(tokens, ParserConfig::default())
    }

    pub fn cursor(&self) -> &TokenCursor {
        &self.cursor
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    // =======================
    // MARK (ability to save the cursor position and restore it)
    // =======================

    pub fn mark(&self) -> Mark {
        self.cursor.mark()
    }

    pub fn restore_at_mark(&mut self, mark: Mark) {
        debug!(from = self.position(), to = mark.position(), "restoring");
        self.cursor.restore(mark);
    }

    /// Runs `func`, rolling the cursor back if it does not match. Hard errors
    /// are passed through untouched.
    pub fn ttry<T, F>(&mut self, func: F) -> ParseResult<Option<T>>
    where
        F: FnOnce(&mut Self) -> ParseResult<Option<T>>,
    {
        let saved = self.mark();
        match func(self)? {
            Some(n) => return Ok(Some(n)),
            None => {
                self.restore_at_mark(saved);
                return Ok(None);
            }
        }
    }

    /// Runs `func` one nesting level deeper, failing once the configured limit
    /// is exceeded.
    pub fn nested<T, F>(&mut self, func: F) -> ParseResult<T>
    where
        F: FnOnce(&mut Self) -> ParseResult<T>,
    {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_nesting_depth,
                position: self.position(),
            });
        }
        self.depth += 1;
        let res = func(self);
        self.depth -= 1;
        res
    }

    // =================
    // TOKEN HELPERS
    // =================

    pub fn peek(&self, kind: TokenKind) -> bool {
        self.cursor.peek_kind() == kind
    }

    pub fn peek_one(&self, kinds: &[TokenKind]) -> bool {
        self.cursor.peek().is_one_of(kinds)
    }

    pub fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        self.cursor.accept(kind)
    }

    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        self.cursor.expect(kind)
    }

    /// Hard failure naming what was expected at the current token.
    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::unexpected(
            error::Expected::Construct(expected),
            self.cursor.peek().clone(),
            self.position(),
        )
    }

    fn alloc_rule_set_id(&mut self) -> RuleSetId {
        let id = RuleSetId(self.next_rule_set);
        self.next_rule_set += 1;
        id
    }
}
