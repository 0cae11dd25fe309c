//! Abstract syntax tree produced by the parser.
//!
//! Every node is built once by the production that recognises it and is owned
//! by its parent afterwards. Nodes remember which tokens they came from through
//! a [`Span`] of token indices.

pub mod expression;
pub mod selector;
pub mod statement;

use serde::Serialize;

pub use expression::{
    BinaryOp, Expression, ExpressionKind, List, ListSeparator, Map, MapEntry, QuoteKind, UnaryOp,
    Unit,
};
pub use selector::{RuleSetId, Selector};
pub use statement::{
    DeclarationBlock, ImportStatement, Property, RuleSet, Statement, Stylesheet, Url, Variable,
    VariableAssignment,
};

/// Half-open range of token indices `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Span of the single token at `index`.
    pub fn single(index: usize) -> Self {
        Self::new(index, index + 1)
    }

    /// Smallest span covering both.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}
