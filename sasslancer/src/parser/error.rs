use std::fmt;

use miette::Diagnostic;
use strum_macros::EnumDiscriminants;
use thiserror::Error;

use super::token::{Token, TokenKind};

pub type ParseResult<T> = Result<T, ParseError>;

/// What a production was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    /// A grammar construct rather than a single token, e.g. "expression".
    Construct(&'static str),
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Expected::Token(kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "`{kind}`"),
            Expected::Construct(what) => f.write_str(what),
        }
    }
}

/// Hard parse failures. Any of these aborts the whole parse, productions that
/// merely do not match signal that with `Ok(None)` instead.
///
/// `position` is always the index of the offending token in the token stream.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic, EnumDiscriminants)]
#[strum_discriminants(name(ParseErrorKind))]
#[strum_discriminants(derive(Hash, strum::Display))]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(sasslancer::unexpected_token))]
    UnexpectedToken {
        expected: Expected,
        found: Token,
        position: usize,
    },

    #[error("malformed numeric literal {token}")]
    #[diagnostic(
        code(sasslancer::malformed_number),
        help("the lexer produced a number token whose text is not a valid number")
    )]
    MalformedNumericLiteral { token: Token, position: usize },

    #[error("{description} are not supported")]
    #[diagnostic(code(sasslancer::unsupported))]
    UnsupportedConstruct {
        description: &'static str,
        position: usize,
    },

    #[error("unexpected selector token {token}")]
    #[diagnostic(
        code(sasslancer::unexpected_selector),
        help("only type, universal, id, class, parent and pseudo selectors and the `+`, `>` and descendant combinators are understood")
    )]
    UnexpectedSelectorToken { token: Token, position: usize },

    #[error("nesting exceeds the maximum depth of {limit}")]
    #[diagnostic(
        code(sasslancer::nesting_too_deep),
        help("raise `maxNestingDepth` in the parser configuration")
    )]
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    pub fn unexpected(expected: impl Into<Expected>, found: Token, position: usize) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found,
            position,
        }
    }

    pub fn unsupported(description: &'static str, position: usize) -> Self {
        Self::UnsupportedConstruct {
            description,
            position,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        ParseErrorKind::from(self)
    }

    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::MalformedNumericLiteral { position, .. }
            | Self::UnsupportedConstruct { position, .. }
            | Self::UnexpectedSelectorToken { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
