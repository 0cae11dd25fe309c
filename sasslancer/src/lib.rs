#![allow(clippy::needless_return)]
#![allow(clippy::new_without_default)]

//! Parser for a CSS superset with variables, nested rules, expressions,
//! lists and maps. Tokens come from an external lexer, the output is the
//! [`ast::Stylesheet`] tree.

pub mod ast;
pub mod config;
pub mod logging;
pub mod parser;

pub use config::{Config, ParserConfig};
pub use parser::error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::token::{Token, TokenKind};
pub use parser::Parser;

/// Parses a whole token stream into a stylesheet.
pub fn parse_tokens(tokens: Vec<Token>, config: &ParserConfig) -> ParseResult<ast::Stylesheet> {
    Parser::new(tokens, config.clone()).parse_stylesheet()
}
