//! Shared assertions behind `assert_parse_node!` and `assert_parse_error!`.

use std::fmt::Debug;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::token::Token;
use super::Parser;

/// Parses `tokens` with `f`, expecting a node and all input consumed.
pub fn assert_node<T, F>(tokens: Vec<Token>, f: F) -> T
where
    T: Debug,
    F: FnOnce(&mut Parser) -> ParseResult<Option<T>>,
{
    let mut parser = Parser::with_default_config(tokens);
    let node = match f(&mut parser) {
        Ok(Some(node)) => node,
        Ok(None) => panic!("Failed parsing node"),
        Err(e) => panic!("Failed parsing node: {e}"),
    };
    assert!(
        parser.cursor().at_eof(),
        "Expect cursor at end of input, stopped at {} after parsing {:?}",
        parser.cursor().peek(),
        node
    );
    node
}

/// Expects a soft mismatch that leaves the cursor where it started.
pub fn assert_no_node<T, F>(tokens: Vec<Token>, f: F)
where
    T: Debug,
    F: FnOnce(&mut Parser) -> ParseResult<Option<T>>,
{
    let mut parser = Parser::with_default_config(tokens);
    match f(&mut parser) {
        Ok(None) => {}
        Ok(Some(node)) => panic!("Did not expect succesfully parsed node: {node:?}"),
        Err(e) => panic!("Did not expect a hard error: {e}"),
    }
    assert_eq!(parser.position(), 0, "cursor moved on a mismatch");
}

pub fn assert_error<T, F>(tokens: Vec<Token>, f: F, kind: ParseErrorKind) -> ParseError
where
    T: Debug,
    F: FnOnce(&mut Parser) -> ParseResult<Option<T>>,
{
    let mut parser = Parser::with_default_config(tokens);
    match f(&mut parser) {
        Err(e) => {
            assert_eq!(e.kind(), kind, "incorrect error returned from parsing: {e}");
            e
        }
        Ok(node) => panic!("node has NO errors, when they were expected: {node:?}"),
    }
}
