use super::error::{ParseError, ParseResult};
use super::token::{Token, TokenKind};

/// A saved cursor position. Only obtainable from [`TokenCursor::mark`], so a
/// restore can never move the cursor somewhere it has not been.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

impl Mark {
    pub fn position(self) -> usize {
        self.0
    }
}

/// Position-addressable view over a lexed token sequence.
///
/// The sequence always ends with a single `Eof` token, which is what `peek`
/// and `next` keep returning once the real tokens are exhausted.
#[derive(Debug)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
    #[cfg(debug_assertions)]
    backed_up: bool,
}

impl TokenCursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // tokens after an explicit end marker are unreachable
        if let Some(eof) = tokens.iter().position(|t| t.kind == TokenKind::Eof) {
            tokens.truncate(eof + 1);
        } else {
            let eof = match tokens.last() {
                Some(last) => Token::eof().at(last.line, last.column),
                None => Token::eof(),
            };
            tokens.push(eof);
        }
        Self {
            tokens,
            pos: 0,
            #[cfg(debug_assertions)]
            backed_up: false,
        }
    }

    fn eof_index(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.eof_index()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens[..self.eof_index()]
    }

    /// Token at an absolute index, or the end marker past the end.
    pub fn token_at(&self, index: usize) -> &Token {
        &self.tokens[index.min(self.eof_index())]
    }

    pub fn peek(&self) -> &Token {
        self.token_at(self.pos)
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Returns the current token and advances. Past the end this keeps
    /// returning `Eof` while still advancing, so a following `backup` stays
    /// symmetric.
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        self.pos += 1;
        #[cfg(debug_assertions)]
        {
            self.backed_up = false;
        }
        token
    }

    /// Undoes the most recent `next`.
    pub fn backup(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(!self.backed_up, "backup called twice without next");
            self.backed_up = true;
        }
        debug_assert!(self.pos > 0, "backup at start of input");
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn restore(&mut self, mark: Mark) {
        self.pos = mark.0;
        #[cfg(debug_assertions)]
        {
            self.backed_up = false;
        }
    }

    pub fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().kind == kind {
            return Some(self.next());
        }
        None
    }

    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.peek().kind == kind {
            return Ok(self.next());
        }
        Err(ParseError::unexpected(kind, self.peek().clone(), self.pos))
    }
}
