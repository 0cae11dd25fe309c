//! Synthetic token streams for benchmarking the parser.

use sasslancer::{Token, TokenKind};

const PROPERTIES: &[&str] = &["margin", "padding", "color", "font-family", "border"];
const IDENTS: &[&str] = &["auto", "solid", "red", "serif", "inherit"];
const UNITS: &[TokenKind] = &[TokenKind::UnitPx, TokenKind::UnitEm, TokenKind::UnitPercent];

fn punct(kind: TokenKind) -> Token {
    Token::punct(kind)
}

fn push_value(rng: &mut fastrand::Rng, tokens: &mut Vec<Token>) {
    let items = rng.usize(1..4);
    for i in 0..items {
        if i > 0 {
            tokens.push(punct(TokenKind::Comma));
        }
        for _ in 0..rng.usize(1..3) {
            if rng.bool() {
                tokens.push(Token::new(TokenKind::Integer, rng.u16(..1000).to_string()));
                tokens.push(punct(UNITS[rng.usize(..UNITS.len())]));
            } else {
                tokens.push(Token::new(TokenKind::Ident, IDENTS[rng.usize(..IDENTS.len())]));
            }
        }
    }
}

/// A stylesheet of `rule_sets` rule sets, each preceded by a variable
/// assignment. The same seed always yields the same tokens.
pub fn stylesheet_tokens(seed: u64, rule_sets: usize) -> Vec<Token> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut tokens = vec![
        punct(TokenKind::Import),
        Token::new(TokenKind::QqString, "reset.css"),
        punct(TokenKind::Semicolon),
    ];

    for n in 0..rule_sets {
        tokens.push(Token::new(TokenKind::Variable, format!("v{n}")));
        tokens.push(punct(TokenKind::Colon));
        tokens.push(Token::new(TokenKind::Integer, rng.u16(..100).to_string()));
        tokens.push(punct(TokenKind::Plus));
        tokens.push(Token::new(TokenKind::Variable, "base"));
        tokens.push(punct(TokenKind::Mul));
        tokens.push(Token::new(TokenKind::Integer, "2"));
        tokens.push(punct(TokenKind::Semicolon));

        tokens.push(Token::new(TokenKind::TypeSelector, "div"));
        tokens.push(Token::new(TokenKind::ClassSelector, format!("c{n}")));
        tokens.push(punct(TokenKind::ChildCombinator));
        tokens.push(Token::new(TokenKind::TypeSelector, "span"));
        tokens.push(punct(TokenKind::BraceStart));
        for _ in 0..rng.usize(1..6) {
            let name = PROPERTIES[rng.usize(..PROPERTIES.len())];
            tokens.push(Token::new(TokenKind::PropertyName, name));
            tokens.push(punct(TokenKind::Colon));
            push_value(&mut rng, &mut tokens);
            tokens.push(punct(TokenKind::Semicolon));
        }
        tokens.push(punct(TokenKind::BraceEnd));
    }
    tokens
}

/// `$deep: ((((1, 2), 2), 2), 2);` nested `depth` levels.
pub fn nested_list_tokens(depth: usize) -> Vec<Token> {
    let mut tokens = vec![
        Token::new(TokenKind::Variable, "deep"),
        punct(TokenKind::Colon),
    ];
    tokens.extend((0..depth).map(|_| punct(TokenKind::ParenStart)));
    tokens.push(Token::new(TokenKind::Integer, "1"));
    for _ in 0..depth {
        tokens.push(punct(TokenKind::Comma));
        tokens.push(Token::new(TokenKind::Integer, "2"));
        tokens.push(punct(TokenKind::ParenEnd));
    }
    tokens.push(punct(TokenKind::Semicolon));
    tokens
}
