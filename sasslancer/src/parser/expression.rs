use tracing::trace;

use super::error::{ParseError, ParseResult};
use super::token::TokenKind;
use super::Parser;
use crate::ast::{BinaryOp, Expression, ExpressionKind, QuoteKind, Span, UnaryOp, Unit};

impl Parser {
    /// `10`, `-10`, `10px`, `+0.2em`
    ///
    /// The sign here belongs to the literal, independent of the unary sign
    /// handled by [`Parser::parse_expression`].
    pub fn parse_number(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_number");
        let start = self.mark();

        let mut negative = false;
        if self.accept(TokenKind::Minus).is_some() {
            negative = true;
        } else {
            self.accept(TokenKind::Plus);
        }

        if !self.peek_one(&[TokenKind::Integer, TokenKind::Float]) {
            self.restore_at_mark(start);
            return Ok(None);
        }
        let number_pos = self.position();
        let token = self.cursor.next();

        let value = match token.kind {
            TokenKind::Integer => token.text.parse::<i64>().map(|i| i as f64).ok(),
            _ => token.text.parse::<f64>().ok(),
        };
        let Some(mut value) = value else {
            return Err(ParseError::MalformedNumericLiteral {
                token,
                position: number_pos,
            });
        };
        if negative {
            value = -value;
        }

        let kind = match Unit::from_token_kind(self.cursor.peek_kind()) {
            Some(unit) => {
                self.cursor.next();
                ExpressionKind::Length { value, unit }
            }
            None => ExpressionKind::Number { value },
        };
        Ok(Some(Expression::new(
            kind,
            Span::new(start.position(), self.position()),
        )))
    }

    /// `name(arg, arg, ...)` where every argument is a single factor.
    pub fn parse_function_call(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_function_call");
        let start = self.position();
        let Some(name) = self.accept(TokenKind::FunctionName) else {
            return Ok(None);
        };
        self.expect(TokenKind::ParenStart)?;

        let mut args = Vec::new();
        if self.accept(TokenKind::ParenEnd).is_none() {
            loop {
                let Some(arg) = self.nested(|p| p.parse_factor())? else {
                    return Err(self.unexpected("function argument"));
                };
                args.push(arg);
                if self.accept(TokenKind::Comma).is_some() {
                    continue;
                }
                if self.accept(TokenKind::ParenEnd).is_some() {
                    break;
                }
                return Err(self.unexpected("`,` or `)`"));
            }
        }

        Ok(Some(Expression::new(
            ExpressionKind::FunctionCall {
                name: name.text,
                args,
            },
            Span::new(start, self.position()),
        )))
    }

    pub fn parse_ident(&mut self) -> ParseResult<Option<Expression>> {
        let pos = self.position();
        let Some(token) = self.accept(TokenKind::Ident) else {
            return Ok(None);
        };
        Ok(Some(Expression::new(
            ExpressionKind::Identifier { name: token.text },
            Span::single(pos),
        )))
    }

    fn parse_quoted_string(&mut self) -> Option<Expression> {
        let pos = self.position();
        let quote = match self.cursor.peek_kind() {
            TokenKind::QqString => QuoteKind::Double,
            TokenKind::QString => QuoteKind::Single,
            _ => return None,
        };
        let token = self.cursor.next();
        Some(Expression::new(
            ExpressionKind::String {
                text: token.text,
                quote,
            },
            Span::single(pos),
        ))
    }

    /// Quoted string, bare identifier or interpolation.
    pub fn parse_string(&mut self) -> ParseResult<Option<Expression>> {
        if let Some(string) = self.parse_quoted_string() {
            return Ok(Some(string));
        }
        if let Some(ident) = self.parse_ident()? {
            return Ok(Some(ident));
        }
        self.parse_interpolation()
    }

    /// `#{ expression }`
    pub fn parse_interpolation(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_interpolation");
        let start = self.position();
        if self.accept(TokenKind::InterpolationStart).is_none() {
            return Ok(None);
        }
        let Some(inner) = self.parse_expression()? else {
            return Err(self.unexpected("expression"));
        };
        self.expect(TokenKind::InterpolationEnd)?;
        Ok(Some(Expression::new(
            ExpressionKind::Interpolation {
                inner: Box::new(inner),
            },
            Span::new(start, self.position()),
        )))
    }

    fn parse_parenthesized(&mut self) -> ParseResult<Option<Expression>> {
        let start = self.position();
        if self.accept(TokenKind::ParenStart).is_none() {
            return Ok(None);
        }
        let Some(mut expr) = self.parse_expression()? else {
            return Ok(None);
        };
        if self.accept(TokenKind::ParenEnd).is_none() {
            // `(` is shared with lists and maps, so this is only a mismatch
            return Ok(None);
        }
        expr.span = Span::new(start, self.position());
        Ok(Some(expr))
    }

    pub fn parse_factor(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_factor");
        let pos = self.position();
        match self.cursor.peek_kind() {
            TokenKind::ParenStart => self.ttry(|p| p.parse_parenthesized()),
            TokenKind::InterpolationStart => self.parse_interpolation(),
            TokenKind::QqString | TokenKind::QString => Ok(self.parse_quoted_string()),
            TokenKind::Ident => self.parse_ident(),
            TokenKind::Integer | TokenKind::Float => self.parse_number(),
            TokenKind::FunctionName => self.parse_function_call(),
            TokenKind::Variable => {
                let token = self.cursor.next();
                Ok(Some(Expression::new(
                    ExpressionKind::Variable { name: token.text },
                    Span::single(pos),
                )))
            }
            TokenKind::HexColor => Err(ParseError::unsupported("hex color literals", pos)),
            _ => Ok(None),
        }
    }

    /// `Factor (('*' | '/') Term)?`, so chains associate to the right.
    pub fn parse_term(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_term");
        let Some(factor) = self.parse_factor()? else {
            return Ok(None);
        };

        let op = match self.cursor.peek_kind() {
            TokenKind::Mul => BinaryOp::Mul,
            TokenKind::Div => BinaryOp::Div,
            _ => return Ok(Some(factor)),
        };
        self.cursor.next();
        let Some(term) = self.nested(|p| p.parse_term())? else {
            return Err(self.unexpected("term after operator"));
        };
        Ok(Some(Expression::binary(op, factor, term)))
    }

    /// `(('+' | '-') Term)? Term (('+' | '-' | concat) Term)*`, chains
    /// associate to the left.
    pub fn parse_expression(&mut self) -> ParseResult<Option<Expression>> {
        self.nested(|p| p.ttry(|p| p.parse_expression_inner()))
    }

    fn parse_expression_inner(&mut self) -> ParseResult<Option<Expression>> {
        trace!(pos = self.position(), "parse_expression");
        let start = self.position();

        let mut expr = match UnaryOp::from_token_kind(self.cursor.peek_kind()) {
            Some(op) => {
                self.cursor.next();
                let Some(term) = self.parse_term()? else {
                    return Ok(None);
                };
                let span = Span::new(start, term.span.end);
                Expression::unary(op, term, span)
            }
            None => match self.parse_term()? {
                Some(term) => term,
                None => return Ok(None),
            },
        };

        while let Some(op) = self.peek_binary_op() {
            self.cursor.next();
            let Some(right) = self.parse_term()? else {
                return Err(self.unexpected("term after operator"));
            };
            expr = Expression::binary(op, expr, right);
        }
        Ok(Some(expr))
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        match self.cursor.peek_kind() {
            TokenKind::Plus | TokenKind::Minus | TokenKind::LiteralConcat => {
                BinaryOp::from_token_kind(self.cursor.peek_kind())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test_expression_parser {
    use crate::ast::*;
    use crate::parser::error::ParseErrorKind;
    use crate::parser::test_util::*;
    use crate::parser::token::{Token, TokenKind};
    use crate::parser::Parser;
    use proptest::prelude::*;
    use sasslancer_macro::{assert_parse_error, assert_parse_node, tokens};

    #[test]
    fn number() {
        let n = assert_parse_node!([Integer("10")], number);
        assert_eq!(n.kind, ExpressionKind::Number { value: 10.0 });

        let n = assert_parse_node!([Minus, Float("0.5"), UnitEm], number);
        assert_eq!(
            n.kind,
            ExpressionKind::Length {
                value: -0.5,
                unit: Unit::Em
            }
        );
        assert_eq!(n.span, Span::new(0, 3));

        let n = assert_parse_node!([Plus, Integer("3"), UnitPercent], number);
        assert_eq!(n.to_string(), "3%");

        assert_no_node(tokens![Ident("a")], |p| p.parse_number());
        assert_no_node(tokens![Minus, Ident("a")], |p| p.parse_number());
        assert_parse_error!([Integer("1x")], number, MalformedNumericLiteral);
        assert_parse_error!([Float("..")], number, MalformedNumericLiteral);
    }

    #[test]
    fn number_leaves_following_tokens() {
        let mut parser = Parser::with_default_config(tokens![Integer("10"), Ident("px")]);
        let n = parser.parse_number().unwrap().unwrap();
        assert_eq!(n.as_number(), Some(10.0));
        assert_eq!(parser.position(), 1);
    }

    fn unit_kind() -> impl Strategy<Value = Option<TokenKind>> {
        prop_oneof![
            Just(None),
            Just(Some(TokenKind::UnitPx)),
            Just(Some(TokenKind::UnitPt)),
            Just(Some(TokenKind::UnitCm)),
            Just(Some(TokenKind::UnitEm)),
            Just(Some(TokenKind::UnitMm)),
            Just(Some(TokenKind::UnitRem)),
            Just(Some(TokenKind::UnitDeg)),
            Just(Some(TokenKind::UnitPercent)),
        ]
    }

    proptest! {
        #[test]
        fn number_magnitude_and_unit(
            magnitude in 0i64..1_000_000,
            fraction in proptest::option::of(0u32..1000),
            sign in prop_oneof![Just(None), Just(Some(TokenKind::Plus)), Just(Some(TokenKind::Minus))],
            unit in unit_kind(),
        ) {
            let mut tokens = Vec::new();
            if let Some(sign) = sign {
                tokens.push(Token::punct(sign));
            }
            let (text, expected) = match fraction {
                Some(f) => {
                    let text = format!("{magnitude}.{f}");
                    let value: f64 = text.parse().unwrap();
                    tokens.push(Token::new(TokenKind::Float, text.as_str()));
                    (text, value)
                }
                None => {
                    tokens.push(Token::new(TokenKind::Integer, magnitude.to_string()));
                    (magnitude.to_string(), magnitude as f64)
                }
            };
            let expected = if sign == Some(TokenKind::Minus) { -expected } else { expected };
            if let Some(unit) = unit {
                tokens.push(Token::punct(unit));
            }
            // a trailing token must never be swallowed by the lookahead
            tokens.push(Token::new(TokenKind::Ident, "tail"));
            let consumed = tokens.len() - 1;

            let mut parser = Parser::with_default_config(tokens);
            let number = parser.parse_number().unwrap().unwrap();
            prop_assert_eq!(parser.position(), consumed, "text {}", text);
            prop_assert_eq!(number.as_number(), Some(expected));
            match (unit, &number.kind) {
                (None, ExpressionKind::Number { .. }) => {}
                (Some(u), ExpressionKind::Length { unit, .. }) => {
                    prop_assert_eq!(Unit::from_token_kind(u), Some(*unit));
                }
                (_, kind) => prop_assert!(false, "unexpected {:?}", kind),
            }
        }
    }

    #[test]
    fn factor() {
        let f = assert_parse_node!([QqString("a b")], factor);
        assert_eq!(f.to_string(), "\"a b\"");
        let f = assert_parse_node!([QString("c")], factor);
        assert_eq!(f.to_string(), "'c'");
        let f = assert_parse_node!([Variable("width")], factor);
        assert_eq!(f.kind, ExpressionKind::Variable { name: "width".into() });
        let f = assert_parse_node!([ParenStart, Integer("1"), Plus, Integer("2"), ParenEnd], factor);
        assert_eq!(f.to_string(), "1 + 2");
        assert_eq!(f.span, Span::new(0, 5));

        assert_no_node(tokens![Semicolon], |p| p.parse_factor());
        assert_no_node(tokens![UnquotedString("foo.css")], |p| p.parse_factor());
        assert_parse_error!([HexColor("fff")], factor, UnsupportedConstruct);
    }

    #[test]
    fn parenthesized_factor_without_close_is_soft() {
        assert_no_node(tokens![ParenStart, Integer("1"), Comma, Integer("2"), ParenEnd], |p| {
            p.parse_factor()
        });
        assert_no_node(tokens![ParenStart, Integer("1")], |p| p.parse_factor());
    }

    #[test]
    fn function_call() {
        let f = assert_parse_node!(
            [FunctionName("darken"), ParenStart, Variable("c"), Comma, Integer("10"), UnitPercent, ParenEnd],
            function_call
        );
        assert_eq!(f.to_string(), "darken($c, 10%)");

        let f = assert_parse_node!([FunctionName("random"), ParenStart, ParenEnd], function_call);
        assert_eq!(
            f.kind,
            ExpressionKind::FunctionCall {
                name: "random".into(),
                args: vec![]
            }
        );

        assert_parse_error!([FunctionName("f"), Ident("a")], function_call, UnexpectedToken);
        assert_parse_error!(
            [FunctionName("f"), ParenStart, Ident("a"), Ident("b"), ParenEnd],
            function_call,
            UnexpectedToken
        );
        assert_parse_error!(
            [FunctionName("f"), ParenStart, Ident("a"), Comma, ParenEnd],
            function_call,
            UnexpectedToken
        );
    }

    #[test]
    fn interpolation() {
        let i = assert_parse_node!([InterpolationStart, Variable("x"), InterpolationEnd], interpolation);
        assert_eq!(i.to_string(), "#{$x}");
        assert_parse_error!([InterpolationStart, Variable("x")], interpolation, UnexpectedToken);
        assert_parse_error!([InterpolationStart, InterpolationEnd], interpolation, UnexpectedToken);
    }

    #[test]
    fn string() {
        assert_parse_node!([QqString("x")], string);
        assert_parse_node!([Ident("bold")], string);
        assert_parse_node!([InterpolationStart, Ident("a"), InterpolationEnd], string);
        assert_no_node(tokens![Integer("1")], |p| p.parse_string());
    }

    #[test]
    fn term_is_right_associative() {
        let t = assert_parse_node!([Integer("2"), Mul, Integer("3"), Mul, Integer("4")], term);
        assert_eq!(t.to_string(), "2 * (3 * 4)");

        let t = assert_parse_node!([Integer("8"), Div, Integer("4"), Div, Integer("2")], term);
        let ExpressionKind::Binary { op, left, right } = &t.kind else {
            panic!("expected binary, got {t:?}");
        };
        assert_eq!(*op, BinaryOp::Div);
        assert_eq!(left.as_number(), Some(8.0));
        assert_eq!(right.to_string(), "4 / 2");

        assert_parse_error!([Integer("2"), Mul, Semicolon], term, UnexpectedToken);
    }

    #[test]
    fn expression_is_left_associative() {
        let e = assert_parse_node!([Integer("1"), Minus, Integer("2"), Minus, Integer("3")], expression);
        let ExpressionKind::Binary { op, left, right } = &e.kind else {
            panic!("expected binary, got {e:?}");
        };
        assert_eq!(*op, BinaryOp::Sub);
        assert_eq!(left.to_string(), "1 - 2");
        assert_eq!(right.as_number(), Some(3.0));
        assert_eq!(e.span, Span::new(0, 5));
    }

    #[test]
    fn expression_precedence() {
        let e = assert_parse_node!(
            [Integer("1"), Plus, Integer("2"), Mul, Integer("3"), Minus, Integer("4")],
            expression
        );
        assert_eq!(e.to_string(), "(1 + (2 * 3)) - 4");
    }

    #[test]
    fn unary_and_concat() {
        let e = assert_parse_node!([Minus, Variable("x"), Mul, Integer("2")], expression);
        assert_eq!(e.to_string(), "-($x * 2)");

        let e = assert_parse_node!(
            [Ident("foo"), LiteralConcat, InterpolationStart, Variable("x"), InterpolationEnd],
            expression
        );
        let ExpressionKind::Binary { op, .. } = e.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Concat);

        assert_no_node(tokens![Minus, Semicolon], |p| p.parse_expression());
        assert_parse_error!([Integer("1"), Plus, Semicolon], expression, UnexpectedToken);
    }

    #[test]
    fn deep_parentheses_are_limited() {
        let mut tokens = Vec::new();
        for _ in 0..10_000 {
            tokens.push(Token::punct(TokenKind::ParenStart));
        }
        tokens.push(Token::new(TokenKind::Integer, "1"));
        let err = Parser::with_default_config(tokens).parse_expression().unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn deep_function_calls_are_limited() {
        let mut tokens = Vec::new();
        for _ in 0..10_000 {
            tokens.push(Token::new(TokenKind::FunctionName, "f"));
            tokens.push(Token::punct(TokenKind::ParenStart));
        }
        tokens.push(Token::new(TokenKind::Integer, "1"));
        let err = Parser::with_default_config(tokens).parse_expression().unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn nested_function_calls_within_limit() {
        let mut tokens = Vec::new();
        for _ in 0..3 {
            tokens.push(Token::new(TokenKind::FunctionName, "f"));
            tokens.push(Token::punct(TokenKind::ParenStart));
        }
        tokens.push(Token::new(TokenKind::Integer, "1"));
        tokens.extend((0..3).map(|_| Token::punct(TokenKind::ParenEnd)));
        let e = Parser::with_default_config(tokens).parse_expression().unwrap().unwrap();
        assert_eq!(e.to_string(), "f(f(f(1)))");
    }
}
