use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;

use super::Span;
use crate::parser::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Pt,
    Cm,
    Em,
    Mm,
    Rem,
    Deg,
    Percent,
}

impl Unit {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::UnitPx => Unit::Px,
            TokenKind::UnitPt => Unit::Pt,
            TokenKind::UnitCm => Unit::Cm,
            TokenKind::UnitEm => Unit::Em,
            TokenKind::UnitMm => Unit::Mm,
            TokenKind::UnitRem => Unit::Rem,
            TokenKind::UnitDeg => Unit::Deg,
            TokenKind::UnitPercent => Unit::Percent,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Cm => "cm",
            Unit::Em => "em",
            Unit::Mm => "mm",
            Unit::Rem => "rem",
            Unit::Deg => "deg",
            Unit::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteKind {
    Double,
    Single,
}

impl QuoteKind {
    pub fn as_char(self) -> char {
        match self {
            QuoteKind::Double => '"',
            QuoteKind::Single => '\'',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Juxtaposed strings and interpolations.
    Concat,
}

impl BinaryOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Mul => BinaryOp::Mul,
            TokenKind::Div => BinaryOp::Div,
            TokenKind::LiteralConcat => BinaryOp::Concat,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Concat => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSeparator {
    Comma,
    Space,
}

/// Ordered list of expressions. One-element lists are kept as lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub separator: ListSeparator,
    pub items: Vec<Expression>,
}

impl List {
    pub fn new(separator: ListSeparator) -> Self {
        Self {
            separator,
            items: Vec::new(),
        }
    }

    pub fn append(&mut self, item: Expression) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.items.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub key: Expression,
    pub value: Expression,
}

/// Map literal in source order. Duplicate keys are kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Map {
    pub entries: Vec<MapEntry>,
}

impl Map {
    pub fn insert(&mut self, key: Expression, value: Expression) {
        self.entries.push(MapEntry { key, value });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last value bound to an identifier key, mirroring how later keys shadow
    /// earlier ones once evaluated.
    pub fn get_by_name(&self, name: &str) -> Option<&Expression> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key.as_identifier() == Some(name))
            .map(|e| &e.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    #[serde(flatten)]
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExpressionKind {
    Number {
        value: f64,
    },
    Length {
        value: f64,
        unit: Unit,
    },
    String {
        text: SmolStr,
        quote: QuoteKind,
    },
    Identifier {
        name: SmolStr,
    },
    Variable {
        name: SmolStr,
    },
    FunctionCall {
        name: SmolStr,
        args: Vec<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Interpolation {
        inner: Box<Expression>,
    },
    List(List),
    Map(Map),
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn unary(op: UnaryOp, operand: Expression, span: Span) -> Self {
        Self::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// Binary expression spanning both operands.
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        let span = left.span.to(right.span);
        Self::new(
            ExpressionKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn as_list(&self) -> Option<&List> {
        match &self.kind {
            ExpressionKind::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match &self.kind {
            ExpressionKind::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Magnitude of a number or length literal.
    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ExpressionKind::Number { value } | ExpressionKind::Length { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }

    pub fn is_map(&self) -> bool {
        self.as_map().is_some()
    }

    fn is_operation(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::Binary { .. } | ExpressionKind::Unary { .. }
        )
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_operation() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

fn fmt_list(list: &List, nested_in_space: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match list.separator {
        ListSeparator::Comma => write!(f, "({})", list.items.iter().join(", ")),
        ListSeparator::Space => {
            if nested_in_space {
                f.write_str("(")?;
            }
            for (i, item) in list.items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                match item.as_list() {
                    Some(inner) => fmt_list(inner, true, f)?,
                    None => write!(f, "{item}")?,
                }
            }
            if nested_in_space {
                f.write_str(")")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Number { value } => write!(f, "{value}"),
            ExpressionKind::Length { value, unit } => write!(f, "{value}{}", unit.as_str()),
            ExpressionKind::String { text, quote } => {
                let q = quote.as_char();
                write!(f, "{q}{text}{q}")
            }
            ExpressionKind::Identifier { name } => f.write_str(name),
            ExpressionKind::Variable { name } => write!(f, "${name}"),
            ExpressionKind::FunctionCall { name, args } => {
                write!(f, "{name}({})", args.iter().join(", "))
            }
            ExpressionKind::Unary { op, operand } => {
                f.write_str(match op {
                    UnaryOp::Plus => "+",
                    UnaryOp::Minus => "-",
                })?;
                operand.fmt_operand(f)
            }
            ExpressionKind::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                if *op != BinaryOp::Concat {
                    write!(f, " {} ", op.as_str())?;
                }
                right.fmt_operand(f)
            }
            ExpressionKind::Interpolation { inner } => write!(f, "#{{{inner}}}"),
            ExpressionKind::List(list) => fmt_list(list, false, f),
            ExpressionKind::Map(map) => write!(
                f,
                "({})",
                map.entries
                    .iter()
                    .format_with(", ", |e, g| g(&format_args!("{}: {}", e.key, e.value)))
            ),
        }
    }
}
