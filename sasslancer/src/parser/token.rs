use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

use strum::EnumIter;

/// Kinds of tokens produced by the stylesheet lexer.
///
/// [`TokenKind::text`] gives the canonical source text of punctuation and
/// keyword kinds, and a short description for kinds that carry a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum TokenKind {
    // ////////////////////////////////////////////////////////////////////////
    // Selectors
    // ////////////////////////////////////////////////////////////////////////
    /// `div`
    TypeSelector,
    /// `*`
    UniversalSelector,
    /// `#main`, the text does not include the `#` marker.
    IdSelector,
    /// `.warning`, the text does not include the `.` marker.
    ClassSelector,
    /// `&`
    ParentSelector,
    /// `:hover`, the text does not include the `:` marker.
    PseudoSelector,
    /// `[type="text"]`, recognised by the lexer but not built by the parser.
    AttributeSelector,
    /// `+`
    AdjacentCombinator,
    /// `>`
    ChildCombinator,
    /// whitespace between two compound selectors
    DescendantCombinator,
    /// `~`, recognised by the lexer but not built by the parser.
    SiblingCombinator,

    // ////////////////////////////////////////////////////////////////////////
    // Literals
    // ////////////////////////////////////////////////////////////////////////
    Integer,
    Float,
    /// `"double quoted"`, the text does not include the quotes.
    QqString,
    /// `'single quoted'`, the text does not include the quotes.
    QString,
    /// `foo.css` inside `url(...)`
    UnquotedString,
    Ident,
    /// `darken` in `darken(...)`, the text does not include the `(`.
    FunctionName,
    HexColor,
    /// `$width`, the text does not include the `$` sigil.
    Variable,
    PropertyName,

    // ////////////////////////////////////////////////////////////////////////
    // Units, always immediately following a number
    // ////////////////////////////////////////////////////////////////////////
    UnitPx,
    UnitPt,
    UnitCm,
    UnitEm,
    UnitMm,
    UnitRem,
    UnitDeg,
    UnitPercent,

    // ////////////////////////////////////////////////////////////////////////
    // Punctuation and operators
    // ////////////////////////////////////////////////////////////////////////
    Colon,
    Comma,
    Semicolon,
    ParenStart,
    ParenEnd,
    BraceStart,
    BraceEnd,
    Plus,
    Minus,
    Mul,
    Div,
    /// Juxtaposition of a string with an interpolation, e.g. `foo#{$x}`.
    LiteralConcat,

    // ////////////////////////////////////////////////////////////////////////
    // Keywords
    // ////////////////////////////////////////////////////////////////////////
    Import,
    /// A single media type after an import, e.g. `screen`.
    Media,
    /// `fr` in `:lang(fr)`
    LangCode,

    InterpolationStart,
    InterpolationEnd,

    Eof,
}

impl TokenKind {
    /// Canonical text for punctuation and keywords, a description otherwise.
    pub const fn text(self) -> &'static str {
        use TokenKind::*;
        match self {
            TypeSelector => "type selector",
            UniversalSelector => "*",
            IdSelector => "id selector",
            ClassSelector => "class selector",
            ParentSelector => "&",
            PseudoSelector => "pseudo selector",
            AttributeSelector => "attribute selector",
            AdjacentCombinator => "+ combinator",
            ChildCombinator => ">",
            DescendantCombinator => "descendant combinator",
            SiblingCombinator => "~",
            Integer => "integer",
            Float => "float",
            QqString => "double quoted string",
            QString => "single quoted string",
            UnquotedString => "unquoted string",
            Ident => "identifier",
            FunctionName => "function name",
            HexColor => "hex color",
            Variable => "variable",
            PropertyName => "property name",
            UnitPx => "px",
            UnitPt => "pt",
            UnitCm => "cm",
            UnitEm => "em",
            UnitMm => "mm",
            UnitRem => "rem",
            UnitDeg => "deg",
            UnitPercent => "%",
            Colon => ":",
            Comma => ",",
            Semicolon => ";",
            ParenStart => "(",
            ParenEnd => ")",
            BraceStart => "{",
            BraceEnd => "}",
            Plus => "+",
            Minus => "-",
            Mul => "*",
            Div => "/",
            LiteralConcat => "string concatenation",
            Import => "@import",
            Media => "media type",
            LangCode => "language code",
            InterpolationStart => "#{",
            InterpolationEnd => "}",
            Eof => "end of input",
        }
    }

    pub fn is_selector(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            TypeSelector
                | UniversalSelector
                | IdSelector
                | ClassSelector
                | ParentSelector
                | PseudoSelector
                | AttributeSelector
                | AdjacentCombinator
                | ChildCombinator
                | DescendantCombinator
                | SiblingCombinator
        )
    }

    /// Quoted or bare string tokens usable as an import url.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            TokenKind::QqString | TokenKind::QString | TokenKind::UnquotedString | TokenKind::Ident
        )
    }

    pub fn is_unit(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            UnitPx | UnitPt | UnitCm | UnitEm | UnitMm | UnitRem | UnitDeg | UnitPercent
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A lexed token. Positions are 1-indexed, 0 means unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default)]
    pub text: SmolStr,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            text: text.into(),
            line: 0,
            column: 0,
        }
    }

    /// Token whose text is the canonical text of its kind, e.g. `{` or `px`.
    pub fn punct(kind: TokenKind) -> Self {
        Self::new(kind, kind.text())
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn has_position(&self) -> bool {
        self.line != 0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == TokenKind::Eof {
            return write!(f, "end of input");
        }
        write!(f, "`{}` ({:?})", self.text, self.kind)?;
        if self.has_position() {
            write!(f, " at {}:{}", self.line, self.column)?;
        }
        Ok(())
    }
}
