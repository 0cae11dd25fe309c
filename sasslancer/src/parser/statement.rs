use tracing::{debug, instrument, trace};

use super::error::{Expected, ParseError, ParseResult};
use super::token::TokenKind;
use super::Parser;
use crate::ast::{
    DeclarationBlock, Expression, ExpressionKind, ImportStatement, List, ListSeparator, Property,
    RuleSet, RuleSetId, Selector, Span, Statement, Stylesheet, Url, Variable, VariableAssignment,
};

impl Parser {
    /// Parses statements until the end of input.
    #[instrument(skip_all, fields(tokens = self.cursor.tokens().len()))]
    pub fn parse_stylesheet(&mut self) -> ParseResult<Stylesheet> {
        let mut stylesheet = Stylesheet::default();
        while !self.cursor.at_eof() {
            match self.parse_statement(None)? {
                Some(statement) => stylesheet.statements.push(statement),
                None => return Err(self.unexpected("statement")),
            }
        }
        debug!(statements = stylesheet.statements.len(), "parsed stylesheet");
        Ok(stylesheet)
    }

    pub fn parse_statement(&mut self, parent: Option<RuleSetId>) -> ParseResult<Option<Statement>> {
        let kind = self.cursor.peek_kind();
        if kind == TokenKind::Import {
            return Ok(self.parse_import_statement()?.map(Statement::Import));
        } else if kind == TokenKind::Variable {
            return Ok(self
                .parse_variable_assignment()?
                .map(Statement::VariableAssignment));
        } else if kind.is_selector() {
            return Ok(self.parse_rule_set(parent)?.map(Statement::RuleSet));
        }
        return Ok(None);
    }

    pub fn parse_rule_set(&mut self, parent: Option<RuleSetId>) -> ParseResult<Option<RuleSet>> {
        trace!(pos = self.position(), "parse_rule_set");
        if !self.cursor.peek_kind().is_selector() {
            return Ok(None);
        }
        let start = self.position();
        let mut rule_set = RuleSet::new(self.alloc_rule_set_id(), parent);

        let mut tok_pos = self.position();
        let mut tok = self.cursor.next();
        while tok.kind.is_selector() {
            let selector = match tok.kind {
                TokenKind::TypeSelector => Selector::Type { tag: tok.text },
                TokenKind::UniversalSelector => Selector::Universal,
                TokenKind::IdSelector => Selector::Id { id: tok.text },
                TokenKind::ClassSelector => Selector::Class { class: tok.text },
                TokenKind::ParentSelector => {
                    if parent.is_none() && !self.config.allow_orphan_parent_selector {
                        return Err(ParseError::unsupported(
                            "parent selectors outside a rule set",
                            tok_pos,
                        ));
                    }
                    Selector::Parent { rule_set: parent }
                }
                TokenKind::PseudoSelector => Selector::Pseudo {
                    name: tok.text,
                    lang: self.accept(TokenKind::LangCode).map(|t| t.text),
                },
                TokenKind::AdjacentCombinator => Selector::Adjacent,
                TokenKind::ChildCombinator => Selector::Child,
                TokenKind::DescendantCombinator => Selector::Descendant,
                _ => {
                    return Err(ParseError::UnexpectedSelectorToken {
                        token: tok,
                        position: tok_pos,
                    })
                }
            };
            rule_set.append_selector(selector);
            tok_pos = self.position();
            tok = self.cursor.next();
        }
        self.cursor.backup();

        let Some(block) = self.parse_declaration_block(rule_set.id)? else {
            return Err(ParseError::unexpected(
                TokenKind::BraceStart,
                self.cursor.peek().clone(),
                self.position(),
            ));
        };
        rule_set.block = block;
        rule_set.span = Span::new(start, self.position());
        Ok(Some(rule_set))
    }

    /// `{ name: value; ... }` belonging to `rule_set`.
    pub fn parse_declaration_block(
        &mut self,
        rule_set: RuleSetId,
    ) -> ParseResult<Option<DeclarationBlock>> {
        trace!(pos = self.position(), %rule_set, "parse_declaration_block");
        if self.accept(TokenKind::BraceStart).is_none() {
            return Ok(None);
        }

        let mut block = DeclarationBlock::default();
        loop {
            let pos = self.position();
            let tok = self.cursor.next();
            if tok.kind == TokenKind::BraceEnd {
                break;
            }
            if tok.kind == TokenKind::PropertyName {
                self.expect(TokenKind::Colon)?;
                let value = self.parse_property_value()?;
                block.append(Property { name: tok, value });
            } else if tok.kind.is_selector() {
                return Err(ParseError::unsupported("nested rule sets", pos));
            } else {
                return Err(ParseError::unexpected(
                    Expected::Construct("property or `}`"),
                    tok,
                    pos,
                ));
            }
        }
        Ok(Some(block))
    }

    /// Lists up to `;`, which is consumed, or `}`, which is left for the
    /// enclosing block.
    pub fn parse_property_value(&mut self) -> ParseResult<List> {
        trace!(pos = self.position(), "parse_property_value");
        let mut value = List::new(ListSeparator::Space);
        while !self.peek_one(&[TokenKind::Semicolon, TokenKind::BraceEnd]) {
            let start = self.position();
            let Some(list) = self.parse_list()? else {
                break;
            };
            value.append(Expression::new(
                ExpressionKind::List(list),
                Span::new(start, self.position()),
            ));
        }

        if self.accept(TokenKind::Semicolon).is_none() && !self.peek(TokenKind::BraceEnd) {
            return Err(self.unexpected("`;` or `}` after property value"));
        }
        Ok(value)
    }

    pub fn parse_variable(&mut self) -> ParseResult<Option<Variable>> {
        let pos = self.position();
        let Some(tok) = self.accept(TokenKind::Variable) else {
            return Ok(None);
        };
        Ok(Some(Variable {
            name: tok.text,
            span: Span::single(pos),
        }))
    }

    /// `$name: value;`
    pub fn parse_variable_assignment(&mut self) -> ParseResult<Option<VariableAssignment>> {
        trace!(pos = self.position(), "parse_variable_assignment");
        let start = self.position();
        let Some(variable) = self.parse_variable()? else {
            return Ok(None);
        };
        self.expect(TokenKind::Colon)?;
        let Some(value) = self.parse_value()? else {
            return Err(self.unexpected("value"));
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Some(VariableAssignment {
            variable,
            value,
            span: Span::new(start, self.position()),
        }))
    }

    /// `@import url(foo.css) media;` or `@import "foo.css" media;`
    pub fn parse_import_statement(&mut self) -> ParseResult<Option<ImportStatement>> {
        trace!(pos = self.position(), "parse_import_statement");
        let start = self.position();
        if self.accept(TokenKind::Import).is_none() {
            return Ok(None);
        }

        let pos = self.position();
        let tok = self.cursor.peek().clone();
        let url = if tok.kind == TokenKind::Ident {
            if tok.text.as_str() != "url" {
                return Err(ParseError::unexpected(
                    Expected::Construct("`url(...)`"),
                    tok,
                    pos,
                ));
            }
            self.cursor.next();
            self.expect(TokenKind::ParenStart)?;
            let url_pos = self.position();
            let url = self.cursor.next();
            if !url.kind.is_string() {
                return Err(ParseError::unexpected(
                    Expected::Construct("url"),
                    url,
                    url_pos,
                ));
            }
            self.expect(TokenKind::ParenEnd)?;
            Url::Absolute(url.text)
        } else if tok.kind.is_string() {
            self.cursor.next();
            Url::Relative(tok.text)
        } else {
            return Err(ParseError::unexpected(
                Expected::Construct("import url"),
                tok,
                pos,
            ));
        };

        // TODO: media query lists such as `screen and (color)` or `projection, tv`
        let mut media = Vec::new();
        if let Some(tok) = self.accept(TokenKind::Media) {
            media.push(tok.text);
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(Some(ImportStatement {
            url,
            media,
            span: Span::new(start, self.position()),
        }))
    }
}
