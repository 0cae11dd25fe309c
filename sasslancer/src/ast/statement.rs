use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;

use super::expression::{Expression, List, ListSeparator};
use super::selector::{RuleSetId, Selector};
use super::Span;
use crate::parser::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Url {
    /// `url(foo.css)`
    Absolute(SmolStr),
    /// `"foo.css"`
    Relative(SmolStr),
}

impl Url {
    pub fn as_str(&self) -> &str {
        match self {
            Url::Absolute(url) | Url::Relative(url) => url,
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Url::Absolute(url) => write!(f, "url({url})"),
            Url::Relative(url) => write!(f, "\"{url}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportStatement {
    pub url: Url,
    /// Only a single bare media type is captured for now.
    pub media: Vec<SmolStr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: SmolStr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableAssignment {
    pub variable: Variable,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: Token,
    pub value: List,
}

impl Property {
    pub fn name(&self) -> &str {
        &self.name.text
    }

    /// Value as written, top-level comma lists without their parentheses.
    pub fn value_text(&self) -> String {
        self.value
            .iter()
            .map(|item| match item.as_list() {
                Some(list) if list.separator == ListSeparator::Comma => list.iter().join(", "),
                _ => item.to_string(),
            })
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclarationBlock {
    pub properties: Vec<Property>,
}

impl DeclarationBlock {
    pub fn append(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    pub id: RuleSetId,
    /// Enclosing rule set, `None` at the top level.
    pub parent: Option<RuleSetId>,
    pub selectors: Vec<Selector>,
    pub block: DeclarationBlock,
    pub span: Span,
}

impl RuleSet {
    pub fn new(id: RuleSetId, parent: Option<RuleSetId>) -> Self {
        Self {
            id,
            parent,
            selectors: Vec::new(),
            block: DeclarationBlock::default(),
            span: Span::default(),
        }
    }

    pub fn append_selector(&mut self, selector: Selector) {
        self.selectors.push(selector);
    }

    pub fn selector_text(&self) -> String {
        self.selectors.iter().join("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Statement {
    Import(ImportStatement),
    VariableAssignment(VariableAssignment),
    RuleSet(RuleSet),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Import(import) => import.span,
            Statement::VariableAssignment(assignment) => assignment.span,
            Statement::RuleSet(rule_set) => rule_set.span,
        }
    }

    pub fn as_rule_set(&self) -> Option<&RuleSet> {
        match self {
            Statement::RuleSet(rule_set) => Some(rule_set),
            _ => None,
        }
    }
}

/// Root of a parsed token stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Stylesheet {
    pub statements: Vec<Statement>,
}

impl Stylesheet {
    pub fn rule_sets(&self) -> impl Iterator<Item = &RuleSet> {
        self.statements.iter().filter_map(Statement::as_rule_set)
    }

    /// Resolves a parent-selector back-reference.
    pub fn rule_set(&self, id: RuleSetId) -> Option<&RuleSet> {
        self.rule_sets().find(|r| r.id == id)
    }

    /// Indented outline of the tree, one node per line.
    pub fn fancy_string(&self) -> String {
        let mut res = String::from("Stylesheet {");
        for statement in &self.statements {
            res += "\n    ";
            match statement {
                Statement::Import(import) => {
                    res += &format!("Import {}", import.url);
                    if !import.media.is_empty() {
                        res += &format!(" [{}]", import.media.iter().join(", "));
                    }
                }
                Statement::VariableAssignment(assignment) => {
                    res += &format!(
                        "Variable ${} = {}",
                        assignment.variable.name, assignment.value
                    );
                }
                Statement::RuleSet(rule_set) => {
                    res += &format!("RuleSet{} `{}` {{", rule_set.id, rule_set.selector_text());
                    for property in &rule_set.block.properties {
                        res += &format!("\n        {}: {}", property.name(), property.value_text());
                    }
                    res += "\n    }";
                }
            }
        }
        res += "\n}";
        res
    }
}
