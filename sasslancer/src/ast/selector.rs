use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

/// Identifies a rule set within one parse. Used for the non-owning `&`
/// back-reference from a nested rule set to its enclosing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleSetId(pub u32);

impl fmt::Display for RuleSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element of a selector sequence. Combinators are positional markers
/// between compound selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selector {
    Type { tag: SmolStr },
    Universal,
    Id { id: SmolStr },
    Class { class: SmolStr },
    /// `&`, pointing at the enclosing rule set if there is one.
    Parent { rule_set: Option<RuleSetId> },
    /// `:name` or `:name(lang)`
    Pseudo { name: SmolStr, lang: Option<SmolStr> },
    Adjacent,
    Child,
    Descendant,
}

impl Selector {
    pub fn is_combinator(&self) -> bool {
        matches!(
            self,
            Selector::Adjacent | Selector::Child | Selector::Descendant
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type { tag } => f.write_str(tag),
            Selector::Universal => f.write_str("*"),
            Selector::Id { id } => write!(f, "#{id}"),
            Selector::Class { class } => write!(f, ".{class}"),
            Selector::Parent { .. } => f.write_str("&"),
            Selector::Pseudo { name, lang: None } => write!(f, ":{name}"),
            Selector::Pseudo {
                name,
                lang: Some(lang),
            } => write!(f, ":{name}({lang})"),
            Selector::Adjacent => f.write_str(" + "),
            Selector::Child => f.write_str(" > "),
            Selector::Descendant => f.write_str(" "),
        }
    }
}
