use crate::lexer::Token;

use super::Literal;

/// `[[ ... ]]` group of attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSequence {
    pub start: Token,
    /// Namespace from a leading `using NS:`.
    pub using: Option<Literal>,
    pub attributes: Vec<Attribute>,
    pub end: Token,
}

impl AttributeSequence {
    /// Namespace in effect for `attr`: its own, else the sequence default.
    pub fn effective_namespace<'a>(&'a self, attr: &'a Attribute) -> Option<&'a str> {
        attr.namespace.as_ref().or(self.using.as_ref()).map(Literal::value)
    }
}

/// One attribute, e.g. `Reflect`, `SH::Serialize(2)`.
///
/// An attribute with `namespace` set is the namespaced form (`NS::Name`).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub namespace: Option<Literal>,
    pub name: Literal,
    pub params: Option<Vec<Param>>,
}

impl Attribute {
    pub fn is_namespaced(&self) -> bool {
        self.namespace.is_some()
    }

    pub fn params(&self) -> &[Param] {
        self.params.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub value: Literal,
}
