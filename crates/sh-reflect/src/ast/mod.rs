//! Syntax tree for the annotated C++ subset.
//!
//! Only [`CompilationUnit`] and [`Namespace`] expose children to generic
//! traversal through [`Node::children`]. Class members are reached by direct
//! field access.

mod attr;
mod name;

pub use attr::*;
pub use name::*;

use crate::lexer::Token;

/// Kind tag carried by every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Namespace,
    Class,
    Field,
    Method,
    AttributeSequence,
    Attribute,
    Param,
    Literal,
    QualifiedName,
    Macro,
}

/// Any syntax tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    CompilationUnit(CompilationUnit),
    Namespace(Namespace),
    Class(Class),
    Field(Field),
    Method(Method),
    AttributeSequence(AttributeSequence),
    Attribute(Attribute),
    Param(Param),
    Literal(Literal),
    QualifiedName(QualifiedName),
    Macro(Macro),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::CompilationUnit(_) => NodeKind::CompilationUnit,
            Node::Namespace(_) => NodeKind::Namespace,
            Node::Class(_) => NodeKind::Class,
            Node::Field(_) => NodeKind::Field,
            Node::Method(_) => NodeKind::Method,
            Node::AttributeSequence(_) => NodeKind::AttributeSequence,
            Node::Attribute(_) => NodeKind::Attribute,
            Node::Param(_) => NodeKind::Param,
            Node::Literal(_) => NodeKind::Literal,
            Node::QualifiedName(_) => NodeKind::QualifiedName,
            Node::Macro(_) => NodeKind::Macro,
        }
    }

    /// Children visible to generic traversal.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::CompilationUnit(unit) => &unit.declarations,
            Node::Namespace(ns) => &ns.declarations,
            _ => &[],
        }
    }
}

/// The root of the tree: every top-level declaration of one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    pub declarations: Vec<Node>,
}

impl CompilationUnit {
    pub fn new(declarations: Vec<Node>) -> Self {
        Self { declarations }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub keyword: Token,
    pub name: QualifiedName,
    pub declarations: Vec<Node>,
}

/// A `class` or `struct` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub keyword: Token,
    pub name: QualifiedName,
    pub attribute_sequences: Vec<AttributeSequence>,
    pub bases: Vec<QualifiedName>,
    pub members: Vec<Member>,
}

impl Class {
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            Member::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            Member::Field(_) => None,
        })
    }
}

/// An annotated class member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(Field),
    Method(Method),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Literal,
    pub ty: QualifiedName,
    /// Tokens folded into the type after its leading name: template
    /// arguments, `*`/`&` and extra words such as the `int` of `unsigned int`.
    pub type_suffix: Vec<Token>,
    pub attribute_sequences: Vec<AttributeSequence>,
}

impl Field {
    /// Full type text, e.g. `std::vector<int>*`.
    pub fn type_name(&self) -> String {
        type_text(&self.ty, &self.type_suffix)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: Literal,
    pub return_type: QualifiedName,
    pub return_type_suffix: Vec<Token>,
    pub attribute_sequences: Vec<AttributeSequence>,
    /// Parameter list tokens, parentheses included. Never parsed.
    pub discarded_params: Vec<Token>,
}

impl Method {
    pub fn return_type_name(&self) -> String {
        type_text(&self.return_type, &self.return_type_suffix)
    }
}

/// `#` followed by identifiers and string literals, e.g. `#include "a.h"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Macro {
    pub hash: Token,
    pub rest: Vec<Literal>,
}
