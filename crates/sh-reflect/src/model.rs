//! Reflection metadata handed to code generation.
//!
//! Independent of C++ syntax: every name is plain text and every attribute
//! namespace is already resolved.

use serde::{Deserialize, Serialize};

/// A reflected class or struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clazz {
    /// Enclosing namespaces and the class name joined by `::`.
    pub qualified_name: String,
    /// How generated code includes the declaring file, e.g. `entities/Player.h`.
    pub declaring_file: String,
    pub fields: Vec<Field>,
    pub attributes: Vec<Attribute>,
}

impl Clazz {
    pub fn new(qualified_name: impl Into<String>, declaring_file: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            declaring_file: declaring_file.into(),
            fields: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn has_attribute(&self, marker: &Marker) -> bool {
        self.attributes.iter().any(|a| a.matches(marker))
    }

    /// Fields carrying `marker`, in declaration order.
    pub fn fields_with<'a>(&'a self, marker: &'a Marker) -> impl Iterator<Item = &'a Field> {
        self.fields.iter().filter(move |f| f.has_attribute(marker))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub attributes: Vec<Attribute>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into(), attributes: Vec::new() }
    }

    pub fn has_attribute(&self, marker: &Marker) -> bool {
        self.attributes.iter().any(|a| a.matches(marker))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Empty when neither the attribute nor its sequence names one.
    pub namespace: String,
    pub name: String,
    pub parameters: Vec<String>,
}

impl Attribute {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into(), parameters: Vec::new() }
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Compares namespace and name separately, never a joined `NS::Name`.
    pub fn matches(&self, marker: &Marker) -> bool {
        self.namespace == marker.namespace && self.name == marker.name
    }
}

/// The attribute that selects classes and fields for code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub namespace: String,
    pub name: String,
}

impl Marker {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into() }
    }
}

impl Default for Marker {
    /// `SH::Reflect`
    fn default() -> Self {
        Self::new("SH", "Reflect")
    }
}
