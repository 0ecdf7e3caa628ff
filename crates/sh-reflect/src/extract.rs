//! Walk a parsed file and collect the reflection model.

use log::{debug, info};

use crate::ast::{self, AttributeSequence, CompilationUnit, Node};
use crate::model::{Attribute, Clazz, Field};

/// Collect every class of `unit`, in depth-first encounter order.
///
/// `declaring_file` is recorded on each class verbatim; it is how generated
/// code will include the header.
pub fn extract(unit: &CompilationUnit, declaring_file: &str) -> Vec<Clazz> {
    let mut extractor = Extractor::new(declaring_file);
    for node in &unit.declarations {
        extractor.visit(node);
    }
    debug!("{}: {} class(es)", declaring_file, extractor.classes.len());
    extractor.classes
}

struct Extractor<'a> {
    declaring_file: &'a str,
    namespaces: Vec<String>,
    classes: Vec<Clazz>,
}

impl<'a> Extractor<'a> {
    fn new(declaring_file: &'a str) -> Self {
        Self { declaring_file, namespaces: Vec::new(), classes: Vec::new() }
    }

    fn visit(&mut self, node: &Node) {
        match node {
            Node::Namespace(ns) => {
                self.namespaces.push(ns.name.to_string());
                for child in node.children() {
                    self.visit(child);
                }
                self.namespaces.pop();
            }
            Node::Class(class) => {
                let clazz = self.class(class);
                info!("found class {} in {}", clazz.qualified_name, self.declaring_file);
                self.classes.push(clazz);
            }
            _ => {}
        }
    }

    fn class(&self, class: &ast::Class) -> Clazz {
        let mut qualified_name = self.namespaces.join("::");
        if !qualified_name.is_empty() {
            qualified_name.push_str("::");
        }
        qualified_name.push_str(&class.name.to_string());

        let mut clazz = Clazz::new(qualified_name, self.declaring_file);
        clazz.attributes = resolve_attributes(&class.attribute_sequences);
        clazz.fields = class
            .fields()
            .map(|field| Field {
                name: field.name.value().to_string(),
                ty: field.type_name(),
                attributes: resolve_attributes(&field.attribute_sequences),
            })
            .collect();
        clazz
    }
}

/// Flatten attribute sequences, giving each attribute its effective namespace.
fn resolve_attributes(sequences: &[AttributeSequence]) -> Vec<Attribute> {
    sequences
        .iter()
        .flat_map(|seq| {
            seq.attributes.iter().map(move |attr| {
                let namespace = seq.effective_namespace(attr).unwrap_or_default();
                let parameters =
                    attr.params().iter().map(|p| p.value.value().to_string()).collect();
                Attribute::new(namespace, attr.name.value()).with_parameters(parameters)
            })
        })
        .collect()
}
