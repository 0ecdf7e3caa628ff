//! Reflection registration source for the runtime's `SH::Reflection` API.

use log::debug;

use super::printer::IndentPrinter;
use crate::model::{Clazz, Marker};

/// Header of the reflection runtime included at the top of generated code.
pub const DEFAULT_RUNTIME_HEADER: &str = "reflection.h";

/// Renders registration code for every class carrying `marker`.
#[derive(Debug, Clone)]
pub struct ReflectionWriter {
    marker: Marker,
    runtime_header: String,
}

impl Default for ReflectionWriter {
    fn default() -> Self {
        Self::new(Marker::default(), DEFAULT_RUNTIME_HEADER)
    }
}

impl ReflectionWriter {
    pub fn new(marker: Marker, runtime_header: impl Into<String>) -> Self {
        Self { marker, runtime_header: runtime_header.into() }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Render the whole generated file. Classes keep their input order.
    pub fn render(&self, classes: &[Clazz]) -> String {
        let mut w = IndentPrinter::new();

        w.line(format!("#include <{}>", self.runtime_header));
        w.line("using namespace SH::Reflection;");
        w.line("");

        let mut emitted = 0;
        for clazz in classes.iter().filter(|c| c.has_attribute(&self.marker)) {
            self.write_class(&mut w, clazz);
            emitted += 1;
        }
        debug!("emitted {} of {} class(es)", emitted, classes.len());

        w.finish()
    }

    fn write_class(&self, w: &mut IndentPrinter, clazz: &Clazz) {
        let name = &clazz.qualified_name;
        let fields: Vec<_> = clazz.fields_with(&self.marker).collect();

        w.line(format!("#include <{}>", clazz.declaring_file));
        w.line(format!("template<> Class const *SH::Reflection::GetClass(ClassTag<{}>){{", name));
        {
            let mut body = w.indent();
            body.line(format!(
                "static detail::ClassStorage<{}, {}, 0, 0> reflected([](auto self) {{",
                name,
                fields.len()
            ));
            {
                let mut slots = body.indent();
                for (i, field) in fields.iter().enumerate() {
                    slots.line(format!("self->fields[{}].type = GetType<{}>();", i, field.ty));
                    slots.line(format!("self->fields[{}].name = \"{}\";", i, field.name));
                    slots.line(format!(
                        "self->fields[{}].offset = offsetof({}, {});",
                        i, name, field.name
                    ));
                }
            }
            body.line("});");
            body.line(format!(
                "static Class const clazz(\"{0}\", sizeof({0}), reflected.fields, reflected.numFields);",
                name
            ));
            body.line("return &clazz;");
        }
        w.line("}");
        w.line(format!(
            "const Class *{0}::GetClass() const {{ return SH::Reflection::GetClass(ClassTag<{0}>{{}}); }}",
            name
        ));
        w.line("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, Field};

    fn reflected(name: &str) -> Clazz {
        let mut clazz = Clazz::new(name, "a.h");
        clazz.attributes.push(Attribute::new("SH", "Reflect"));
        clazz
    }

    #[test]
    fn test_header_only_when_nothing_marked() {
        let out = ReflectionWriter::default().render(&[Clazz::new("A", "a.h")]);
        assert_eq!(out, "#include <reflection.h>\nusing namespace SH::Reflection;\n\n");
    }

    #[test]
    fn test_field_slots_numbered_from_zero() {
        let mut clazz = reflected("A");
        for name in ["x", "y"] {
            let mut field = Field::new(name, "float");
            field.attributes.push(Attribute::new("SH", "Reflect"));
            clazz.fields.push(field);
        }

        let out = ReflectionWriter::default().render(&[clazz]);
        assert!(out.contains("ClassStorage<A, 2, 0, 0>"));
        assert!(out.contains("        self->fields[0].type = GetType<float>();\n"));
        assert!(out.contains("        self->fields[1].offset = offsetof(A, y);\n"));
        assert!(out.contains("sizeof(A)"));
    }

    #[test]
    fn test_custom_marker_and_runtime_header() {
        let mut clazz = Clazz::new("A", "a.h");
        clazz.attributes.push(Attribute::new("Game", "Meta"));
        let writer = ReflectionWriter::new(Marker::new("Game", "Meta"), "rt/reflect.hpp");

        let out = writer.render(&[clazz]);
        assert!(out.starts_with("#include <rt/reflect.hpp>\n"));
        assert!(out.contains("ClassTag<A>"));
    }
}
