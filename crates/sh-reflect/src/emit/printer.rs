//! Line-oriented text builder with scoped indentation.

use std::ops::{Deref, DerefMut};

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct IndentPrinter {
    out: String,
    depth: usize,
}

impl IndentPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` at the current depth, followed by a newline.
    ///
    /// An empty `text` writes a bare newline with no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Increase the depth until the returned guard is dropped.
    pub fn indent(&mut self) -> Indent<'_> {
        self.depth += 1;
        Indent { printer: self }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// RAII indentation scope; derefs to the printer it indents.
pub struct Indent<'a> {
    printer: &'a mut IndentPrinter,
}

impl Deref for Indent<'_> {
    type Target = IndentPrinter;

    fn deref(&self) -> &IndentPrinter {
        self.printer
    }
}

impl DerefMut for Indent<'_> {
    fn deref_mut(&mut self) -> &mut IndentPrinter {
        self.printer
    }
}

impl Drop for Indent<'_> {
    fn drop(&mut self) {
        self.printer.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_indent() {
        let mut p = IndentPrinter::new();
        p.line("a {");
        {
            let mut inner = p.indent();
            inner.line("b {");
            {
                let mut innermost = inner.indent();
                innermost.line("c;");
            }
            inner.line("}");
        }
        p.line("}");

        assert_eq!(p.finish(), "a {\n    b {\n        c;\n    }\n}\n");
    }

    #[test]
    fn test_guard_restores_depth_on_early_exit() {
        fn write_until(p: &mut IndentPrinter, stop: usize) -> Option<()> {
            let mut scope = p.indent();
            for i in 0..3 {
                if i == stop {
                    return None;
                }
                scope.line(i.to_string());
            }
            Some(())
        }

        let mut p = IndentPrinter::new();
        assert!(write_until(&mut p, 1).is_none());
        assert_eq!(p.depth(), 0);
        assert!(write_until(&mut p, 5).is_some());
        assert_eq!(p.depth(), 0);
    }

    #[test]
    fn test_empty_line_has_no_indent() {
        let mut p = IndentPrinter::new();
        {
            let mut scope = p.indent();
            scope.line("");
        }
        assert_eq!(p.finish(), "\n");
    }
}
