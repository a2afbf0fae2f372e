//! Indenting XML serializer

use crate::config::Config;
use crate::xml::model::{Content, Document, Element};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Renders documents as text, one element per line when indenting
#[derive(Clone, Copy, Debug, Default)]
pub struct Writer {
    indent: usize,
    declaration: bool,
}

impl Writer {
    pub const fn new(config: &Config) -> Self {
        Self {
            indent: config.indent,
            declaration: config.declaration,
        }
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut output = String::new();
        if self.declaration {
            output.push_str(DECLARATION);
            self.newline(&mut output);
        }
        self.render_element(&doc.root, 0, &mut output);
        self.newline(&mut output);
        output
    }

    fn render_element(&self, element: &Element, depth: usize, output: &mut String) {
        self.pad(depth, output);
        output.push('<');
        output.push_str(&element.name);

        for (key, value) in &element.attributes {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape_xml(value));
            output.push('"');
        }

        if element.children.is_empty() {
            output.push_str("/>");
            return;
        }

        output.push('>');
        if element.has_element_children() {
            for child in &element.children {
                self.newline(output);
                match child {
                    Content::Element(child) => self.render_element(child, depth + 1, output),
                    Content::Text(text) => {
                        self.pad(depth + 1, output);
                        output.push_str(&escape_xml(text.trim()));
                    }
                }
            }
            self.newline(output);
            self.pad(depth, output);
        } else {
            output.push_str(&escape_xml(&element.text()));
        }
        output.push_str("</");
        output.push_str(&element.name);
        output.push('>');
    }

    fn pad(&self, depth: usize, output: &mut String) {
        output.extend(std::iter::repeat(' ').take(depth * self.indent));
    }

    fn newline(&self, output: &mut String) {
        if self.indent > 0 {
            output.push('\n');
        }
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut employee = Element::new("empleado");
        employee.set_attribute("id", "1");
        employee.push(Element::with_text("apellido", "Smith"));
        employee.push(Element::with_text("departamento", "R&D"));
        let mut root = Element::new("empleados");
        root.push(employee);
        Document { root }
    }

    #[test]
    fn test_render_indented() {
        let output = Writer::new(&Config::default()).render(&sample());
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
                        <empleados>\n\
                        \x20   <empleado id=\"1\">\n\
                        \x20       <apellido>Smith</apellido>\n\
                        \x20       <departamento>R&amp;D</departamento>\n\
                        \x20   </empleado>\n\
                        </empleados>\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_render_compact() {
        let output = Writer::new(&Config::compact()).render(&sample());
        assert_eq!(
            output,
            "<empleados><empleado id=\"1\"><apellido>Smith</apellido>\
             <departamento>R&amp;D</departamento></empleado></empleados>"
        );
    }

    #[test]
    fn test_empty_root_self_closes() {
        let doc = Document {
            root: Element::new("empleados"),
        };
        let output = Writer::new(&Config::compact()).render(&doc);
        assert_eq!(output, "<empleados/>");
    }

    #[test]
    fn test_escape_attribute_quotes() {
        let mut root = Element::new("e");
        root.set_attribute("id", "a\"b<c");
        let output = Writer::new(&Config::compact()).render(&Document { root });
        assert_eq!(output, "<e id=\"a&quot;b&lt;c\"/>");
    }
}
