use std::fmt::Write;

// @module: Owned XML element tree

/// A single XML element: name, ordered attributes, child elements and
/// optional text content. Ownership is strictly tree-shaped.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Append an attribute, keeping insertion order.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Find the first direct child with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// Value of the named attribute, if present.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render this element and its subtree as indented XML text.
    pub fn render(&self, out: &mut String, depth: usize) {
        let indent = "    ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.name);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
        }
        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.render(out, depth + 1);
            }
            out.push_str(&indent);
        }
        let _ = write!(out, "</{}>\n", self.name);
    }
}

/// Escape text content. Newlines stay literal so multi-line subtitle
/// text survives the round trip into FCP.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value.
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
