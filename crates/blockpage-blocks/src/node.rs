//! Output tree produced by block renderers.
//!
//! Renderers build `Node` trees instead of strings so the result can be
//! serialized for a hosting UI framework or written out as HTML.

use std::collections::BTreeMap;

use serde::Serialize;

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

/// A node in the rendered output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Node {
    /// An element with classes, attributes and children
    Element(Element),
    /// Plain text, escaped on output
    Text(String),
    /// Pre-rendered HTML (Markdown output), written verbatim, with its
    /// plain text for text queries
    Raw { html: String, text: String },
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Tag name (e.g., "div")
    pub tag: String,

    /// CSS classes in insertion order
    pub classes: Vec<String>,

    /// Attributes; `None` marks a boolean attribute
    pub attrs: BTreeMap<String, Option<String>>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add whitespace separated classes. Empty input adds nothing.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Set an attribute value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), Some(value.into()));
        self
    }

    /// Set a boolean attribute.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), None);
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes.
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Whether the element carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute value, if set with a value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(|v| v.as_deref())
    }

    /// Whether an attribute is present at all.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Render the tree to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Node::Raw { html, .. } => out.push_str(html),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);

                if !el.classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(
                        &el.classes.join(" "),
                    ));
                    out.push('"');
                }

                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&html_escape::encode_double_quoted_attribute(value));
                        out.push('"');
                    }
                }

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    out.push_str(" />");
                    return;
                }

                out.push('>');
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text of all text nodes, in document order.
    ///
    /// Raw HTML contributes its plain text.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Raw { text, .. } => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// The element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// First element (depth-first, including self) matching the predicate.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let el = self.as_element()?;
        if pred(el) {
            return Some(el);
        }
        el.children.iter().find_map(|child| child.find(pred))
    }

    /// All elements (depth-first, including self) matching the predicate.
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if pred(el) {
                out.push(el);
            }
            for child in &el.children {
                child.collect_matching(pred, out);
            }
        }
    }

    /// First element carrying the class.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|el| el.has_class(class))
    }

    /// All elements carrying the class.
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(&|el| el.has_class(class))
    }

    /// First element with the tag name.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|el| el.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements() {
        let node: Node = Element::new("div")
            .class("card shadow")
            .attr("id", "a")
            .child(Element::new("p").text("Hello"))
            .into();

        assert_eq!(
            node.to_html(),
            r#"<div class="card shadow" id="a"><p>Hello</p></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = Element::new("a")
            .attr("title", "say \"hi\"")
            .text("<script>")
            .into();

        let html = node.to_html();

        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("say &quot;hi&quot;"));
    }

    #[test]
    fn void_and_boolean_attributes() {
        let node: Node = Element::new("video")
            .flag("controls")
            .child(Element::new("source").attr("src", "a.mp4"))
            .into();

        assert_eq!(
            node.to_html(),
            r#"<video controls><source src="a.mp4" /></video>"#
        );
    }

    #[test]
    fn ignores_duplicate_and_empty_classes() {
        let el = Element::new("div").class("a  b").class("").class("a");

        assert_eq!(el.classes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn queries_tree() {
        let node: Node = Element::new("ul")
            .child(Element::new("li").class("item").text("one"))
            .child(Element::new("li").class("item").text("two"))
            .child(Node::Raw {
                html: "<b>three</b>".to_string(),
                text: "three".to_string(),
            })
            .into();

        assert_eq!(node.find_all_by_class("item").len(), 2);
        assert_eq!(node.find_by_tag("li").unwrap().text_content(), "one");
        assert_eq!(node.text_content(), "onetwothree");
        assert!(node.find_by_tag("b").is_none());
        assert!(node.find_by_class("missing").is_none());
    }

    #[test]
    fn serializes_to_json_tree() {
        let node: Node = Element::new("p").text("hi").into();

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["kind"], "element");
        assert_eq!(json["value"]["tag"], "p");
        assert_eq!(json["value"]["children"][0]["kind"], "text");
    }
}
