//! Renderable tree description and its HTML serialization.
//!
//! The pipeline produces `Node`s; whatever hosts the block commits them.

const VOID_ELEMENTS: [&str; 4] = ["br", "img", "source", "hr"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Pre-existing markup passed through verbatim (authored placeholder content).
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(raw) => out.push_str(raw),
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(el) => el.text_content(),
            Node::Text(text) => text.clone(),
            Node::Raw(_) => String::new(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an existing value of the same name.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Depth-first list of descendant elements carrying `class`.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_matching(&mut found, &|el: &Element| el.has_class(class));
        found
    }

    /// Depth-first list of descendant elements with the given tag name.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_matching(&mut found, &|el: &Element| el.tag == tag);
        found
    }

    fn collect_matching<'a>(&'a self, found: &mut Vec<&'a Element>, pred: &dyn Fn(&Element) -> bool) {
        for child in &self.children {
            if let Node::Element(el) = child {
                if pred(el) {
                    found.push(el);
                }
                el.collect_matching(found, pred);
            }
        }
    }

    #[must_use]
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        write_attrs(out, &self.attrs);
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// The content container a block renders into.
///
/// Holds the block element's own attributes and its current children.
/// Rendering replaces the children wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Block {
    pub fn new(tag: impl Into<String>, attrs: Vec<(String, String)>, inner_html: impl Into<String>) -> Self {
        let inner_html = inner_html.into();
        let children = if inner_html.is_empty() {
            Vec::new()
        } else {
            vec![Node::Raw(inner_html)]
        };
        Self {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Drops all current content and installs `children` in its place.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    #[must_use]
    pub fn inner_html(&self) -> String {
        self.children.iter().map(Node::to_html).collect()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        write_attrs(&mut out, &self.attrs);
        out.push('>');
        out.push_str(&self.inner_html());
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

fn write_attrs(out: &mut String, attrs: &[(String, String)]) {
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements() {
        let el = Element::new("div")
            .with_class("card")
            .with_child(Element::new("h3").with_text("Shoe"));
        assert_eq!(el.to_html(), r#"<div class="card"><h3>Shoe</h3></div>"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let el = Element::new("p")
            .with_attr("title", r#"a "quoted" <tag>"#)
            .with_text("Tom & Jerry's <b>");
        assert_eq!(
            el.to_html(),
            "<p title=\"a &quot;quoted&quot; &lt;tag&gt;\">Tom &amp; Jerry&#39;s &lt;b&gt;</p>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let el = Element::new("img").with_attr("src", "/a.png").with_attr("alt", "");
        assert_eq!(el.to_html(), r#"<img src="/a.png" alt="">"#);
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let el = Element::new("a").with_attr("href", "/x").with_attr("href", "/y");
        assert_eq!(el.attr("href"), Some("/y"));
        assert_eq!(el.to_html(), r#"<a href="/y"></a>"#);
    }

    #[test]
    fn has_class_matches_whole_tokens() {
        let el = Element::new("div").with_class("product-card clickable");
        assert!(el.has_class("product-card"));
        assert!(el.has_class("clickable"));
        assert!(!el.has_class("product"));
    }

    #[test]
    fn find_by_class_walks_descendants() {
        let el = Element::new("div").with_child(
            Element::new("div")
                .with_class("x")
                .with_child(Element::new("span").with_class("x")),
        );
        assert_eq!(el.find_by_class("x").len(), 2);
        assert_eq!(el.find_by_tag("span").len(), 1);
    }

    #[test]
    fn raw_nodes_pass_through_unescaped() {
        assert_eq!(Node::Raw("<p>hi</p>".into()).to_html(), "<p>hi</p>");
        assert_eq!(Node::text("<p>").to_html(), "&lt;p&gt;");
    }

    #[test]
    fn block_replace_children_is_full_replace() {
        let mut block = Block::new(
            "div",
            vec![("class".into(), "product-list".into())],
            "<div><div>folder</div></div>",
        );
        assert_eq!(block.inner_html(), "<div><div>folder</div></div>");

        block.replace_children(vec![Element::new("p").with_text("one").into()]);
        block.replace_children(vec![Element::new("p").with_text("two").into()]);
        assert_eq!(
            block.to_html(),
            r#"<div class="product-list"><p>two</p></div>"#
        );
    }

    #[test]
    fn empty_block_has_no_children() {
        let block = Block::new("div", vec![], "");
        assert!(block.children().is_empty());
    }
}
