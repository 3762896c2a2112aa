// HTML document source implementation using scraper (html5ever)
use crate::render::RenderNode;
use ego_tree::NodeRef;
use log::debug;
use scraper::{ElementRef, Html, Node};
use std::borrow::Cow;
use xp_path::QueryNode;

/// A forgiving HTML parse of a document. Unclosed and misnested tags are
/// repaired the way a browser would, so parsing never fails.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(text: &str) -> Self {
        let html = Html::parse_document(text);
        debug!(
            "Parsed HTML document: {} bytes, {} nodes, {} parse error(s) recovered",
            text.len(),
            html.tree.nodes().count(),
            html.errors.len()
        );
        Self { html }
    }

    /// The document node. The parser always supplies `html`, `head` and
    /// `body` elements, so `/html/body` exists even for a bare fragment.
    pub fn root_node(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.tree.root())
    }
}

/// A handle to an element, text or document node of an [`HtmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HtmlNode<'a>(NodeRef<'a, Node>);

fn is_queryable(node: &NodeRef<'_, Node>) -> bool {
    matches!(node.value(), Node::Element(_) | Node::Text(_))
}

impl<'a> QueryNode<'a> for HtmlNode<'a> {
    fn tag(&self) -> Option<&'a str> {
        self.0.value().as_element().map(|element| element.name())
    }

    fn attr(&self, key: &str) -> Option<&'a str> {
        self.0.value().as_element().and_then(|element| element.attr(key))
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        Box::new(self.0.children().filter(is_queryable).map(HtmlNode))
    }

    fn text(&self) -> Option<&'a str> {
        self.0.value().as_text().map(|text| &**text)
    }
}

impl<'a> RenderNode<'a> for HtmlNode<'a> {
    /// Elements are re-serialized by the parser; text is escaped. The
    /// document node renders as its queryable children back to back.
    fn markup(&self) -> Cow<'a, str> {
        if let Some(element) = ElementRef::wrap(self.0) {
            return Cow::Owned(element.html());
        }
        match self.0.value() {
            Node::Text(text) => escape_text(text),
            _ => Cow::Owned(self.children().map(|child| child.markup()).collect()),
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a> {
        match self.0.value().as_element() {
            Some(element) => Box::new(element.attrs()),
            None => Box::new(std::iter::empty()),
        }
    }
}

fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
