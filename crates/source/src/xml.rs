// XML document source implementation using roxmltree
use crate::render::RenderNode;
use log::debug;
use roxmltree::{Node, ParsingOptions};
use std::borrow::Cow;
use xp_path::QueryNode;

/// Wrapper around `roxmltree::Document` exposing its nodes to the path engine.
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> XmlDocument<'input> {
    /// Parses `text` as XML. A DTD is allowed so XHTML with a doctype parses.
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        debug!(
            "Parsed XML document: {} bytes, {} nodes",
            text.len(),
            doc.descendants().count()
        );
        Ok(Self { doc })
    }

    /// The document node. It has no tag, so `/html` selects the root element.
    pub fn root_node(&self) -> XmlNode<'_, 'input> {
        XmlNode(self.doc.root())
    }

    pub fn input_text(&self) -> &'input str {
        self.doc.input_text()
    }
}

/// A handle to an element, text or document node of an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XmlNode<'a, 'input>(Node<'a, 'input>);

impl<'a, 'input> XmlNode<'a, 'input> {
    /// The exact source text this node was parsed from.
    pub fn source_text(&self) -> &'input str {
        &self.0.document().input_text()[self.0.range()]
    }
}

/// Only elements and text are structurally significant; comments, processing
/// instructions and the doctype never reach the engine.
fn is_queryable(node: &Node<'_, '_>) -> bool {
    node.is_element() || node.is_text()
}

impl<'a> QueryNode<'a> for XmlNode<'a, 'a> {
    fn tag(&self) -> Option<&'a str> {
        self.0.is_element().then(|| self.0.tag_name().name())
    }

    fn attr(&self, key: &str) -> Option<&'a str> {
        self.0.attribute(key)
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        Box::new(self.0.children().filter(is_queryable).map(XmlNode))
    }

    fn text(&self) -> Option<&'a str> {
        if self.0.is_text() { self.0.text() } else { None }
    }
}

impl<'a> RenderNode<'a> for XmlNode<'a, 'a> {
    fn markup(&self) -> Cow<'a, str> {
        Cow::Borrowed(self.source_text())
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a> {
        Box::new(self.0.attributes().map(|attr| (attr.name(), attr.value())))
    }
}
