//! Turns matched nodes back into text.

use std::borrow::Cow;
use xp_path::{QueryNode, text_content};

/// How a matched node is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The node as markup: its source text for XML, re-serialized for HTML.
    #[default]
    Markup,
    /// The concatenated text of the node's subtree.
    Text,
}

/// A queryable node that can also be written back out.
pub trait RenderNode<'a>: QueryNode<'a> {
    fn markup(&self) -> Cow<'a, str>;

    /// The attributes of an element as `(name, value)` pairs. Empty for
    /// text and document nodes.
    fn attributes(&self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;
}

pub fn render<'a, N: RenderNode<'a>>(node: &N, mode: RenderMode) -> String {
    match mode {
        RenderMode::Markup => node.markup().into_owned(),
        RenderMode::Text => text_content(*node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    const PAGE: &str = r#"<html>
  <body>
    <ul id="nav">
      <li><a href="/home">Home</a></li>
      <li><a href="/about">About <b>us</b></a></li>
    </ul>
  </body>
</html>"#;

    #[test]
    fn test_render_markup() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let links = xp_path::query(doc.root_node(), "//a").unwrap();
        let rendered: Vec<_> = links
            .iter()
            .map(|n| render(n, RenderMode::Markup))
            .collect();
        assert_eq!(
            rendered,
            vec![
                r#"<a href="/home">Home</a>"#,
                r#"<a href="/about">About <b>us</b></a>"#,
            ]
        );
    }

    #[test]
    fn test_render_text() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let links = xp_path::query(doc.root_node(), "//a[@href='/about']").unwrap();
        assert_eq!(render(&links[0], RenderMode::Text), "About us");
    }

    #[test]
    fn test_render_decodes_entities_in_text_mode() {
        let doc = XmlDocument::parse("<p>1 &lt; 2</p>").unwrap();
        let p = xp_path::query(doc.root_node(), "/p").unwrap();
        assert_eq!(render(&p[0], RenderMode::Text), "1 < 2");
        assert_eq!(render(&p[0], RenderMode::Markup), "<p>1 &lt; 2</p>");
    }

    #[test]
    fn test_whitespace_text_does_not_shift_indexes() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let second = xp_path::query(doc.root_node(), "//ul/li[2]/a").unwrap();
        assert_eq!(render(&second[0], RenderMode::Text), "About us");
    }
}
