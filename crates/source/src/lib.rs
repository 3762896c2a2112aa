//! Document sources for the path engine.
//!
//! This crate wraps concrete parsers behind the `QueryNode` trait so the
//! engine never depends on them directly, and turns matched nodes back into
//! text for display. Well-formed XML goes through `roxmltree`; HTML, including
//! tag soup with unclosed elements, goes through `scraper`.
//!
//! ## Example
//!
//! ```
//! use xp_source::{RenderMode, XmlDocument, render};
//!
//! let doc = XmlDocument::parse("<ul><li>a</li><li>b</li></ul>").unwrap();
//! let items = xp_path::query(doc.root_node(), "/ul/li[2]").unwrap();
//! assert_eq!(render(&items[0], RenderMode::Markup), "<li>b</li>");
//! ```

pub mod html;
pub mod render;
pub mod xml;

pub use html::{HtmlDocument, HtmlNode};
pub use render::{RenderMode, RenderNode, render};
pub use xml::{XmlDocument, XmlNode};
