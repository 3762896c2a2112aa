//! Defines the capability set a tree must expose to be queried.

/// The contract for a node in a read-only, hierarchical document.
///
/// The engine is written exclusively against this trait, so any tree (an XML
/// document, an HTML DOM, a synthetic test tree) can be queried once it is
/// wrapped by an adapter implementing these four operations.
///
/// `'a` is the lifetime of the underlying tree. Nodes are cheap handles into
/// it; the engine copies and forwards them but never mutates the tree.
pub trait QueryNode<'a>: std::fmt::Debug + Clone + Copy + PartialEq {
    /// The element name (e.g. `div`). `None` for text nodes and for a
    /// document root that is not itself an element.
    fn tag(&self) -> Option<&'a str>;

    /// The value of the named attribute, or `None` if it is not present.
    fn attr(&self, key: &str) -> Option<&'a str>;

    /// The child nodes, in document order.
    ///
    /// Adapters yield only elements and text; comments, doctype markers and
    /// processing instructions must be filtered out before the engine sees
    /// them, since they would otherwise shift positional predicates.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// The content of a text leaf. `None` for elements.
    fn text(&self) -> Option<&'a str>;
}

/// Concatenates the text of every text node in the subtree of `node`,
/// in document order.
pub fn text_content<'a, N: QueryNode<'a>>(node: N) -> String {
    let mut out = String::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if let Some(text) = current.text() {
            out.push_str(text);
        }
        let children: Vec<N> = current.children().collect();
        stack.extend(children.into_iter().rev());
    }
    out
}

// Test utilities - publicly available for integration testing in downstream crates
pub mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct MockNodeData {
        tag: Option<String>,
        attrs: Vec<(String, String)>,
        text: Option<String>,
        children: Vec<usize>,
    }

    /// An in-memory tree addressed by node id. Id `0` is a tagless document root.
    #[derive(Debug)]
    pub struct MockTree {
        nodes: Vec<MockNodeData>,
    }

    impl Default for MockTree {
        fn default() -> Self {
            Self::new()
        }
    }

    /// A handle to a node of a [`MockTree`]. Holds a reference to its tree so
    /// it can navigate to its own children.
    #[derive(Debug, Clone, Copy)]
    pub struct MockNode<'a> {
        pub id: usize,
        pub tree: &'a MockTree,
    }

    impl<'a> PartialEq for MockNode<'a> {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id && std::ptr::eq(self.tree, other.tree)
        }
    }

    impl MockTree {
        pub fn new() -> Self {
            Self {
                nodes: vec![MockNodeData::default()],
            }
        }

        pub fn root(&self) -> MockNode<'_> {
            self.node(0)
        }

        pub fn node(&self, id: usize) -> MockNode<'_> {
            MockNode { id, tree: self }
        }

        /// Appends an element under `parent` and returns its id.
        pub fn element(&mut self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
            self.push(
                parent,
                MockNodeData {
                    tag: Some(tag.to_string()),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                    ..Default::default()
                },
            )
        }

        /// Appends a text leaf under `parent` and returns its id.
        pub fn text(&mut self, parent: usize, content: &str) -> usize {
            self.push(
                parent,
                MockNodeData {
                    text: Some(content.to_string()),
                    ..Default::default()
                },
            )
        }

        fn push(&mut self, parent: usize, data: MockNodeData) -> usize {
            let id = self.nodes.len();
            self.nodes.push(data);
            self.nodes[parent].children.push(id);
            id
        }
    }

    impl<'a> QueryNode<'a> for MockNode<'a> {
        fn tag(&self) -> Option<&'a str> {
            let tree = self.tree;
            tree.nodes[self.id].tag.as_deref()
        }

        fn attr(&self, key: &str) -> Option<&'a str> {
            let tree = self.tree;
            tree.nodes[self.id]
                .attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }

        fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            let tree = self.tree; // Re-borrow to help the lifetime checker
            Box::new(
                tree.nodes[self.id]
                    .children
                    .iter()
                    .map(move |&id| MockNode { id, tree }),
            )
        }

        fn text(&self) -> Option<&'a str> {
            let tree = self.tree;
            tree.nodes[self.id].text.as_deref()
        }
    }

    /// Creates the reference tree used across the engine tests:
    /// ```text
    /// (root)                          id 0
    ///   div id=1                      id 1
    ///     span class=a  "Text A"      id 2, text 3
    ///     span class=b  "Text B"      id 4, text 5
    ///   div id=2                      id 6
    ///     p                           id 7
    ///       span class=a  "Text C"    id 8, text 9
    ///   ul id=u1                      id 10
    ///     li id=l1  "1"               id 11, text 12
    ///     li id=l2  "2"               id 13, text 14
    ///   ul id=u2                      id 15
    ///     li id=l3  "3"               id 16, text 17
    ///     li id=l4  "4"               id 18, text 19
    /// ```
    pub fn create_test_tree() -> MockTree {
        let mut tree = MockTree::new();

        let div1 = tree.element(0, "div", &[("id", "1")]);
        let span_a = tree.element(div1, "span", &[("class", "a")]);
        tree.text(span_a, "Text A");
        let span_b = tree.element(div1, "span", &[("class", "b")]);
        tree.text(span_b, "Text B");

        let div2 = tree.element(0, "div", &[("id", "2")]);
        let p = tree.element(div2, "p", &[]);
        let span_c = tree.element(p, "span", &[("class", "a")]);
        tree.text(span_c, "Text C");

        let lists = [
            ("u1", [("l1", "1"), ("l2", "2")]),
            ("u2", [("l3", "3"), ("l4", "4")]),
        ];
        for (ul_id, items) in lists {
            let ul = tree.element(0, "ul", &[("id", ul_id)]);
            for (li_id, content) in items {
                let li = tree.element(ul, "li", &[("id", li_id)]);
                tree.text(li, content);
            }
        }

        tree
    }

}
