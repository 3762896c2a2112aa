//! A minimal path-query engine for tree-structured documents.
//!
//! Paths are a small XPath subset: `/tag` selects direct children, `//tag`
//! selects descendants, `*` matches any element, and a step may carry one
//! predicate, either `[@key='value']` or a 1-based `[N]` evaluated per parent.
//!
//! ```
//! use xp_path::{query, tests::create_test_tree};
//!
//! let tree = create_test_tree();
//! let items = query(tree.root(), "//ul/li[1]").unwrap();
//! assert_eq!(items.len(), 2);
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod node;
pub mod parser;

pub use ast::{LocationPath, NodeTest, Predicate, Step};
pub use engine::{evaluate, matches_step, query};
pub use error::PathError;
pub use node::{QueryNode, text_content};
pub use parser::parse_path;

// Re-export test utilities for integration testing in downstream crates
pub use node::tests;
