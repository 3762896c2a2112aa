//! Defines the parsed form of a path expression.

use std::fmt;

/// A parsed path: the ordered steps applied left to right, each one consuming
/// the node set produced by the previous step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationPath {
    pub steps: Vec<Step>,
}

impl LocationPath {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// True for paths like `` or `/`, which select the root itself.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A single segment of a path, like `//li[2]` or `/span[@class='a']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub node_test: NodeTest,
    /// True when the step searches all descendants (`//`), false for direct children.
    pub recursive: bool,
    pub predicate: Option<Predicate>,
}

impl Step {
    /// A direct-child step without a predicate.
    pub fn child(node_test: NodeTest) -> Self {
        Self {
            node_test,
            recursive: false,
            predicate: None,
        }
    }

    /// A descendant step without a predicate.
    pub fn descendant(node_test: NodeTest) -> Self {
        Self {
            node_test,
            recursive: true,
            predicate: None,
        }
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// The 1-based position filter of this step, if any.
    pub fn index(&self) -> Option<i64> {
        match self.predicate {
            Some(Predicate::Index(n)) => Some(n),
            _ => None,
        }
    }
}

/// The tag test applied to candidate nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    /// A literal tag name, compared exactly.
    Name(String),
    /// `*`: any element, never a text node.
    Wildcard,
}

impl NodeTest {
    pub fn name(name: impl Into<String>) -> Self {
        NodeTest::Name(name.into())
    }
}

/// The single bracketed filter a step may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[@key='value']`: exact, case-sensitive attribute equality.
    Attribute { key: String, value: String },
    /// `[N]`: 1-based position within each parent's own matches.
    Index(i64),
}

impl fmt::Display for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Name(name) => f.write_str(name),
            NodeTest::Wildcard => f.write_str("*"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Attribute { key, value } if value.contains('\'') => {
                write!(f, "[@{}=\"{}\"]", key, value)
            }
            Predicate::Attribute { key, value } => write!(f, "[@{}='{}']", key, value),
            Predicate::Index(n) => write!(f, "[{}]", n),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.recursive { "//" } else { "/" })?;
        write!(f, "{}", self.node_test)?;
        if let Some(predicate) = &self.predicate {
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}

impl fmt::Display for LocationPath {
    /// Writes the canonical form of the path; the empty path renders as `/`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
