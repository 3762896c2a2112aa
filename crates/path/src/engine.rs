//! The evaluation engine for applying a parsed path to a generic `QueryNode` tree.
//!
//! Evaluation is a fold over the steps: the current set starts as `[root]`
//! and every step replaces it with the matches found under each of its nodes.

use crate::ast::{LocationPath, NodeTest, Predicate, Step};
use crate::error::PathError;
use crate::node::QueryNode;
use crate::parser::parse_path;
use log::{debug, trace};

/// Parses `path` and evaluates it against `root`.
///
/// A path that fails to parse is reported before any node is visited.
pub fn query<'a, N>(root: N, path: &str) -> Result<Vec<N>, PathError>
where
    N: QueryNode<'a> + 'a,
{
    let location_path = parse_path(path)?;
    debug!("Parsed '{}' as {}", path, location_path);
    Ok(location_path.select(root))
}

impl LocationPath {
    /// Evaluates this path against `root`, returning matches in traversal order.
    pub fn select<'a, N>(&self, root: N) -> Vec<N>
    where
        N: QueryNode<'a> + 'a,
    {
        evaluate(root, &self.steps)
    }
}

/// Applies `steps` in order, starting from the single-node set `[root]`.
///
/// Results are never reordered or deduplicated. An empty intermediate set
/// ends evaluation early.
pub fn evaluate<'a, N>(root: N, steps: &[Step]) -> Vec<N>
where
    N: QueryNode<'a> + 'a,
{
    let mut current_nodes = vec![root];
    for (i, step) in steps.iter().enumerate() {
        current_nodes = evaluate_step(step, &current_nodes);
        trace!(
            "Step {} '{}' selected {} node(s)",
            i + 1,
            step,
            current_nodes.len()
        );
        if current_nodes.is_empty() {
            debug!(
                "Step {} '{}' matched nothing, skipping {} remaining step(s)",
                i + 1,
                step,
                steps.len() - i - 1
            );
            break;
        }
    }
    current_nodes
}

/// Evaluates one step against every node of the current set.
///
/// The index predicate is applied to each context node's own matches, so
/// `//ul/li[1]` yields the first `li` of every `ul`. A zero or negative
/// index is no filter at all.
fn evaluate_step<'a, N>(step: &Step, context_nodes: &[N]) -> Vec<N>
where
    N: QueryNode<'a> + 'a,
{
    let mut next_nodes = Vec::new();
    let mut local_matches = Vec::new();

    for &node in context_nodes {
        local_matches.clear();
        if step.recursive {
            collect_descendant_matches(node, step, &mut local_matches);
        } else {
            collect_child_matches(node, step, &mut local_matches);
        }

        match step.index().filter(|&position| position > 0) {
            Some(position) => next_nodes.extend(select_position(&local_matches, position)),
            None => next_nodes.extend_from_slice(&local_matches),
        }
    }
    next_nodes
}

fn collect_child_matches<'a, N>(node: N, step: &Step, results: &mut Vec<N>)
where
    N: QueryNode<'a> + 'a,
{
    results.extend(node.children().filter(|child| matches_step(child, step)));
}

/// Collects matching descendants of `node` in pre-order: each child is
/// tested, then its subtree, before moving on to the next sibling.
fn collect_descendant_matches<'a, N>(node: N, step: &Step, results: &mut Vec<N>)
where
    N: QueryNode<'a> + 'a,
{
    let mut stack: Vec<N> = node.children().collect();
    stack.reverse();
    while let Some(current) = stack.pop() {
        if matches_step(&current, step) {
            results.push(current);
        }
        let mark = stack.len();
        stack.extend(current.children());
        stack[mark..].reverse();
    }
}

/// The match at 1-based `position`, if there is one.
fn select_position<N: Copy>(matches: &[N], position: i64) -> Option<N> {
    usize::try_from(position)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|i| matches.get(i))
        .copied()
}

/// Tests a candidate node against the tag and attribute parts of a step.
///
/// The wildcard only matches nodes with a non-empty tag, which excludes text.
pub fn matches_step<'a, N: QueryNode<'a>>(node: &N, step: &Step) -> bool {
    let tag_matches = match &step.node_test {
        NodeTest::Wildcard => node.tag().is_some_and(|tag| !tag.is_empty()),
        NodeTest::Name(name) => node.tag() == Some(name.as_str()),
    };
    if !tag_matches {
        return false;
    }

    match &step.predicate {
        Some(Predicate::Attribute { key, value }) => node.attr(key) == Some(value.as_str()),
        Some(Predicate::Index(_)) | None => true,
    }
}
