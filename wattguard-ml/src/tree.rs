//! Decision tree
//!
//! Trees are stored as a flat node array with the root at index 0. A tree is
//! validated once when built or deserialized, so prediction only has to walk
//! it:
//!
//! ```text
//!        [0] power <= 150
//!        /            \
//!   [1] class 2    [2] power <= 500
//!                   /           \
//!             [3] class 3    [4] class 1
//! ```

use serde::{Deserialize, Serialize};

use crate::node::{Node, Step};
use crate::{MLError, MLResult};

#[derive(Deserialize)]
struct RawTree {
    nodes: Vec<Node>,
}

/// Validated decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTree")]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl TryFrom<RawTree> for DecisionTree {
    type Error = MLError;

    fn try_from(raw: RawTree) -> MLResult<Self> {
        Self::new(raw.nodes)
    }
}

impl DecisionTree {
    /// Build a tree, rejecting empty node lists, dangling child indices,
    /// non-finite thresholds and nodes reachable along more than one path.
    pub fn new(nodes: Vec<Node>) -> MLResult<Self> {
        if nodes.is_empty() {
            return Err(MLError::invalid("tree has no nodes"));
        }

        let mut seen = vec![false; nodes.len()];
        let mut pending = vec![0usize];
        seen[0] = true;

        while let Some(index) = pending.pop() {
            let node = &nodes[index];
            if let Node::Split { threshold, .. } = node {
                if !threshold.is_finite() {
                    return Err(MLError::invalid(format!(
                        "node {index} has non-finite threshold"
                    )));
                }
            }

            for child in node.children() {
                let Some(visited) = seen.get_mut(child) else {
                    return Err(MLError::invalid(format!(
                        "node {index} points to missing node {child}"
                    )));
                };
                if *visited {
                    return Err(MLError::invalid(format!(
                        "node {child} is reached more than once"
                    )));
                }
                *visited = true;
                pending.push(child);
            }
        }

        Ok(Self { nodes })
    }

    /// Nodes in storage order, root first
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Highest leaf class, used to size vote tables.
    pub fn max_class(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Leaf { class } => Some(*class),
                Node::Split { .. } => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Encoded class for `features`.
    pub fn predict(&self, features: &[f64]) -> MLResult<usize> {
        let mut index = 0;
        // A validated tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..self.nodes.len() {
            match self.nodes[index].step(features)? {
                Step::Class(class) => return Ok(class),
                Step::Next(next) => index = next,
            }
        }
        Err(MLError::invalid("traversal did not reach a leaf"))
    }
}
