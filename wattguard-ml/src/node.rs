//! Decision tree node
//!
//! Nodes live in a flat array and refer to their children by index. In JSON a
//! split carries `feature`, `threshold`, `left` and `right`; a leaf carries
//! only `class`.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult};

/// One node of a decision tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Internal node: `x[feature] <= threshold` continues at `left`
    Split {
        /// Index into the feature vector
        feature: usize,
        /// Split point
        threshold: f64,
        /// Child taken when `x[feature] <= threshold`
        left: usize,
        /// Child taken otherwise
        right: usize,
    },
    /// Terminal node holding an encoded class
    Leaf {
        /// Encoded class predicted by this leaf
        class: usize,
    },
}

/// Outcome of evaluating one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue at this node index
    Next(usize),
    /// Tree predicts this encoded class
    Class(usize),
}

impl Node {
    /// Create an internal node
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Node::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    /// Create a leaf
    pub fn leaf(class: usize) -> Self {
        Node::Leaf { class }
    }

    /// `true` for a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child indices, empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = usize> {
        let pair = match *self {
            Node::Split { left, right, .. } => Some([left, right]),
            Node::Leaf { .. } => None,
        };
        pair.into_iter().flatten()
    }

    /// Evaluate this node against `features`.
    pub fn step(&self, features: &[f64]) -> MLResult<Step> {
        match *self {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let value = features.get(feature).ok_or(MLError::InvalidFeature {
                    index: feature,
                    len: features.len(),
                })?;
                Ok(Step::Next(if *value <= threshold { left } else { right }))
            }
            Node::Leaf { class } => Ok(Step::Class(class)),
        }
    }
}
