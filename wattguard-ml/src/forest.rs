//! Random forest classifier
//!
//! Each tree votes for one encoded class; the class with the most votes wins
//! and ties go to the lowest class index.

use serde::{Deserialize, Serialize};
use wattguard_core::{ClassifierError, FeatureVector, PowerClassifier};

use crate::tree::DecisionTree;
use crate::{MLError, MLResult};

#[derive(Deserialize)]
struct RawForest {
    trees: Vec<DecisionTree>,
}

/// Majority-vote ensemble of decision trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForest")]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    #[serde(skip)]
    n_classes: usize,
}

impl TryFrom<RawForest> for RandomForest {
    type Error = MLError;

    fn try_from(raw: RawForest) -> MLResult<Self> {
        Self::new(raw.trees)
    }
}

impl RandomForest {
    /// Forest over `trees`. Fails for an empty forest.
    pub fn new(trees: Vec<DecisionTree>) -> MLResult<Self> {
        if trees.is_empty() {
            return Err(MLError::EmptyForest);
        }
        let n_classes = trees.iter().map(DecisionTree::max_class).max().unwrap_or(0) + 1;
        Ok(Self { trees, n_classes })
    }

    /// Member trees
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Number of classes any leaf can produce.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Votes per class for `features`.
    pub fn votes(&self, features: &[f64]) -> MLResult<Vec<usize>> {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(features)?] += 1;
        }
        Ok(votes)
    }

    /// Encoded class with the most votes.
    pub fn predict(&self, features: &[f64]) -> MLResult<usize> {
        let votes = self.votes(features)?;
        let mut best = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = class;
            }
        }
        log::debug!("Forest votes {:?} -> class {}", votes, best);
        Ok(best)
    }
}

impl PowerClassifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
        RandomForest::predict(self, &features.to_array()).map_err(ClassifierError::from)
    }
}
