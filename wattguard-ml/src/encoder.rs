//! Label encoder
//!
//! Maps class names to the dense indices a model predicts. Classes are kept
//! sorted and unique, so `fit(["normal", "low", "high", "low"])` yields
//! `["high", "low", "normal"]` and `"low"` encodes to `1`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wattguard_core::{ClassifierError, LabelDecoder, LoadLevel};

use crate::{MLError, MLResult};

#[derive(Deserialize)]
struct RawEncoder {
    classes: Vec<String>,
}

/// Sorted class names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEncoder")]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl TryFrom<RawEncoder> for LabelEncoder {
    type Error = MLError;

    fn try_from(raw: RawEncoder) -> MLResult<Self> {
        if raw.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(MLError::invalid("encoder classes must be sorted and unique"));
        }
        Ok(Self { classes: raw.classes })
    }
}

impl LabelEncoder {
    /// Learn the sorted set of distinct labels.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Class names, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// `true` without classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Encoded label of a class name
    pub fn transform(&self, label: &str) -> MLResult<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| MLError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Class name of an encoded label
    pub fn inverse_transform(&self, encoded: usize) -> MLResult<&str> {
        self.classes
            .get(encoded)
            .map(String::as_str)
            .ok_or_else(|| MLError::UnknownLabel {
                label: format!("#{encoded}"),
            })
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, encoded: usize) -> Result<LoadLevel, ClassifierError> {
        self.inverse_transform(encoded)
            .ok()
            .and_then(|name| name.parse().ok())
            .ok_or(ClassifierError::UnknownLabel { encoded })
    }
}
