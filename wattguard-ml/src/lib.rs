//! Decision-forest load classifier for WattGuard
//!
//! ## Overview
//!
//! Automatic ML control in `wattguard-core` only knows a classifier contract:
//! features in, encoded label out, label decoded to a load level. This crate
//! provides the model behind that contract: a random forest exported from
//! training as plain JSON, plus the label encoder that names its classes.
//!
//! ## Model Format
//!
//! ```json
//! {
//!   "forest": {"trees": [{"nodes": [
//!     {"feature": 0, "threshold": 150.0, "left": 1, "right": 2},
//!     {"class": 1},
//!     {"class": 2}
//!   ]}]},
//!   "encoder": {"classes": ["abnormal", "high", "low", "normal"]}
//! }
//! ```
//!
//! Features are `[power, temperature, humidity, light, hour]`. A split sends
//! `x[feature] <= threshold` left. Encoder classes are sorted, so the encoded
//! label of a class is its position in that list.
//!
//! ## Validation
//!
//! Everything is checked when the model is loaded, not when it predicts:
//!
//! 1. **Trees**: non-empty, child indices in range, no node reached twice
//! 2. **Forest**: at least one tree
//! 3. **Encoder**: class names sorted and unique
//! 4. **Bundle**: every leaf class has a name
//!
//! ## Usage
//!
//! ```rust
//! use wattguard_core::{ControlContext, ControlStrategy, Reading, Strategy};
//! use wattguard_ml::ModelBundle;
//!
//! let bundle = ModelBundle::from_json(r#"{
//!     "forest": {"trees": [{"nodes": [{"class": 0}]}]},
//!     "encoder": {"classes": ["low"]}
//! }"#)?;
//!
//! let context = ControlContext::new(Strategy::from(bundle.into_strategy()));
//! let reading = Reading::new("2023-01-01T09:00:00", 120.0, 21.0, 58.0, 450.0);
//! assert!(context.execute_control(&reading).contains("low"));
//! # Ok::<(), wattguard_ml::MLError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;
use wattguard_core::ClassifierError;

pub mod encoder;
pub mod forest;
pub mod model;
pub mod node;
pub mod tree;

pub use encoder::LabelEncoder;
pub use forest::RandomForest;
pub use model::ModelBundle;
pub use node::{Node, Step};
pub use tree::DecisionTree;

/// Result type for model operations
pub type MLResult<T> = Result<T, MLError>;

/// Errors raised while loading or running a model
#[derive(Error, Debug)]
pub enum MLError {
    /// Model structure is inconsistent
    #[error("Invalid model: {reason}")]
    InvalidModel {
        /// What is inconsistent
        reason: String,
    },

    /// Split refers to a feature the input does not have
    #[error("Feature {index} out of range for {len} features")]
    InvalidFeature {
        /// Feature index named by the split
        index: usize,
        /// Number of features supplied
        len: usize,
    },

    /// Class name or index unknown to the encoder
    #[error("Unknown label '{label}'")]
    UnknownLabel {
        /// The unknown name or index
        label: String,
    },

    /// Forest has no trees
    #[error("Forest has no trees")]
    EmptyForest,

    /// Model JSON could not be parsed
    #[error("Model parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Model file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MLError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidModel { reason: reason.into() }
    }
}

impl From<MLError> for ClassifierError {
    fn from(e: MLError) -> Self {
        match e {
            MLError::InvalidFeature { .. } => ClassifierError::Features { reason: e.to_string() },
            other => ClassifierError::Prediction { reason: other.to_string() },
        }
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
