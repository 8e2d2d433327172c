//! Exported model bundle

use std::path::Path;

use serde::{Deserialize, Serialize};
use wattguard_core::AutomaticMl;

use crate::encoder::LabelEncoder;
use crate::forest::RandomForest;
use crate::{MLError, MLResult};

/// Forest plus the encoder naming its classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Trained classifier
    pub forest: RandomForest,
    /// Names of the classifier's labels
    pub encoder: LabelEncoder,
}

impl ModelBundle {
    /// Pair a forest with its encoder, checking every leaf class has a name.
    pub fn new(forest: RandomForest, encoder: LabelEncoder) -> MLResult<Self> {
        let bundle = Self { forest, encoder };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Parse and validate a bundle
    pub fn from_json(json: &str) -> MLResult<Self> {
        let bundle: ModelBundle = serde_json::from_str(json)?;
        bundle.validate()?;
        log::info!(
            "Loaded model with {} trees and classes {:?}",
            bundle.forest.trees().len(),
            bundle.encoder.classes()
        );
        Ok(bundle)
    }

    /// Read, parse and validate a bundle file
    pub fn from_file(path: impl AsRef<Path>) -> MLResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the bundle
    pub fn to_json(&self) -> MLResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> MLResult<()> {
        if self.forest.n_classes() > self.encoder.len() {
            return Err(MLError::invalid(format!(
                "forest predicts {} classes but encoder names {}",
                self.forest.n_classes(),
                self.encoder.len()
            )));
        }
        Ok(())
    }

    /// Automatic ML strategy driven by this model.
    pub fn into_strategy(self) -> AutomaticMl {
        AutomaticMl::with_model(self.forest, self.encoder)
    }
}
