//! Classifier-driven automatic control
//!
//! ```text
//!              ┌── model loaded ──▶ features ─▶ predict ─▶ decode ──┐
//! Reading ─────┤                        (any failure)               ├─▶ LoadLevel ─▶ directive
//!              └── no model ───────────▶ power bands ◀──────────────┘
//!                                       (non-finite power) ─▶ degraded directive
//! ```

use core::fmt;
use std::sync::Arc;

use crate::constants::control::{HIGH_BAND_MAX_W, LOW_BAND_MAX_W, NORMAL_BAND_MAX_W};
use crate::errors::ClassifierError;
use crate::reading::Reading;

use super::classifier::{FeatureVector, LabelDecoder, LoadLevel, PowerClassifier};
use super::ControlStrategy;

/// Directive when neither the model nor the bands can decide.
pub const DEGRADED_DIRECTIVE: &str = "Auto Control: Decision unavailable. Switch to manual control.";

/// Directive for a consumption level.
pub const fn level_directive(level: LoadLevel) -> &'static str {
    match level {
        LoadLevel::Low => {
            "Auto Control: Consumption level 'low'. Reduce power supply to idle circuits."
        }
        LoadLevel::Normal => "Auto Control: Consumption level 'normal'. Maintain current supply.",
        LoadLevel::High => "Auto Control: Consumption level 'high'. Shed non-essential loads.",
        LoadLevel::Abnormal => {
            "Auto Control: Consumption level 'abnormal'. Cut supply to affected circuits and inspect equipment."
        }
    }
}

/// Load level from power alone. `None` for non-finite power.
pub fn power_band(power: f64) -> Option<LoadLevel> {
    if !power.is_finite() {
        return None;
    }

    Some(if power < LOW_BAND_MAX_W {
        LoadLevel::Low
    } else if power < NORMAL_BAND_MAX_W {
        LoadLevel::Normal
    } else if power < HIGH_BAND_MAX_W {
        LoadLevel::High
    } else {
        LoadLevel::Abnormal
    })
}

#[derive(Clone)]
struct LoadModel {
    classifier: Arc<dyn PowerClassifier + Send + Sync>,
    decoder: Arc<dyn LabelDecoder + Send + Sync>,
}

/// Automatic strategy backed by an optional trained classifier
#[derive(Clone, Default)]
pub struct AutomaticMl {
    model: Option<LoadModel>,
}

impl AutomaticMl {
    /// Strategy deciding from power bands only.
    pub fn without_model() -> Self {
        Self::default()
    }

    /// Classify with a model, falling back to power bands when it fails.
    pub fn with_model<C, D>(classifier: C, decoder: D) -> Self
    where
        C: PowerClassifier + Send + Sync + 'static,
        D: LabelDecoder + Send + Sync + 'static,
    {
        Self {
            model: Some(LoadModel {
                classifier: Arc::new(classifier),
                decoder: Arc::new(decoder),
            }),
        }
    }

    /// `true` when a model is attached
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Load level for `reading`, or `None` when nothing can decide.
    pub fn load_level(&self, reading: &Reading) -> Option<LoadLevel> {
        if let Some(model) = &self.model {
            match Self::predict(model, reading) {
                Ok(level) => return Some(level),
                Err(e) => log::warn!("Classifier failed, falling back to power bands: {}", e),
            }
        }
        power_band(reading.power)
    }

    fn predict(model: &LoadModel, reading: &Reading) -> Result<LoadLevel, ClassifierError> {
        let features = FeatureVector::from_reading(reading)?;
        let encoded = model.classifier.predict(&features)?;
        model.decoder.decode(encoded)
    }
}

impl fmt::Debug for AutomaticMl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomaticMl")
            .field("has_model", &self.has_model())
            .finish()
    }
}

impl ControlStrategy for AutomaticMl {
    fn decide(&self, reading: &Reading) -> String {
        match self.load_level(reading) {
            Some(level) => level_directive(level).to_string(),
            None => DEGRADED_DIRECTIVE.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "automatic-ml"
    }
}
