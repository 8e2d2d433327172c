//! Classifier contract for automatic ML control
//!
//! The trained model lives outside the core. All the ML strategy needs is:
//!
//! ```text
//! Reading ──▶ FeatureVector ──predict──▶ encoded label ──decode──▶ LoadLevel
//!            [power, temp,               (usize)                   low | normal
//!             humidity, light, hour]                               high | abnormal
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClassifierError;
use crate::reading::Reading;

/// Number of model input features.
pub const FEATURE_COUNT: usize = 5;

/// Consumption level predicted for a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    /// Light load
    Low,
    /// Typical load
    Normal,
    /// Heavy load
    High,
    /// Outside the expected envelope
    Abnormal,
}

impl LoadLevel {
    /// Every level, in encoder order
    pub const ALL: [LoadLevel; 4] = [
        LoadLevel::Low,
        LoadLevel::Normal,
        LoadLevel::High,
        LoadLevel::Abnormal,
    ];

    /// Lowercase level name
    pub const fn name(&self) -> &'static str {
        match self {
            LoadLevel::Low => "low",
            LoadLevel::Normal => "normal",
            LoadLevel::High => "high",
            LoadLevel::Abnormal => "abnormal",
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LoadLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown load level '{wanted}'"))
    }
}

/// Model input derived from one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Power draw, in Watts
    pub power: f64,
    /// Temperature, in °C
    pub temperature: f64,
    /// Relative humidity, in percent
    pub humidity: f64,
    /// Ambient light, in lux
    pub light: f64,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl FeatureVector {
    /// Build features, failing when the timestamp has no readable hour or a
    /// value is not finite.
    pub fn from_reading(reading: &Reading) -> Result<Self, ClassifierError> {
        reading.validate().map_err(|e| ClassifierError::Features { reason: e.to_string() })?;

        let hour = reading.hour_of_day().ok_or_else(|| ClassifierError::Features {
            reason: format!("unparsable timestamp '{}'", reading.timestamp),
        })?;

        Ok(Self {
            power: reading.power,
            temperature: reading.temperature,
            humidity: reading.humidity,
            light: reading.light,
            hour,
        })
    }

    /// Features in model column order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [self.power, self.temperature, self.humidity, self.light, f64::from(self.hour)]
    }
}

/// Trained model producing an encoded label
pub trait PowerClassifier {
    /// Encoded load label for `features`
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError>;
}

/// Maps encoded labels back to load levels
pub trait LabelDecoder {
    /// Load level named by an encoded label
    fn decode(&self, encoded: usize) -> Result<LoadLevel, ClassifierError>;
}
