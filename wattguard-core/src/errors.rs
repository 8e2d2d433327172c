//! Error Types for the Power Monitoring Core
//!
//! ## Error Categories
//!
//! The core distinguishes failures that callers must react to from conditions
//! that are part of normal operation:
//!
//! ### Precondition Violations (returned as `Err`)
//! - `InvalidThreshold`: an alert or control threshold that is zero, negative
//!   or not a number. Severity math divides by the threshold.
//! - `MalformedReading`: a reading with missing fields or non-finite values.
//! - `InvalidConfig`: a configuration that fails validation.
//!
//! ### Collaborator Failures (returned as `Err`)
//! - `Log`: the persistence log could not encode or decode a record.
//! - `Io`: file access failed.
//!
//! ### Not Errors
//! Too little history for an analysis is reported through
//! [`AnalysisOutcome::Insufficient`](crate::analysis::AnalysisOutcome), and a
//! failing control strategy still produces a directive. Neither surfaces here.
//!
//! ## Handling
//!
//! ```rust
//! use wattguard_core::{AnalysisEngine, MonitorError};
//!
//! match AnalysisEngine::new(0.0) {
//!     Ok(_) => unreachable!(),
//!     Err(MonitorError::InvalidThreshold { value }) => assert_eq!(value, 0.0),
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```

use thiserror::Error;

/// Result type for monitoring operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Errors raised by the monitoring core
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Threshold must be finite and strictly positive
    #[error("Threshold {value} must be finite and greater than zero")]
    InvalidThreshold {
        /// The rejected threshold
        value: f64,
    },

    /// Reading does not have the required shape
    #[error("Malformed reading: {reason}")]
    MalformedReading {
        /// What was wrong with the reading
        reason: String,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which setting was rejected and why
        reason: String,
    },

    /// Persistence log record could not be encoded or decoded
    #[error("Log record {line}: {source}")]
    Log {
        /// 1-based line number, 0 when writing
        line: usize,
        /// Underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MonitorError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedReading { reason: reason.into() }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}

/// Failures inside the classifier contract used by automatic ML control
///
/// These never leave the control layer: the ML strategy recovers from them
/// and still returns a directive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Feature vector could not be built from the reading
    #[error("Feature extraction failed: {reason}")]
    Features {
        /// What was missing or unparsable
        reason: String,
    },

    /// The model failed while predicting
    #[error("Prediction failed: {reason}")]
    Prediction {
        /// Model-specific failure description
        reason: String,
    },

    /// Encoded label has no known load level
    #[error("Unknown label {encoded}")]
    UnknownLabel {
        /// The encoded label returned by the model
        encoded: usize,
    },
}
