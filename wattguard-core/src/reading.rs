//! Sensor readings
//!
//! A [`Reading`] is one timestamped multi-sensor sample. It is the only input
//! shape the core accepts: the sensor collaborator creates it, the history
//! store owns it afterwards, and nothing mutates it once recorded.
//!
//! ## Wire shape
//!
//! ```json
//! {"timestamp":"2023-01-01T12:00:00","power":250.0,"temperature":22.0,"humidity":60.0,"light":500.0}
//! ```
//!
//! The original log column names (`PowerSensor`, `TemperatureSensor`,
//! `HumiditySensor`, `LightSensor`) are accepted as aliases. Every field is
//! required.

use serde::{Deserialize, Serialize};

use crate::errors::{MonitorError, MonitorResult};
use crate::time;

/// One sensor sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// ISO-8601 capture time
    pub timestamp: String,

    /// Active power draw in Watts
    #[serde(alias = "PowerSensor")]
    pub power: f64,

    /// Room temperature in °C
    #[serde(alias = "TemperatureSensor")]
    pub temperature: f64,

    /// Relative humidity in %
    #[serde(alias = "HumiditySensor")]
    pub humidity: f64,

    /// Illuminance in lux
    #[serde(alias = "LightSensor")]
    pub light: f64,
}

impl Reading {
    /// Reading from its raw values
    pub fn new(
        timestamp: impl Into<String>,
        power: f64,
        temperature: f64,
        humidity: f64,
        light: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            power,
            temperature,
            humidity,
            light,
        }
    }

    /// Parse a reading from JSON, failing fast on missing or non-finite fields.
    pub fn from_json(json: &str) -> MonitorResult<Self> {
        let reading: Reading =
            serde_json::from_str(json).map_err(|e| MonitorError::malformed(e.to_string()))?;
        reading.validate()?;
        Ok(reading)
    }

    /// Check that every numeric field is a real number.
    pub fn validate(&self) -> MonitorResult<()> {
        let fields = [
            ("power", self.power),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("light", self.light),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(MonitorError::malformed(format!("{name} is not a finite number")));
            }
        }

        Ok(())
    }

    /// Hour of day of the capture time, if the timestamp parses.
    pub fn hour_of_day(&self) -> Option<u32> {
        time::hour_of_day(&self.timestamp)
    }
}
