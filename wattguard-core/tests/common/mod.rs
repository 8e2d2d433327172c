//! Shared fixtures for the integration tests
//!
//! - reading builders with hourly timestamps
//! - load scenarios shaped like a working day
//! - an observer that records the order it was called in
//! - an observer that holds its first call until released

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use wattguard_core::{
    ClassifierError, FeatureVector, HistorySnapshot, LabelDecoder, LoadLevel, PowerClassifier,
    Reading, ReadingObserver,
};

/// Reading at `hour:00` on 2023-01-01 with typical indoor conditions
pub fn reading_at(hour: u32, power: f64) -> Reading {
    Reading::new(
        format!("2023-01-01T{:02}:00:00", hour % 24),
        power,
        18.0 + power / 25.0,
        60.0 - power / 50.0,
        if (7..=18).contains(&(hour % 24)) { 550.0 } else { 20.0 },
    )
}

/// One reading per hour starting at midnight
pub fn hourly(powers: &[f64]) -> Vec<Reading> {
    powers
        .iter()
        .enumerate()
        .map(|(hour, &power)| reading_at(hour as u32, power))
        .collect()
}

/// Load scenarios
pub struct Scenarios;

impl Scenarios {
    /// Quiet night, morning ramp, busy afternoon, evening fall-off
    pub fn office_day() -> Vec<f64> {
        vec![
            120.0, 115.0, 110.0, 110.0, 115.0, 130.0, 180.0, 260.0, 340.0, 390.0, 420.0, 440.0,
            460.0, 470.0, 480.0, 465.0, 430.0, 380.0, 300.0, 230.0, 180.0, 150.0, 130.0, 125.0,
        ]
    }

    /// Steady load with isolated surges
    pub fn surges() -> Vec<f64> {
        vec![
            200.0, 210.0, 650.0, 205.0, 200.0, 215.0, 640.0, 210.0, 205.0, 200.0, 700.0, 210.0,
        ]
    }

    /// Load rising every hour
    pub fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|i| 150.0 + 25.0 * i as f64).collect()
    }
}

/// Observer that records which observer saw which reading, in call order
pub struct OrderRecorder {
    pub name: &'static str,
    pub calls: Arc<Mutex<Vec<(&'static str, f64)>>>,
}

impl ReadingObserver for OrderRecorder {
    fn on_reading(&self, reading: &Reading, _history: &HistorySnapshot) {
        self.calls.lock().unwrap().push((self.name, reading.power));
    }
}

/// Observer that parks the first notifying thread until [`Gate::open`]
pub struct Gate {
    armed: AtomicBool,
    entered: Barrier,
    released: Barrier,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            armed: AtomicBool::new(true),
            entered: Barrier::new(2),
            released: Barrier::new(2),
        }
    }

    /// Block until a thread is parked in the gate.
    pub fn wait_entered(&self) {
        self.entered.wait();
    }

    /// Let the parked thread continue.
    pub fn open(&self) {
        self.released.wait();
    }
}

impl ReadingObserver for Gate {
    fn on_reading(&self, _reading: &Reading, _history: &HistorySnapshot) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.wait();
            self.released.wait();
        }
    }
}

/// Classifier that always predicts the same encoded label
pub struct ConstantClassifier(pub usize);

impl PowerClassifier for ConstantClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<usize, ClassifierError> {
        Ok(self.0)
    }
}

/// Decoder using the declaration order of [`LoadLevel`]
pub struct OrdinalDecoder;

impl LabelDecoder for OrdinalDecoder {
    fn decode(&self, encoded: usize) -> Result<LoadLevel, ClassifierError> {
        LoadLevel::ALL
            .get(encoded)
            .copied()
            .ok_or(ClassifierError::UnknownLabel { encoded })
    }
}
