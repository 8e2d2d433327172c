//! Reading observers
//!
//! Observers are told about every ingested reading, in subscription order,
//! together with the history snapshot taken right after the append.

use std::sync::{Mutex, PoisonError};

use crate::history::HistorySnapshot;
use crate::reading::Reading;
use crate::store::ReadingLog;

/// Receives every ingested reading
pub trait ReadingObserver: Send + Sync {
    /// Called once per ingested reading, with the history including it
    fn on_reading(&self, reading: &Reading, history: &HistorySnapshot);
}

/// Keeps the latest reading and history size for a live display
#[derive(Debug, Default)]
pub struct DashboardObserver {
    state: Mutex<DashboardState>,
}

/// What a dashboard shows between updates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Most recent reading
    pub latest: Option<Reading>,
    /// Readings in history
    pub history_len: usize,
    /// Updates received
    pub updates: u64,
}

impl DashboardObserver {
    /// Empty dashboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn state(&self) -> DashboardState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ReadingObserver for DashboardObserver {
    fn on_reading(&self, reading: &Reading, history: &HistorySnapshot) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.latest = Some(reading.clone());
        state.history_len = history.len();
        state.updates += 1;
    }
}

/// Writes every reading to a [`ReadingLog`]
///
/// Write failures are logged and do not interrupt ingestion.
#[derive(Debug)]
pub struct LogRecorder<L> {
    log: L,
    building: String,
}

impl<L: ReadingLog> LogRecorder<L> {
    /// Recorder writing to `log` under `building`
    pub fn new(log: L, building: impl Into<String>) -> Self {
        Self {
            log,
            building: building.into(),
        }
    }

    /// Underlying log
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Building recorded with each reading
    pub fn building(&self) -> &str {
        &self.building
    }
}

impl<L: ReadingLog + Send + Sync> ReadingObserver for LogRecorder<L> {
    fn on_reading(&self, reading: &Reading, _history: &HistorySnapshot) {
        if let Err(e) = self.log.append(reading, &self.building) {
            log::warn!("Failed to log reading {} for {}: {}", reading.timestamp, self.building, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonLinesLog, MemoryLog};

    fn reading(power: f64) -> Reading {
        Reading::new("2023-01-01T12:00:00", power, 22.0, 60.0, 500.0)
    }

    #[test]
    fn dashboard_tracks_latest() {
        let dashboard = DashboardObserver::new();
        let first = reading(200.0);
        let second = reading(300.0);

        dashboard.on_reading(&first, &HistorySnapshot::new(vec![first.clone()]));
        dashboard.on_reading(&second, &HistorySnapshot::new(vec![first, second.clone()]));

        let state = dashboard.state();
        assert_eq!(state.latest, Some(second));
        assert_eq!(state.history_len, 2);
        assert_eq!(state.updates, 2);
    }

    #[test]
    fn recorder_appends_with_building() {
        let recorder = LogRecorder::new(MemoryLog::new(), "Library");
        recorder.on_reading(&reading(250.0), &HistorySnapshot::default());

        let records = recorder.log().read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].building, "Library");
    }

    #[test]
    fn recorder_survives_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let recorder = LogRecorder::new(JsonLinesLog::new(dir.path()), "Gym");

        recorder.on_reading(&reading(250.0), &HistorySnapshot::default());
        assert_eq!(recorder.building(), "Gym");
    }
}
