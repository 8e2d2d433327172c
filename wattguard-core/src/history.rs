//! In-core History Store
//!
//! ## Overview
//!
//! The history store is the ordered, append-only sequence of readings that
//! every analysis runs over. Insertion order is chronological order. The only
//! mutations are [`HistoryStore::append`] and a wholesale
//! [`HistoryStore::clear`]; readings are never spliced or reordered.
//!
//! ## Consistency
//!
//! Appends and reads share one mutex. [`HistoryStore::append`] pushes the new
//! reading and copies the whole history inside the same critical section, so
//! the snapshot a caller analyzes always ends with the reading it just added
//! and never observes a half-finished append from another caller.
//!
//! ```text
//! writer A: lock ─ push(r1) ─ snapshot [.., r1] ─ unlock
//! writer B:                                      lock ─ push(r2) ─ snapshot [.., r1, r2] ─ unlock
//! reader  :                  (blocked)           sees [.., r1]  or  [.., r1, r2]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use wattguard_core::{HistoryStore, Reading};
//!
//! let store = HistoryStore::new();
//! let snapshot = store.append(Reading::new("2023-01-01T12:00:00", 250.0, 22.0, 60.0, 500.0));
//!
//! assert_eq!(snapshot.powers(), vec![250.0]);
//! assert_eq!(store.len(), 1);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::reading::Reading;

/// Ordered, append-only reading history
///
/// Safe to share between request handlers behind an `Arc`.
#[derive(Debug, Default)]
pub struct HistoryStore {
    readings: Mutex<Vec<Reading>>,
}

impl HistoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading and return the history including it.
    pub fn append(&self, reading: Reading) -> HistorySnapshot {
        let mut readings = self.lock();
        readings.push(reading);
        HistorySnapshot::new(readings.clone())
    }

    /// Copy of the whole history.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(self.lock().clone())
    }

    /// Number of readings recorded
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` before the first append
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every reading (simulation reset).
    pub fn clear(&self) {
        let mut readings = self.lock();
        log::info!("Clearing history of {} readings", readings.len());
        readings.clear();
    }

    // Every critical section leaves the vector valid, so a panic elsewhere
    // while holding the lock does not corrupt it.
    fn lock(&self) -> MutexGuard<'_, Vec<Reading>> {
        self.readings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Point-in-time copy of the history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistorySnapshot {
    readings: Vec<Reading>,
}

impl HistorySnapshot {
    /// Snapshot of the given readings
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Readings in chronological order
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Power series in chronological order
    pub fn powers(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.power).collect()
    }

    /// Timestamps in chronological order
    pub fn timestamps(&self) -> Vec<String> {
        self.readings.iter().map(|r| r.timestamp.clone()).collect()
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// `true` for an empty history
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Take the readings
    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn reading(power: f64) -> Reading {
        Reading::new("2023-01-01T12:00:00", power, 22.0, 55.0, 400.0)
    }

    #[test]
    fn append_returns_snapshot_with_new_reading() {
        let store = HistoryStore::new();
        store.append(reading(100.0));
        let snapshot = store.append(reading(200.0));

        assert_eq!(snapshot.powers(), vec![100.0, 200.0]);
        assert_eq!(snapshot.latest().map(|r| r.power), Some(200.0));
    }

    #[test]
    fn clear_empties_history() {
        let store = HistoryStore::new();
        store.append(reading(100.0));
        store.clear();

        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn concurrent_appends_never_tear() {
        let store = Arc::new(HistoryStore::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50 {
                        let snapshot = store.append(reading((t * 100 + i) as f64));
                        // The caller's own reading always closes its snapshot
                        assert_eq!(snapshot.latest().map(|r| r.power), Some((t * 100 + i) as f64));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 200);
    }
}
