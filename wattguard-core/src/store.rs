//! Reading persistence
//!
//! Readings are logged together with the building they were taken in. The
//! file backend writes JSON Lines, one record per line:
//!
//! ```json
//! {"building":"Library","timestamp":"2023-01-01T12:00:00","power":250.0,"temperature":22.0,"humidity":60.0,"light":500.0}
//! ```
//!
//! Records come back in the order they were appended.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::errors::{MonitorError, MonitorResult};
use crate::reading::Reading;

/// A logged reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Building the reading belongs to
    pub building: String,
    /// The logged reading
    #[serde(flatten)]
    pub reading: Reading,
}

impl LogRecord {
    /// Record of `reading` for `building`
    pub fn new(reading: &Reading, building: impl Into<String>) -> Self {
        Self {
            building: building.into(),
            reading: reading.clone(),
        }
    }
}

/// Append-only store of logged readings
pub trait ReadingLog {
    /// Append one reading
    fn append(&self, reading: &Reading, building: &str) -> MonitorResult<()>;

    /// Every record, oldest first.
    fn read_all(&self) -> MonitorResult<Vec<LogRecord>>;
}

/// In-memory log
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// `true` when nothing was logged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReadingLog for MemoryLog {
    fn append(&self, reading: &Reading, building: &str) -> MonitorResult<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord::new(reading, building));
        Ok(())
    }

    fn read_all(&self) -> MonitorResult<Vec<LogRecord>> {
        Ok(self.records.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

/// JSON Lines file log
///
/// The file is created on first append. Reading a log that was never
/// written yields no records.
#[derive(Debug)]
pub struct JsonLinesLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesLog {
    /// Log at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Log file location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingLog for JsonLinesLog {
    fn append(&self, reading: &Reading, building: &str) -> MonitorResult<()> {
        let mut line = serde_json::to_string(&LogRecord::new(reading, building))
            .map_err(|source| MonitorError::Log { line: 0, source })?;
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn read_all(&self) -> MonitorResult<Vec<LogRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| MonitorError::Log { line: index + 1, source })?;
            records.push(record);
        }

        log::debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(timestamp: &str, power: f64) -> Reading {
        Reading::new(timestamp, power, 22.0, 60.0, 500.0)
    }

    #[test]
    fn memory_log_keeps_order() {
        let log = MemoryLog::new();
        log.append(&reading("2023-01-01T10:00:00", 200.0), "Library").unwrap();
        log.append(&reading("2023-01-01T11:00:00", 300.0), "Gym").unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].building, "Library");
        assert_eq!(records[1].reading.power, 300.0);
    }

    #[test]
    fn json_lines_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let log = JsonLinesLog::new(dir.path().join("readings.jsonl"));

        for (i, power) in [210.0, 480.0, 150.0].into_iter().enumerate() {
            log.append(&reading(&format!("2023-01-01T1{i}:00:00"), power), "Library").unwrap();
        }

        let records = log.read_all().unwrap();
        let powers: Vec<f64> = records.iter().map(|r| r.reading.power).collect();
        assert_eq!(powers, vec![210.0, 480.0, 150.0]);
        assert!(records.iter().all(|r| r.building == "Library"));
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = JsonLinesLog::new(dir.path().join("never-written.jsonl"));

        assert!(log.read_all().unwrap().is_empty());
        assert!(!log.path().exists());
    }

    #[test]
    fn blank_lines_skipped_and_bad_lines_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.jsonl");
        std::fs::write(
            &path,
            "{\"building\":\"Gym\",\"timestamp\":\"t\",\"power\":1.0,\"temperature\":2.0,\"humidity\":3.0,\"light\":4.0}\n\n",
        )
        .unwrap();

        let log = JsonLinesLog::new(&path);
        assert_eq!(log.read_all().unwrap().len(), 1);

        std::fs::write(&path, "\n{\"building\":\"Gym\"}\n").unwrap();
        assert!(matches!(log.read_all(), Err(MonitorError::Log { line: 2, .. })));
    }

    #[test]
    fn accepts_sensor_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.jsonl");
        std::fs::write(
            &path,
            "{\"building\":\"Lab\",\"timestamp\":\"2023-01-01T09:00:00\",\"PowerSensor\":320.0,\"TemperatureSensor\":21.0,\"HumiditySensor\":55.0,\"LightSensor\":400.0}\n",
        )
        .unwrap();

        let records = JsonLinesLog::new(&path).read_all().unwrap();
        assert_eq!(records[0].reading.power, 320.0);
    }
}
