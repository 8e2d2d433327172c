//! Power monitor
//!
//! Wires the history store, the analysis engine and the control context into
//! one ingest cycle:
//!
//! ```text
//! Reading ─▶ append + snapshot ─▶ observers ─▶ analyses ─▶ control ─▶ MonitorUpdate
//! ```
//!
//! Every analysis in one update runs over the same snapshot, so the report,
//! patterns and forecast always describe the same history.
//!
//! Append and notify happen under one publish lock, so observers see readings
//! in history order even when several threads ingest at once. Observers must
//! not call [`PowerMonitor::ingest`] on the monitor that notifies them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use crate::analysis::{AnalysisEngine, AnalysisOutcome, PatternSummary, PowerReport, SeverityAlert};
use crate::config::MonitorConfig;
use crate::control::{ControlContext, Strategy};
use crate::errors::MonitorResult;
use crate::history::{HistorySnapshot, HistoryStore};
use crate::observers::ReadingObserver;
use crate::reading::Reading;
use crate::sensors::SensorSource;

/// Handle returned by [`PowerMonitor::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Everything the presentation layer shows after one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorUpdate {
    /// Reading that triggered the update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<Reading>,

    /// Directive from the active strategy; absent for dashboard refreshes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_action: Option<String>,

    /// Readings above the alert threshold
    pub alerts: Vec<f64>,
    /// Alerts with their severity
    pub severity_alerts: Vec<SeverityAlert>,
    /// One-line average summary
    pub trend_report: String,
    /// Full statistical report
    pub detailed_report: AnalysisOutcome<PowerReport>,
    /// Pattern summary
    pub patterns: AnalysisOutcome<PatternSummary>,
    /// Projected consumption
    pub forecast: Vec<f64>,
}

type SharedObserver = Arc<dyn ReadingObserver>;

/// Monitoring pipeline for one building
pub struct PowerMonitor {
    config: MonitorConfig,
    engine: AnalysisEngine,
    context: ControlContext,
    history: HistoryStore,
    observers: RwLock<Vec<(ObserverId, SharedObserver)>>,
    next_observer: AtomicU64,
    publish: Mutex<()>,
}

impl PowerMonitor {
    /// Build a monitor from a validated configuration.
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        config.validate()?;
        let engine = AnalysisEngine::new(config.alert_threshold)?;
        let context = ControlContext::new(config.strategy()?);
        Ok(Self::with_parts(engine, context, HistoryStore::new(), config))
    }

    /// Assemble a monitor from existing parts.
    ///
    /// The engine's threshold is used as is; `config` only supplies the
    /// pattern window, forecast horizon and building name.
    pub fn with_parts(
        engine: AnalysisEngine,
        context: ControlContext,
        history: HistoryStore,
        config: MonitorConfig,
    ) -> Self {
        log::info!(
            "Monitoring {} with alert threshold {} W",
            config.building,
            engine.threshold()
        );
        Self {
            config,
            engine,
            context,
            history,
            observers: RwLock::new(Vec::new()),
            next_observer: AtomicU64::new(0),
            publish: Mutex::new(()),
        }
    }

    /// Record a reading, analyze the updated history and run control.
    pub fn ingest(&self, reading: Reading) -> MonitorResult<MonitorUpdate> {
        reading.validate()?;

        let snapshot = {
            let _publish = self.publish.lock().unwrap_or_else(PoisonError::into_inner);
            let snapshot = self.history.append(reading.clone());
            self.notify(&reading, &snapshot);
            snapshot
        };

        let mut update = self.analyze(&snapshot);
        update.control_action = Some(self.context.execute_control(&reading));
        update.latest = Some(reading);
        Ok(update)
    }

    /// Take one reading from `source` and ingest it.
    pub fn sample(&self, source: &mut dyn SensorSource) -> MonitorResult<MonitorUpdate> {
        let reading = source.read()?;
        self.ingest(reading)
    }

    /// Analyses over the current history without a control action.
    pub fn dashboard(&self) -> MonitorUpdate {
        let snapshot = self.history.snapshot();
        let mut update = self.analyze(&snapshot);
        update.latest = snapshot.latest().cloned();
        update
    }

    /// Drop all recorded readings.
    pub fn reset(&self) {
        self.history.clear();
    }

    /// Register an observer for every subsequent reading.
    pub fn subscribe(&self, observer: Arc<dyn ReadingObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        log::info!("Observer {:?} subscribed", id);
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        let removed = observers.len() != before;
        if removed {
            log::info!("Observer {:?} unsubscribed", id);
        }
        removed
    }

    /// Swap the active control strategy, returning the previous one.
    pub fn set_strategy(&self, strategy: impl Into<Arc<Strategy>>) -> Arc<Strategy> {
        self.context.set_strategy(strategy)
    }

    /// Active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Analysis engine
    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// Control context
    pub fn context(&self) -> &ControlContext {
        &self.context
    }

    /// Recorded history
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    fn notify(&self, reading: &Reading, snapshot: &HistorySnapshot) {
        // Observers run outside the registry lock so they may (un)subscribe
        let observers: Vec<SharedObserver> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer.on_reading(reading, snapshot);
        }
    }

    fn analyze(&self, snapshot: &HistorySnapshot) -> MonitorUpdate {
        let powers = snapshot.powers();
        let timestamps = snapshot.timestamps();

        log::debug!("Analyzing {} readings", powers.len());

        MonitorUpdate {
            latest: None,
            control_action: None,
            alerts: self.engine.analyze(&powers),
            severity_alerts: self.engine.analyze_with_severity(&powers),
            trend_report: self.engine.generate_trend_report(&powers),
            detailed_report: self.engine.generate_detailed_report(&powers, Some(&timestamps[..])),
            patterns: self.engine.detect_patterns(&powers, self.config.pattern_window),
            forecast: self
                .engine
                .forecast_consumption(&powers, self.config.forecast_periods),
        }
    }
}

impl std::fmt::Debug for PowerMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerMonitor")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("context", &self.context)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
