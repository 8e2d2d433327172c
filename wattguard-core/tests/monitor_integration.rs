//! Integration tests for the monitoring cycle
//!
//! Drives a full monitor through realistic load days and checks that alerts,
//! reports, patterns, forecasts and control directives line up.

mod common;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use wattguard_core::{
    AutomaticMl, AutomaticRule, ControlContext, ControlStrategy, DashboardObserver,
    HistoryStore, InitialStrategy, JsonLinesLog, LegacyAdapter, LogRecorder, ManualMode,
    MonitorConfig, PowerMonitor, ReadingLog, SeverityLevel, Strategy, TrendDirection,
    TrendPattern,
};

use common::{hourly, reading_at, ConstantClassifier, Gate, OrderRecorder, OrdinalDecoder, Scenarios};

#[test]
fn test_office_day_report() {
    let monitor = PowerMonitor::new(MonitorConfig::default()).unwrap();

    let mut last = None;
    for reading in hourly(&Scenarios::office_day()) {
        last = Some(monitor.ingest(reading).unwrap());
    }
    let update = last.unwrap();

    // 460, 470, 480, 465 exceed 450
    assert_eq!(update.alerts, vec![460.0, 470.0, 480.0, 465.0]);
    assert!(update
        .severity_alerts
        .iter()
        .all(|alert| alert.severity == SeverityLevel::Low));

    let report = update.detailed_report.ready().unwrap();
    assert_eq!(report.max, 480.0);
    assert_eq!(report.min, 110.0);
    assert_eq!(report.peak_hour, Some(14));
    assert_eq!(report.alert_percentage, 16.67);

    let patterns = update.patterns.ready().unwrap();
    assert_eq!(patterns.trend_pattern, TrendPattern::Fluctuating);
    assert_eq!(patterns.spike_count, 0);

    assert_eq!(update.forecast.len(), 3);
    assert!(update.forecast.iter().all(|v| (100.0..=480.0).contains(v)));
}

#[test]
fn test_surges_graded_and_counted() {
    let monitor = PowerMonitor::new(MonitorConfig::new().alert_threshold(400.0)).unwrap();

    let mut last = None;
    for reading in hourly(&Scenarios::surges()) {
        last = Some(monitor.ingest(reading).unwrap());
    }
    let update = last.unwrap();

    assert_eq!(update.alerts, vec![650.0, 640.0, 700.0]);
    let levels: Vec<_> = update.severity_alerts.iter().map(|a| a.severity).collect();
    assert_eq!(
        levels,
        vec![SeverityLevel::High, SeverityLevel::High, SeverityLevel::High]
    );
    assert_eq!(update.patterns.ready().unwrap().spike_count, 3);
}

#[test]
fn test_ramp_trends_upward() {
    let monitor = PowerMonitor::new(MonitorConfig::default()).unwrap();

    let mut last = None;
    for reading in hourly(&Scenarios::ramp(12)) {
        last = Some(monitor.ingest(reading).unwrap());
    }
    let update = last.unwrap();

    let report = update.detailed_report.ready().unwrap();
    assert_eq!(report.trend, Some(TrendDirection::Increasing));
    assert_eq!(
        update.patterns.ready().unwrap().trend_pattern,
        TrendPattern::ConsistentIncrease
    );
}

#[test]
fn test_observers_called_in_subscription_order() {
    let monitor = PowerMonitor::new(MonitorConfig::default()).unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    monitor.subscribe(Arc::new(OrderRecorder { name: "first", calls: calls.clone() }));
    monitor.subscribe(Arc::new(OrderRecorder { name: "second", calls: calls.clone() }));

    monitor.ingest(reading_at(9, 300.0)).unwrap();
    monitor.ingest(reading_at(10, 310.0)).unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec![("first", 300.0), ("second", 300.0), ("first", 310.0), ("second", 310.0)]
    );
}

#[test]
fn test_log_recorder_persists_readings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.jsonl");

    let config = MonitorConfig::new().building("Library");
    let monitor = PowerMonitor::new(config.clone()).unwrap();
    monitor.subscribe(Arc::new(LogRecorder::new(JsonLinesLog::new(&path), config.building)));

    for reading in hourly(&[210.0, 320.0, 455.0]) {
        monitor.ingest(reading).unwrap();
    }

    let records = JsonLinesLog::new(&path).read_all().unwrap();
    let powers: Vec<f64> = records.iter().map(|r| r.reading.power).collect();
    assert_eq!(powers, vec![210.0, 320.0, 455.0]);
    assert!(records.iter().all(|r| r.building == "Library"));
    assert_eq!(records[2].reading.timestamp, "2023-01-01T02:00:00");
}

#[test]
fn test_concurrent_ingest_logs_in_history_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annex.jsonl");

    let monitor = Arc::new(PowerMonitor::new(MonitorConfig::default()).unwrap());
    let gate = Arc::new(Gate::new());
    monitor.subscribe(gate.clone());
    monitor.subscribe(Arc::new(LogRecorder::new(JsonLinesLog::new(&path), "Annex")));

    let first = {
        let monitor = Arc::clone(&monitor);
        thread::spawn(move || monitor.ingest(reading_at(8, 100.0)).unwrap())
    };
    gate.wait_entered();

    let second = {
        let monitor = Arc::clone(&monitor);
        thread::spawn(move || monitor.ingest(reading_at(9, 200.0)).unwrap())
    };
    // Give the second ingest time to race the parked first one
    thread::sleep(Duration::from_millis(50));
    gate.open();

    first.join().unwrap();
    second.join().unwrap();

    let history = monitor.history().snapshot().powers();
    let logged: Vec<f64> = JsonLinesLog::new(&path)
        .read_all()
        .unwrap()
        .iter()
        .map(|record| record.reading.power)
        .collect();

    assert_eq!(history, vec![100.0, 200.0]);
    assert_eq!(logged, history);
}

#[test]
fn test_strategy_switching_during_run() {
    let monitor = PowerMonitor::new(
        MonitorConfig::new()
            .initial_strategy(InitialStrategy::Manual)
            .manual_mode(ManualMode::Eco),
    )
    .unwrap();

    let eco = monitor.ingest(reading_at(9, 600.0)).unwrap();
    assert!(eco.control_action.unwrap().contains("ECO MODE"));

    assert!(monitor.context().set_manual_mode(ManualMode::FullPower));
    let full = monitor.ingest(reading_at(10, 600.0)).unwrap();
    assert!(full.control_action.unwrap().contains("FULL POWER MODE"));

    let manual = monitor.set_strategy(Strategy::from(AutomaticRule::new(420.0).unwrap()));
    let rule = monitor.ingest(reading_at(11, 430.0)).unwrap();
    assert!(rule.control_action.unwrap().contains("High power detected"));

    // The manual strategy keeps its mode while inactive
    monitor.set_strategy(manual);
    let back = monitor.ingest(reading_at(12, 100.0)).unwrap();
    assert!(back.control_action.unwrap().contains("FULL POWER MODE"));
}

#[test]
fn test_model_driven_control() {
    let context = ControlContext::new(Strategy::from(AutomaticMl::with_model(
        ConstantClassifier(0),
        OrdinalDecoder,
    )));
    let monitor = PowerMonitor::with_parts(
        wattguard_core::AnalysisEngine::new(450.0).unwrap(),
        context,
        HistoryStore::new(),
        MonitorConfig::default(),
    );

    let update = monitor.ingest(reading_at(15, 900.0)).unwrap();
    assert!(update.control_action.unwrap().contains("low"));

    // Unknown label falls back to bands: 900 W is abnormal
    monitor.set_strategy(Strategy::from(AutomaticMl::with_model(
        ConstantClassifier(42),
        OrdinalDecoder,
    )));
    let update = monitor.ingest(reading_at(16, 900.0)).unwrap();
    assert!(update.control_action.unwrap().contains("'abnormal'"));
}

#[test]
fn test_legacy_controller_in_context() {
    let legacy = LegacyAdapter::new(|power: f64| format!("legacy saw {power:.0} W"));
    let context = ControlContext::new(Strategy::from(legacy));

    assert_eq!(context.execute_control(&reading_at(9, 333.0)), "legacy saw 333 W");
    assert_eq!(context.active().name(), "legacy");
}

#[test]
fn test_dashboard_reflects_history_without_control() {
    let monitor = PowerMonitor::new(MonitorConfig::default()).unwrap();
    let dashboard = Arc::new(DashboardObserver::new());
    monitor.subscribe(dashboard.clone());

    for reading in hourly(&[300.0, 500.0]) {
        monitor.ingest(reading).unwrap();
    }

    let update = monitor.dashboard();
    assert_eq!(update.control_action, None);
    assert_eq!(update.latest.as_ref().map(|r| r.power), Some(500.0));
    assert_eq!(dashboard.state().history_len, 2);

    monitor.reset();
    assert!(monitor.history().is_empty());
    assert!(!monitor.dashboard().detailed_report.is_ready());
}

#[cfg(feature = "simulator")]
#[test]
fn test_sampling_simulated_sensor() {
    use wattguard_core::{FixedClock, SimulatedSensor};

    let monitor = PowerMonitor::new(MonitorConfig::default()).unwrap();
    let mut sensor = SimulatedSensor::with_clock(2024, FixedClock::at_hour(11));

    for _ in 0..12 {
        let update = monitor.sample(&mut sensor).unwrap();
        assert!(update.control_action.is_some());
    }

    let update = monitor.dashboard();
    assert_eq!(monitor.history().len(), 12);
    assert!(update.patterns.is_ready());
    assert_eq!(update.forecast.len(), 3);
    assert_eq!(update.detailed_report.ready().unwrap().peak_hour, Some(11));
}
