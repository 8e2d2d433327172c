//! Simulated Building Day Example
//!
//! Feeds a day of simulated readings through a monitor and prints what a
//! dashboard would show.
//!
//! ## What You'll Learn
//!
//! - Building a monitor from configuration
//! - Sampling a sensor source
//! - Subscribing observers and swapping strategies mid-run
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_day
//! ```

use std::sync::Arc;

use wattguard_core::{
    AutomaticRule, ControlStrategy, DashboardObserver, FixedClock, LogRecorder, MemoryLog,
    MonitorConfig, MonitorResult, PowerMonitor, SimulatedSensor, Strategy,
};

fn main() -> MonitorResult<()> {
    let config = MonitorConfig::new().building("Library").forecast_periods(4);
    let monitor = PowerMonitor::new(config.clone())?;

    let dashboard = Arc::new(DashboardObserver::new());
    let recorder = Arc::new(LogRecorder::new(MemoryLog::new(), config.building.clone()));
    monitor.subscribe(dashboard.clone());
    monitor.subscribe(recorder.clone());

    let mut sensor = SimulatedSensor::with_clock(7, FixedClock::at_hour(0));
    sensor.set_max_power(750.0);

    for hour in 0..24 {
        if hour == 12 {
            let previous = monitor.set_strategy(Strategy::from(AutomaticRule::default()));
            println!("-- switched from {} to rule-based control --", previous.name());
        }

        let update = monitor.sample(&mut sensor)?;
        if let (Some(reading), Some(action)) = (&update.latest, &update.control_action) {
            println!("{} {:>7.1} W  {}", reading.timestamp, reading.power, action);
        }

        sensor.clock_mut().advance(chrono::Duration::hours(1));
    }

    let summary = monitor.dashboard();
    println!();
    println!("{}", summary.trend_report);
    println!("Alerts above {} W: {:?}", config.alert_threshold, summary.alerts);
    println!("Forecast: {:?}", summary.forecast);
    match serde_json::to_string_pretty(&summary.detailed_report) {
        Ok(json) => println!("Report: {json}"),
        Err(e) => eprintln!("Could not render report: {e}"),
    }
    match serde_json::to_string_pretty(&summary.patterns) {
        Ok(json) => println!("Patterns: {json}"),
        Err(e) => eprintln!("Could not render patterns: {e}"),
    }

    println!(
        "Dashboard saw {} updates, log holds {} records",
        dashboard.state().updates,
        recorder.log().len()
    );

    Ok(())
}
