//! Model-Driven Control Example
//!
//! Loads a forest exported from training and compares its decisions with
//! plain power banding.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p wattguard-ml --example 02_model_control [model.json]
//! ```

use wattguard_core::{AutomaticMl, ControlContext, Reading, Strategy};
use wattguard_ml::{MLResult, ModelBundle};

const DEMO_MODEL: &str = r#"{
    "forest": {"trees": [
        {"nodes": [
            {"feature": 0, "threshold": 300.0, "left": 1, "right": 2},
            {"class": 2},
            {"feature": 4, "threshold": 17.0, "left": 3, "right": 4},
            {"class": 3},
            {"class": 1}
        ]},
        {"nodes": [
            {"feature": 0, "threshold": 650.0, "left": 1, "right": 2},
            {"class": 3},
            {"class": 0}
        ]}
    ]},
    "encoder": {"classes": ["abnormal", "high", "low", "normal"]}
}"#;

fn main() -> MLResult<()> {
    let bundle = match std::env::args().nth(1) {
        Some(path) => ModelBundle::from_file(path)?,
        None => ModelBundle::from_json(DEMO_MODEL)?,
    };

    let model = ControlContext::new(Strategy::from(bundle.into_strategy()));
    let bands = ControlContext::new(Strategy::from(AutomaticMl::without_model()));

    let readings = [
        Reading::new("2023-01-01T03:00:00", 120.0, 19.0, 58.0, 10.0),
        Reading::new("2023-01-01T10:00:00", 420.0, 24.0, 52.0, 620.0),
        Reading::new("2023-01-01T20:00:00", 420.0, 24.0, 52.0, 30.0),
        Reading::new("2023-01-01T14:00:00", 780.0, 29.0, 45.0, 700.0),
    ];

    for reading in &readings {
        println!("{} @ {:.0} W", reading.timestamp, reading.power);
        println!("  model: {}", model.execute_control(reading));
        println!("  bands: {}", bands.execute_control(reading));
    }

    Ok(())
}
