//! Simulated Sensor Ranges
//!
//! Envelope used by the sensor simulator. Values approximate a small office
//! floor on a single metered circuit.

/// Lowest power the simulator produces, in Watts.
pub const SIM_POWER_MIN_W: f64 = 100.0;

/// Default highest power the simulator produces, in Watts.
pub const SIM_POWER_MAX_W: f64 = 500.0;

/// Largest step of the power random walk between two readings, in Watts.
pub const SIM_POWER_STEP_W: f64 = 50.0;

/// Baseline room temperature before load heating, in °C.
pub const SIM_TEMP_BASE_C: f64 = 18.0;

/// Watts of load per additional °C of room temperature.
pub const SIM_WATTS_PER_DEGREE: f64 = 25.0;

/// Temperature noise amplitude, in °C.
pub const SIM_TEMP_NOISE_C: f64 = 1.0;

/// Baseline relative humidity, in %.
pub const SIM_HUMIDITY_BASE_PCT: f64 = 60.0;

/// Watts of load per 1% drop in relative humidity.
pub const SIM_WATTS_PER_HUMIDITY_PCT: f64 = 50.0;

/// Humidity noise amplitude, in %.
pub const SIM_HUMIDITY_NOISE_PCT: f64 = 3.0;

/// First hour (inclusive) counted as daylight.
pub const DAYLIGHT_START_HOUR: u32 = 7;

/// Last hour (inclusive) counted as daylight.
pub const DAYLIGHT_END_HOUR: u32 = 18;

/// Daylight illuminance range, in lux.
pub const DAY_LIGHT_LUX: (f64, f64) = (300.0, 800.0);

/// Night illuminance range, in lux.
pub const NIGHT_LIGHT_LUX: (f64, f64) = (0.0, 50.0);
