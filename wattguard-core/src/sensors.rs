//! Sensor sources
//!
//! [`SensorSource`] is what the monitor samples from. The simulator (feature
//! `simulator`) generates plausible readings for demos and tests:
//!
//! - power: bounded random walk in `[100, max_power]` W
//! - temperature: `18 + power / 25`, ±1 °C
//! - humidity: `60 - power / 50`, ±3 %, clamped to `[0, 100]`
//! - light: 300-800 lux between 07:00 and 18:59, 0-50 lux otherwise

use crate::errors::MonitorResult;
use crate::reading::Reading;

/// Something that produces readings on demand
pub trait SensorSource {
    /// Next reading
    fn read(&mut self) -> MonitorResult<Reading>;
}

#[cfg(feature = "simulator")]
pub use simulated::SimulatedSensor;

#[cfg(feature = "simulator")]
mod simulated {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::SensorSource;
    use crate::constants::sensors::*;
    use crate::errors::MonitorResult;
    use crate::reading::Reading;
    use crate::time::{self, Clock, SystemClock};

    /// Seeded random sensor
    #[derive(Debug)]
    pub struct SimulatedSensor<C: Clock = SystemClock> {
        rng: StdRng,
        clock: C,
        max_power: f64,
        last_power: Option<f64>,
    }

    impl SimulatedSensor<SystemClock> {
        /// Seeded simulator on the system clock
        pub fn new(seed: u64) -> Self {
            Self::with_clock(seed, SystemClock)
        }
    }

    impl<C: Clock> SimulatedSensor<C> {
        /// Seeded simulator on a custom clock
        pub fn with_clock(seed: u64, clock: C) -> Self {
            Self {
                rng: StdRng::seed_from_u64(seed),
                clock,
                max_power: SIM_POWER_MAX_W,
                last_power: None,
            }
        }

        /// Upper power bound, in Watts
        pub fn max_power(&self) -> f64 {
            self.max_power
        }

        /// Raise or lower the power ceiling. Never drops below the floor.
        pub fn set_max_power(&mut self, watts: f64) {
            self.max_power = if watts.is_finite() {
                watts.max(SIM_POWER_MIN_W)
            } else {
                SIM_POWER_MAX_W
            };
        }

        /// Power of the previous reading
        pub fn last_power(&self) -> Option<f64> {
            self.last_power
        }

        /// Override the walk's previous value, e.g. to replay a faulty reading.
        pub fn set_last_power(&mut self, watts: f64) {
            self.last_power = Some(watts);
        }

        /// Clock used for timestamps
        pub fn clock_mut(&mut self) -> &mut C {
            &mut self.clock
        }

        fn next_power(&mut self) -> f64 {
            let (min, max) = (SIM_POWER_MIN_W, self.max_power);
            let power = match self.last_power {
                Some(last) if last.is_finite() && (min..=max).contains(&last) => {
                    let step = self.rng.gen_range(-SIM_POWER_STEP_W..=SIM_POWER_STEP_W);
                    (last + step).clamp(min, max)
                }
                Some(last) => {
                    log::debug!("Restarting power walk from invalid value {}", last);
                    self.rng.gen_range(min..=max)
                }
                None => self.rng.gen_range(min..=max),
            };
            self.last_power = Some(power);
            power
        }

        fn light_for_hour(&mut self, hour: u32) -> f64 {
            let (low, high) = if (DAYLIGHT_START_HOUR..=DAYLIGHT_END_HOUR).contains(&hour) {
                DAY_LIGHT_LUX
            } else {
                NIGHT_LIGHT_LUX
            };
            self.rng.gen_range(low..=high)
        }
    }

    impl<C: Clock> SensorSource for SimulatedSensor<C> {
        fn read(&mut self) -> MonitorResult<Reading> {
            use chrono::Timelike;

            let now = self.clock.now();
            let power = self.next_power();

            let temperature = SIM_TEMP_BASE_C
                + power / SIM_WATTS_PER_DEGREE
                + self.rng.gen_range(-SIM_TEMP_NOISE_C..=SIM_TEMP_NOISE_C);
            let humidity = (SIM_HUMIDITY_BASE_PCT - power / SIM_WATTS_PER_HUMIDITY_PCT
                + self.rng.gen_range(-SIM_HUMIDITY_NOISE_PCT..=SIM_HUMIDITY_NOISE_PCT))
                .clamp(0.0, 100.0);
            let light = self.light_for_hour(now.hour());

            Ok(Reading::new(
                time::format_timestamp(&now),
                power,
                temperature,
                humidity,
                light,
            ))
        }
    }

}
