//! Manual control modes
//!
//! The operator picks a mode and the directive follows it, whatever the
//! reading says. The mode sits in an atomic cell so it can be switched while
//! the strategy is shared with an active control context.

use core::fmt;
use core::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::reading::Reading;

use super::ControlStrategy;

/// Operator-selected supply mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualMode {
    /// Reduced consumption
    #[default]
    Eco,
    /// Standard operation
    Normal,
    /// Everything at maximum
    FullPower,
}

impl ManualMode {
    /// Kebab-case mode name
    pub const fn name(&self) -> &'static str {
        match self {
            ManualMode::Eco => "eco",
            ManualMode::Normal => "normal",
            ManualMode::FullPower => "full-power",
        }
    }

    /// Directive announced for this mode
    pub const fn directive(&self) -> &'static str {
        match self {
            ManualMode::Eco => {
                "Manual Control: ECO MODE engaged. Reducing power usage to save energy."
            }
            ManualMode::Normal => {
                "Manual Control: NORMAL MODE engaged. Operating at standard power levels."
            }
            ManualMode::FullPower => {
                "Manual Control: FULL POWER MODE engaged. All systems operating at maximum capacity."
            }
        }
    }

    const fn to_bits(self) -> u8 {
        match self {
            ManualMode::Eco => 0,
            ManualMode::Normal => 1,
            ManualMode::FullPower => 2,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => ManualMode::Normal,
            2 => ManualMode::FullPower,
            _ => ManualMode::Eco,
        }
    }
}

impl fmt::Display for ManualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ManualMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "eco" => Ok(ManualMode::Eco),
            "normal" => Ok(ManualMode::Normal),
            "full-power" | "full" => Ok(ManualMode::FullPower),
            other => Err(format!("unknown manual mode '{other}'")),
        }
    }
}

/// Manual strategy with a switchable mode
#[derive(Debug, Default)]
pub struct ManualControl {
    mode: AtomicU8,
}

impl ManualControl {
    /// Manual control starting in `mode`
    pub fn new(mode: ManualMode) -> Self {
        Self {
            mode: AtomicU8::new(mode.to_bits()),
        }
    }

    /// Current mode
    pub fn mode(&self) -> ManualMode {
        ManualMode::from_bits(self.mode.load(Ordering::Acquire))
    }

    /// Switch mode; takes effect on the next decision.
    pub fn set_mode(&self, mode: ManualMode) {
        let previous = ManualMode::from_bits(self.mode.swap(mode.to_bits(), Ordering::AcqRel));
        if previous != mode {
            log::info!("Manual mode changed from {} to {}", previous, mode);
        }
    }
}

impl Clone for ManualControl {
    fn clone(&self) -> Self {
        Self::new(self.mode())
    }
}

impl ControlStrategy for ManualControl {
    fn decide(&self, _reading: &Reading) -> String {
        self.mode().directive().to_string()
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_ignores_reading() {
        let manual = ManualControl::new(ManualMode::Eco);
        let quiet = Reading::new("2023-01-01T03:00:00", 100.0, 18.0, 60.0, 0.0);
        let busy = Reading::new("2023-01-01T15:00:00", 900.0, 30.0, 40.0, 800.0);

        assert_eq!(manual.decide(&quiet), manual.decide(&busy));
        assert!(manual.decide(&quiet).contains("ECO MODE"));
    }

    #[test]
    fn mode_switch_through_shared_reference() {
        let manual = ManualControl::default();
        let reading = Reading::new("2023-01-01T12:00:00", 300.0, 22.0, 60.0, 500.0);

        manual.set_mode(ManualMode::FullPower);
        assert_eq!(manual.mode(), ManualMode::FullPower);
        assert!(manual.decide(&reading).contains("FULL POWER MODE"));

        manual.set_mode(ManualMode::Normal);
        assert!(manual.decide(&reading).contains("NORMAL MODE"));
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in [ManualMode::Eco, ManualMode::Normal, ManualMode::FullPower] {
            assert_eq!(mode.name().parse::<ManualMode>(), Ok(mode));
        }
        assert_eq!("FULL_POWER".parse::<ManualMode>(), Ok(ManualMode::FullPower));
        assert!("turbo".parse::<ManualMode>().is_err());
        assert_eq!(serde_json::to_string(&ManualMode::FullPower).unwrap(), r#""full-power""#);
    }
}
