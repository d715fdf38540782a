//! Actuator control laws.
//!
//! Only the irrigation pump is controlled, from soil humidity, by a
//! two-threshold [`hysteresis::HysteresisController`].

pub mod hysteresis;

use serde::{Deserialize, Serialize};

/// Irrigation pump output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PumpState {
    #[default]
    Off,
    On,
}

impl PumpState {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Value written to the persisted log's `Pump_State` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }
}

impl core::fmt::Display for PumpState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
