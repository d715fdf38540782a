//! Hysteresis (Schmitt trigger) controller for the irrigation pump.
//!
//! ```text
//!   pump
//!    On  ─────────────┐◀────────────┐
//!                     │  dead band  │
//!    Off              └────────────▶└──────────
//!        ─────────────┼─────────────┼──────────▶ humidity %
//!                low_trigger    high_reset
//! ```
//!
//! Below `low_trigger` the pump turns on, above `high_reset` it turns off,
//! and inside the band (both bounds inclusive) it holds its last state so a
//! reading hovering around one cutoff cannot make it chatter.

use log::info;

use super::PumpState;
use crate::error::ConfigError;

/// Two-threshold pump controller.
#[derive(Debug, Clone)]
pub struct HysteresisController {
    low_trigger: f32,
    high_reset: f32,
    state: PumpState,
}

impl HysteresisController {
    /// Create a controller in the `Off` state.
    ///
    /// Both thresholds must be finite and `low_trigger < high_reset`.
    pub fn new(low_trigger: f32, high_reset: f32) -> Result<Self, ConfigError> {
        if !low_trigger.is_finite() || !high_reset.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "humidity thresholds must be finite",
            ));
        }
        if low_trigger >= high_reset {
            return Err(ConfigError::ValidationFailed(
                "humidity_low_trigger must be below humidity_high_reset",
            ));
        }
        Ok(Self {
            low_trigger,
            high_reset,
            state: PumpState::Off,
        })
    }

    /// Apply one humidity reading and return the resulting pump state.
    pub fn update(&mut self, humidity: u16) -> PumpState {
        let h = f32::from(humidity);
        let next = if h < self.low_trigger {
            PumpState::On
        } else if h > self.high_reset {
            PumpState::Off
        } else {
            self.state
        };

        if next != self.state {
            info!(
                "Pump {} -> {} at humidity {}% (band {:.1}..={:.1})",
                self.state, next, humidity, self.low_trigger, self.high_reset
            );
            self.state = next;
        }
        self.state
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    /// `(low_trigger, high_reset)`.
    pub fn thresholds(&self) -> (f32, f32) {
        (self.low_trigger, self.high_reset)
    }

    /// Force the pump back to `Off` without touching the thresholds.
    pub fn reset(&mut self) {
        self.state = PumpState::Off;
    }
}
