//! Decoded-data store: the live window and the control history.
//!
//! Lux and humidity frames arrive independently with no shared sequence
//! number, so the two containers are updated asymmetrically:
//!
//! ```text
//!              ┌──────────────────────────┐
//!  Lux ───────▶│ window: new entry,        │
//!              │ humidity carried forward  │
//!              └──────────────────────────┘
//!              ┌──────────────────────────┐     ┌─────────────────┐
//!  Humidity ──▶│ window: overwrite latest  │────▶│ history: append │
//!              │ entry's humidity          │     │ (lux carried)   │
//!              └──────────────────────────┘     └─────────────────┘
//! ```
//!
//! The window's x-axis follows lux cadence; the history has exactly one row
//! per humidity reading, i.e. per pump decision.  Lux changes between two
//! humidity readings therefore never show up in the history.

pub mod history;
pub mod window;

use crate::app::events::SensorReading;
use crate::control::PumpState;
use history::{HistoryLog, HistoryRecord};
use window::{RealTimeWindow, WindowEntry};

/// Owns both views.  Mutated only by the [`Engine`](crate::app::service::Engine).
#[derive(Debug, Clone)]
pub struct DataStore {
    window: RealTimeWindow,
    history: HistoryLog,
}

impl DataStore {
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window: RealTimeWindow::new(window_capacity),
            history: HistoryLog::new(),
        }
    }

    /// Record a lux reading as a new window point.
    pub fn on_lux(&mut self, reading: &SensorReading) {
        let humidity = self.window.latest().map_or(0, |e| e.humidity);
        self.window.push(WindowEntry {
            timestamp: reading.timestamp,
            lux: reading.value,
            humidity,
        });
    }

    /// Record a humidity reading together with the pump decision it produced.
    pub fn on_humidity(&mut self, reading: &SensorReading, pump_state: PumpState) -> &HistoryRecord {
        match self.window.latest_mut() {
            Some(latest) => latest.humidity = reading.value,
            None => {
                self.window.push(WindowEntry {
                    timestamp: reading.timestamp,
                    lux: 0,
                    humidity: reading.value,
                });
            }
        }

        let lux = self.last_lux();
        self.history
            .append(reading.timestamp, reading.value, lux, pump_state)
    }

    /// Lux of the newest window point, 0 before any data.
    pub fn last_lux(&self) -> u16 {
        self.window.latest().map_or(0, |e| e.lux)
    }

    /// Humidity of the newest window point, 0 before any data.
    pub fn last_humidity(&self) -> u16 {
        self.window.latest().map_or(0, |e| e.humidity)
    }

    pub fn window(&self) -> &RealTimeWindow {
        &self.window
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}
