//! System configuration parameters
//!
//! All tunable parameters for the monitor.  Values come from defaults, an
//! optional JSON file (see [`JsonConfigFile`](crate::adapters::config_file::JsonConfigFile))
//! and finally command-line overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Serial link ---
    /// Serial port identifier (e.g. `/dev/ttyUSB1`, `COM8`)
    pub port: String,
    /// UART baud rate
    pub baud_rate: u32,
    /// Per-read timeout so an idle port yields promptly (milliseconds)
    pub read_timeout_ms: u64,
    /// Retry interval for reopening a missing port (seconds)
    pub reconnect_interval_secs: u64,

    // --- Timing ---
    /// Host tick interval (milliseconds)
    pub tick_interval_ms: u64,

    // --- Storage ---
    /// Number of points kept in the real-time window
    pub window_capacity: usize,
    /// History records included in each snapshot
    pub snapshot_history_len: usize,
    /// CSV log file
    pub log_path: PathBuf,

    // --- Pump hysteresis ---
    /// Pump turns ON below this humidity (%)
    pub humidity_low_trigger: f32,
    /// Pump turns OFF above this humidity (%)
    pub humidity_high_reset: f32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Serial link
            port: "/dev/ttyUSB1".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 100,
            reconnect_interval_secs: 5,

            // Timing
            tick_interval_ms: 100, // 10 Hz

            // Storage
            window_capacity: 50,
            snapshot_history_len: 200,
            log_path: PathBuf::from("sensor_pump_data.csv"),

            // Hysteresis
            humidity_low_trigger: 30.0,
            humidity_high_reset: 35.0,
        }
    }
}

impl SystemConfig {
    /// Reject values the engine cannot run with.  Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("port must not be empty"));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::ValidationFailed("baud_rate must be > 0"));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("read_timeout_ms must be > 0"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.window_capacity == 0 {
            return Err(ConfigError::ValidationFailed("window_capacity must be > 0"));
        }
        if !self.humidity_low_trigger.is_finite() || !self.humidity_high_reset.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "humidity thresholds must be finite",
            ));
        }
        if self.humidity_low_trigger >= self.humidity_high_reset {
            return Err(ConfigError::ValidationFailed(
                "humidity_low_trigger must be below humidity_high_reset",
            ));
        }
        Ok(())
    }
}
