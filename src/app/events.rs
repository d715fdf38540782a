//! Outbound application events.
//!
//! The [`Engine`](super::service::Engine) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, drive a relay, forward
//! them to a dashboard, etc.

use chrono::NaiveDateTime;

use crate::control::PumpState;
use crate::error::{SinkError, SourceError};
use crate::protocol::SensorKind;

/// A decoded value stamped with the wall-clock time it was decoded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub value: u16,
    pub timestamp: NaiveDateTime,
}

/// Structured events emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The engine has started (carries its effective settings).
    Started {
        window_capacity: usize,
        low_trigger: f32,
        high_reset: f32,
    },

    /// A frame passed validation.
    Reading(SensorReading),

    /// The hysteresis controller switched the pump.
    PumpChanged {
        from: PumpState,
        to: PumpState,
        humidity: u16,
    },

    /// The byte source could not be opened; running without new readings.
    SourceUnavailable(SourceError),

    /// Reading from the byte source failed mid-tick.
    SourceFailed(SourceError),

    /// The byte source is back after an outage.
    SourceRestored,

    /// A history record could not be persisted.  It is not retried.
    SinkFailed { sequence: u64, error: SinkError },
}
