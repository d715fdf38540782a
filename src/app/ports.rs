//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Engine (domain)
//! ```
//!
//! Driven adapters (serial port, CSV file, console, clock) implement these
//! traits.  The [`Engine`](super::service::Engine) consumes them via
//! generics, so the domain core never touches a device or file directly.

use chrono::NaiveDateTime;

use super::events::AppEvent;
use super::snapshot::Snapshot;
use crate::config::SystemConfig;
use crate::error::{ConfigError, SinkError, SourceError};
use crate::store::history::HistoryRecord;

// ───────────────────────────────────────────────────────────────
// Byte source (driven adapter: UART → domain)
// ───────────────────────────────────────────────────────────────

/// Ordered byte stream from the sensor board.
pub trait ByteSource {
    /// Bytes that can be read right now without waiting.
    fn available(&mut self) -> Result<usize, SourceError>;

    /// Read up to `buf.len()` bytes, waiting at most the adapter's short
    /// timeout.  May return fewer bytes than requested, including 0.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;

    /// True once a finite source (e.g. a replayed capture) has nothing left.
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn available(&mut self) -> Result<usize, SourceError> {
        (**self).available()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read(buf)
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}

// ───────────────────────────────────────────────────────────────
// Record sink (driven adapter: domain → persistent log)
// ───────────────────────────────────────────────────────────────

/// Append-only persistence of history records.
pub trait RecordSink {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), SinkError>;
}

/// `None` means persistence is disabled; records are kept in memory only.
impl<S: RecordSink> RecordSink for Option<S> {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), SinkError> {
        match self {
            Some(sink) => sink.append(record),
            None => Ok(()),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / actuators)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Renderer (driven adapter: snapshot → display)
// ───────────────────────────────────────────────────────────────

/// Consumes point-in-time snapshots between ticks.  Read-only by signature.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Wall-clock source used to stamp decoded readings.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ConfigError::NotFound`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}
