//! Error types for the telemetry monitor, one enum per port.
//!
//! All variants are `Copy` so they can be carried inside
//! [`AppEvent`](crate::app::events::AppEvent)s without allocation.  The
//! binary wraps them in `anyhow` at the top level.
//!
//! Frame synchronisation failures are deliberately absent: a corrupt or
//! misaligned frame is not an error, the decoder drops it and resyncs.

use core::fmt;
use std::io;

// ---------------------------------------------------------------------------
// Byte source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The port could not be opened (missing device, permissions, busy).
    Unavailable,
    /// The port was open but the device went away.
    Disconnected,
    /// A read did not complete within the configured timeout.
    Timeout,
    /// Any other I/O failure.
    Io(io::ErrorKind),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "byte source unavailable"),
            Self::Disconnected => write!(f, "byte source disconnected"),
            Self::Timeout => write!(f, "read timed out"),
            Self::Io(kind) => write!(f, "I/O error ({kind})"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<io::Error> for SourceError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::Timeout,
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => Self::Unavailable,
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::UnexpectedEof => Self::Disconnected,
            kind => Self::Io(kind),
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence sink errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The underlying file could not be written or flushed.
    Io(io::ErrorKind),
    /// The record could not be encoded as a row.
    Encode,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "I/O error ({kind})"),
            Self::Encode => write!(f, "record encoding failed"),
        }
    }
}

impl std::error::Error for SinkError {}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.kind())
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    Io,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
