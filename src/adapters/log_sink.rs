//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the binary).  A relay
//! driver or dashboard bridge would implement the same trait.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                window_capacity,
                low_trigger,
                high_reset,
            } => {
                info!(
                    "START | window={} | pump ON < {:.1}% | pump OFF > {:.1}%",
                    window_capacity, low_trigger, high_reset
                );
            }
            AppEvent::Reading(r) => {
                debug!(
                    "READ  | {} {} {} | {}",
                    r.kind.label(),
                    r.value,
                    r.kind.unit(),
                    r.timestamp.format("%H:%M:%S")
                );
            }
            AppEvent::PumpChanged { from, to, humidity } => {
                info!("PUMP  | {} -> {} | humidity={}%", from, to, humidity);
            }
            AppEvent::SourceUnavailable(e) => {
                warn!("LINK  | unavailable ({}), running without new readings", e);
            }
            AppEvent::SourceFailed(e) => {
                warn!("LINK  | failed: {}", e);
            }
            AppEvent::SourceRestored => {
                info!("LINK  | restored");
            }
            AppEvent::SinkFailed { sequence, error } => {
                warn!("SINK  | record #{} not written: {}", sequence, error);
            }
        }
    }
}
