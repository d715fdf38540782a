//! Point-in-time copies of engine state handed to renderers.

use std::ops::RangeInclusive;

use crate::control::PumpState;
use crate::protocol::codec::DecoderStats;
use crate::store::history::HistoryRecord;
use crate::store::window::WindowEntry;

/// Owned copy of everything a display needs.  Taking one never borrows the
/// engine, so a renderer cannot observe a half-applied tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Tick that produced this snapshot (0 before the first tick).
    pub tick: u64,
    /// Real-time window, oldest first.
    pub window: Vec<WindowEntry>,
    pub window_capacity: usize,
    /// Most recent history records, oldest first.
    pub history_tail: Vec<HistoryRecord>,
    /// Total records in the history log.
    pub history_len: usize,
    pub pump_state: PumpState,
    /// Most recent irrigation cycle as a range of record sequence numbers.
    /// Still open while the pump runs.
    pub last_pump_cycle: Option<RangeInclusive<u64>>,
    /// `(low_trigger, high_reset)`.
    pub thresholds: (f32, f32),
    pub decoder: DecoderStats,
}

impl Snapshot {
    pub fn latest(&self) -> Option<&WindowEntry> {
        self.window.last()
    }

    /// Humidity shown by the live view, 0 before any data.
    pub fn current_humidity(&self) -> u16 {
        self.latest().map_or(0, |e| e.humidity)
    }

    pub fn current_lux(&self) -> u16 {
        self.latest().map_or(0, |e| e.lux)
    }

    /// Largest lux in the window, for axis scaling.
    pub fn max_lux(&self) -> u16 {
        self.window.iter().map(|e| e.lux).max().unwrap_or(0)
    }

    /// Newest control decision.
    pub fn last_record(&self) -> Option<&HistoryRecord> {
        self.history_tail.last()
    }
}
