//! Mock adapters for integration tests.
//!
//! The scripted source delivers bytes in bursts chosen by the test, so a
//! test can reproduce exactly how the UART fragments frames across ticks.

use std::cell::Cell;
use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use soilwatch::app::events::AppEvent;
use soilwatch::app::ports::{ByteSource, Clock, EventSink, RecordSink, Renderer};
use soilwatch::app::snapshot::Snapshot;
use soilwatch::error::{SinkError, SourceError};
use soilwatch::store::history::HistoryRecord;

// ── Byte source ───────────────────────────────────────────────

/// Bytes become available only when the test calls [`arrive`](Self::arrive).
#[derive(Default)]
pub struct ScriptedSource {
    pending: VecDeque<u8>,
    /// Cap on a single `read`, to force short reads.
    pub max_read: Option<usize>,
    /// Returned by the next `available` call, then cleared.
    pub fail_next: Option<SourceError>,
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrive(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl ByteSource for ScriptedSource {
    fn available(&mut self) -> Result<usize, SourceError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        Ok(self.pending.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        self.reads += 1;
        let mut n = buf.len().min(self.pending.len());
        if let Some(max) = self.max_read {
            n = n.min(max);
        }
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

// ── Record sink ───────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub records: Vec<HistoryRecord>,
    /// Every append fails while set.
    pub fail: bool,
}

impl RecordSink for RecordingSink {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Io(std::io::ErrorKind::StorageFull));
        }
        self.records.push(*record);
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Renderer ──────────────────────────────────────────────────

#[derive(Default)]
pub struct SnapshotLog {
    pub snapshots: Vec<Snapshot>,
}

impl Renderer for SnapshotLog {
    fn render(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

// ── Clock ─────────────────────────────────────────────────────

/// Advances one second every time it is read.
pub struct StepClock {
    next: Cell<NaiveDateTime>,
}

impl StepClock {
    pub fn new() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(14, 0, 0))
            .expect("valid start time");
        Self {
            next: Cell::new(start),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.next.get();
        self.next.set(now + TimeDelta::seconds(1));
        now
    }
}
