//! Append-only history log.
//!
//! One [`HistoryRecord`] per accepted humidity reading, numbered from 1
//! with no gaps.  Nothing is ever removed during a run; truncation and
//! persistence belong to the record sink.

use core::ops::RangeInclusive;

use chrono::NaiveDateTime;

use crate::control::PumpState;

/// One control decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRecord {
    /// 1-based, contiguous.
    pub sequence: u64,
    pub timestamp: NaiveDateTime,
    pub humidity: u16,
    /// Most recent lux at the time, possibly stale.
    pub lux: u16,
    pub pump_state: PumpState,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with the next sequence number and return it.
    pub fn append(
        &mut self,
        timestamp: NaiveDateTime,
        humidity: u16,
        lux: u16,
        pump_state: PumpState,
    ) -> &HistoryRecord {
        let sequence = self.records.len() as u64 + 1;
        self.records.push(HistoryRecord {
            sequence,
            timestamp,
            humidity,
            lux,
            pump_state,
        });
        &self.records[self.records.len() - 1]
    }

    /// The last `n` records (fewer if the log is shorter), oldest first.
    pub fn tail(&self, n: usize) -> &[HistoryRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Look up a record by its sequence number.
    pub fn get(&self, sequence: u64) -> Option<&HistoryRecord> {
        let idx = usize::try_from(sequence.checked_sub(1)?).ok()?;
        self.records.get(idx)
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximal runs of sequence numbers during which the pump was on.
    ///
    /// These are the irrigation cycles a history view shades.
    pub fn pump_on_spans(&self) -> Vec<RangeInclusive<u64>> {
        let mut spans = Vec::new();
        let mut open: Option<u64> = None;
        for rec in &self.records {
            match (rec.pump_state, open) {
                (PumpState::On, None) => open = Some(rec.sequence),
                (PumpState::Off, Some(start)) => {
                    spans.push(start..=rec.sequence - 1);
                    open = None;
                }
                _ => {}
            }
        }
        if let (Some(start), Some(last)) = (open, self.records.last()) {
            spans.push(start..=last.sequence);
        }
        spans
    }
}
