//! Single-line terminal status display.
//!
//! Redraws one `\r`-prefixed line whenever the visible values change:
//!
//! ```text
//! [HUM] 31 %   [LUX] 412 lx (peak 980)   pump=ON   band 30.0..=35.0 %   rows=118 @ 14:02:11   cycle #112..=#118
//! ```

use std::io::{self, Stdout, Write};
use std::ops::RangeInclusive;

use log::debug;

use crate::app::ports::Renderer;
use crate::app::snapshot::Snapshot;
use crate::control::PumpState;

pub struct ConsoleRenderer<W: Write = Stdout> {
    out: W,
    last: Option<Shown>,
}

/// Values on the status line, used to skip identical redraws.
#[derive(Debug, Clone, PartialEq)]
struct Shown {
    humidity: u16,
    lux: u16,
    peak_lux: u16,
    pump: PumpState,
    rows: usize,
    cycle: Option<RangeInclusive<u64>>,
}

impl Shown {
    fn of(snap: &Snapshot) -> Self {
        Self {
            humidity: snap.current_humidity(),
            lux: snap.current_lux(),
            peak_lux: snap.max_lux(),
            pump: snap.pump_state,
            rows: snap.history_len,
            cycle: snap.last_pump_cycle.clone(),
        }
    }
}

impl ConsoleRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, snap: &Snapshot) -> io::Result<()> {
        let (low, high) = snap.thresholds;
        write!(
            self.out,
            "\r[HUM] {} %   [LUX] {} lx (peak {})   pump={}   band {:.1}..={:.1} %   rows={}",
            snap.current_humidity(),
            snap.current_lux(),
            snap.max_lux(),
            snap.pump_state,
            low,
            high,
            snap.history_len,
        )?;
        if let Some(rec) = snap.last_record() {
            write!(self.out, " @ {}", rec.timestamp.format("%H:%M:%S"))?;
        }
        if let Some(cycle) = &snap.last_pump_cycle {
            write!(self.out, "   cycle #{}..=#{}", cycle.start(), cycle.end())?;
        }
        self.out.write_all(b"   ")?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) {
        if snapshot.window.is_empty() {
            return;
        }
        let shown = Shown::of(snapshot);
        if self.last.as_ref() == Some(&shown) {
            return;
        }
        // A broken terminal must not stop acquisition.
        if let Err(e) = self.draw(snapshot) {
            debug!("Console render failed: {}", e);
            return;
        }
        self.last = Some(shown);
    }
}
