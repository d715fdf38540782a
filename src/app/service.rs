//! Application engine: the hexagonal core.
//!
//! [`Engine`] owns the frame decoder, the pump controller and the data
//! store.  It exposes a hardware-agnostic tick API.  All I/O flows through
//! port traits injected at call sites, making the whole engine testable
//! with mock adapters.
//!
//! ```text
//!  ByteSource ──▶ ┌──────────────────────────────┐ ──▶ RecordSink
//!                 │            Engine            │
//!                 │ Decoder · Hysteresis · Store │ ──▶ EventSink
//!                 └──────────────────────────────┘
//!                                │
//!                                ▼
//!                            Snapshot ──▶ Renderer
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::PumpState;
use crate::control::hysteresis::HysteresisController;
use crate::error::{ConfigError, SourceError};
use crate::protocol::SensorKind;
use crate::protocol::codec::{DecodedFrame, DecoderStats, FrameDecoder};
use crate::store::DataStore;

use super::events::{AppEvent, SensorReading};
use super::ports::{ByteSource, Clock, EventSink, RecordSink};
use super::snapshot::Snapshot;

/// Largest single read from the byte source.
const READ_BUF_SIZE: usize = 256;

/// Upper bound on bytes drained per tick, so a flooding source still
/// hands control back to the host loop.
const MAX_BYTES_PER_TICK: usize = 4096;

// ───────────────────────────────────────────────────────────────
// Engine
// ───────────────────────────────────────────────────────────────

/// Decodes the sensor stream and maintains all derived state.
pub struct Engine {
    decoder: FrameDecoder,
    controller: HysteresisController,
    store: DataStore,
    clock: Box<dyn Clock>,
    snapshot_history_len: usize,
    tick_count: u64,
}

impl Engine {
    /// Construct the engine from configuration.
    ///
    /// Rejects configurations that fail [`SystemConfig::validate`].
    pub fn new(config: &SystemConfig, clock: impl Clock + 'static) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller =
            HysteresisController::new(config.humidity_low_trigger, config.humidity_high_reset)?;

        Ok(Self {
            decoder: FrameDecoder::new(),
            controller,
            store: DataStore::new(config.window_capacity),
            clock: Box::new(clock),
            snapshot_history_len: config.snapshot_history_len,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the effective settings.
    pub fn start(&mut self, events: &mut impl EventSink) {
        let (low_trigger, high_reset) = self.controller.thresholds();
        events.emit(&AppEvent::Started {
            window_capacity: self.store.window().capacity(),
            low_trigger,
            high_reset,
        });
        info!(
            "Engine started: window={} pump band {:.1}..={:.1}%",
            self.store.window().capacity(),
            low_trigger,
            high_reset
        );
    }

    /// Drop any partially received frame, e.g. after the source was reopened.
    ///
    /// Returns `true` if a partial frame was discarded.
    pub fn resync(&mut self) -> bool {
        self.decoder.reset()
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one cycle: drain the source → decode → store/control → snapshot.
    ///
    /// A source error ends the drain early; everything decoded before it is
    /// kept, and the error is reported through `events`.
    pub fn tick(
        &mut self,
        source: &mut impl ByteSource,
        records: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) -> Snapshot {
        self.tick_count += 1;

        if let Err(e) = self.drain(source, records, events) {
            warn!("Byte source failed during tick {}: {}", self.tick_count, e);
            events.emit(&AppEvent::SourceFailed(e));
        }

        self.snapshot()
    }

    /// Feed raw bytes straight into the decoder, bypassing any source.
    ///
    /// Returns the number of frames decoded.
    pub fn ingest(
        &mut self,
        bytes: &[u8],
        records: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) -> usize {
        let mut frames = 0;
        for &byte in bytes {
            if let Some(frame) = self.decoder.feed(byte) {
                frames += 1;
                self.route(frame, records, events);
            }
        }
        frames
    }

    // ── Queries ───────────────────────────────────────────────

    /// Point-in-time copy of the window, history tail and pump state.
    pub fn snapshot(&self) -> Snapshot {
        let history = self.store.history();
        Snapshot {
            tick: self.tick_count,
            window: self.store.window().to_vec(),
            window_capacity: self.store.window().capacity(),
            history_tail: history.tail(self.snapshot_history_len).to_vec(),
            history_len: history.len(),
            pump_state: self.controller.state(),
            last_pump_cycle: history.pump_on_spans().pop(),
            thresholds: self.controller.thresholds(),
            decoder: self.decoder.stats(),
        }
    }

    pub fn pump_state(&self) -> PumpState {
        self.controller.state()
    }

    /// Read-only view of the window and history.
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn decoder_stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Read while the source holds enough bytes to finish the frame in
    /// progress (one whole frame while seeking a header).
    fn drain(
        &mut self,
        source: &mut impl ByteSource,
        records: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) -> Result<(), SourceError> {
        let mut buf = [0u8; READ_BUF_SIZE];
        let mut drained = 0;

        while drained < MAX_BYTES_PER_TICK {
            let available = source.available()?;
            if available == 0 || available < self.decoder.bytes_to_complete() {
                break;
            }

            let want = available.min(READ_BUF_SIZE).min(MAX_BYTES_PER_TICK - drained);
            let n = source.read(&mut buf[..want])?;
            if n == 0 {
                // Short timeout expired with nothing delivered.
                break;
            }
            drained += n;
            self.ingest(&buf[..n], records, events);
        }

        if drained > 0 {
            debug!("Tick {}: drained {} bytes", self.tick_count, drained);
        }
        Ok(())
    }

    /// Stamp a decoded frame and apply it to the store and controller.
    fn route(
        &mut self,
        frame: DecodedFrame,
        records: &mut impl RecordSink,
        events: &mut impl EventSink,
    ) {
        let reading = SensorReading {
            kind: frame.kind,
            value: frame.value,
            timestamp: self.clock.now(),
        };
        events.emit(&AppEvent::Reading(reading));

        match reading.kind {
            SensorKind::Lux => self.store.on_lux(&reading),
            SensorKind::Humidity => {
                let before = self.controller.state();
                let after = self.controller.update(reading.value);
                if before != after {
                    events.emit(&AppEvent::PumpChanged {
                        from: before,
                        to: after,
                        humidity: reading.value,
                    });
                }

                let record = *self.store.on_humidity(&reading, after);
                if let Err(error) = records.append(&record) {
                    warn!("History record #{} not persisted: {}", record.sequence, error);
                    events.emit(&AppEvent::SinkFailed {
                        sequence: record.sequence,
                        error,
                    });
                }
            }
        }
    }
}
