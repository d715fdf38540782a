//! Fixed-rate host loop around the [`Engine`].
//!
//! Owns the link lifecycle the engine knows nothing about: degraded mode
//! while the port is missing, periodic reopen attempts, and an orderly stop
//! on a shutdown request or when a replayed capture runs dry.
//!
//! ```text
//!   ┌──────── every tick_interval ────────┐
//!   │ engine.tick ─▶ render ─▶ stop? ─▶ link upkeep ─▶ sleep
//!   └─────────────────────────────────────┘
//! ```

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::adapters::serial::DisconnectedSource;
use crate::app::events::AppEvent;
use crate::app::ports::{ByteSource, EventSink, RecordSink, Renderer};
use crate::app::service::Engine;
use crate::config::SystemConfig;
use crate::error::SourceError;
use crate::protocol::codec::DecoderStats;

/// Opens (or reopens) the live link.
pub type Opener = Box<dyn FnMut() -> Result<Box<dyn ByteSource>, SourceError>>;

/// Where bytes come from.
pub enum Link {
    /// A finite capture.  The run ends when it is drained or fails.
    Replay(Box<dyn ByteSource>),
    /// A live port.  Failures drop to degraded mode and the port is reopened.
    Live(Opener),
}

/// Why [`HostLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// SIGINT / SIGTERM or another holder of the stop flag.
    Interrupted,
    /// Every byte of the capture arrived and nothing more decodes.
    CaptureDrained,
    /// The replay source returned an error.
    ReplayFailed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted => write!(f, "interrupted"),
            Self::CaptureDrained => write!(f, "capture drained"),
            Self::ReplayFailed => write!(f, "replay source failed"),
        }
    }
}

/// Totals reported once the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub ticks: u64,
    pub decoder: DecoderStats,
    pub history_len: usize,
}

/// Forwards events and remembers whether the link failed this tick.
struct FailureWatch<'a, E> {
    inner: &'a mut E,
    source_failed: bool,
}

impl<E: EventSink> FailureWatch<'_, E> {
    fn take(&mut self) -> bool {
        std::mem::take(&mut self.source_failed)
    }
}

impl<E: EventSink> EventSink for FailureWatch<'_, E> {
    fn emit(&mut self, event: &AppEvent) {
        if matches!(event, AppEvent::SourceFailed(_)) {
            self.source_failed = true;
        }
        self.inner.emit(event);
    }
}

pub struct HostLoop {
    tick: Duration,
    reconnect: Duration,
    stop: Arc<AtomicBool>,
}

impl HostLoop {
    pub fn new(tick: Duration, reconnect: Duration, stop: Arc<AtomicBool>) -> Self {
        Self {
            tick,
            reconnect,
            stop,
        }
    }

    /// Tick at `config.tick_interval_ms`, retrying a lost port every
    /// `config.reconnect_interval_secs` (at least one second).
    pub fn from_config(config: &SystemConfig, stop: Arc<AtomicBool>) -> Self {
        Self::new(
            Duration::from_millis(config.tick_interval_ms),
            Duration::from_secs(config.reconnect_interval_secs.max(1)),
            stop,
        )
    }

    /// Drive `engine` until stopped.  The source is dropped, closing the
    /// port, before this returns.
    pub fn run(
        &self,
        engine: &mut Engine,
        link: Link,
        records: &mut impl RecordSink,
        events: &mut impl EventSink,
        renderer: &mut impl Renderer,
    ) -> RunSummary {
        let mut events = FailureWatch {
            inner: events,
            source_failed: false,
        };
        let mut retry_at: Option<Instant> = None;

        let (mut source, mut opener) = match link {
            Link::Replay(source) => (source, None),
            Link::Live(mut open) => {
                let source = match open() {
                    Ok(source) => source,
                    Err(e) => {
                        // Degraded mode: keep ticking and rendering without new data.
                        events.emit(&AppEvent::SourceUnavailable(e));
                        retry_at = Some(Instant::now() + self.reconnect);
                        Box::new(DisconnectedSource) as Box<dyn ByteSource>
                    }
                };
                (source, Some(open))
            }
        };

        let mut last_stats = None;
        let reason = loop {
            let started = Instant::now();

            let snapshot = engine.tick(&mut source, records, &mut events);
            renderer.render(&snapshot);
            let failed = events.take();

            if self.stop.load(Ordering::Relaxed) {
                break StopReason::Interrupted;
            }

            match opener.as_mut() {
                None => {
                    if failed {
                        break StopReason::ReplayFailed;
                    }
                    // Done once the whole capture has arrived and a tick made no progress.
                    if source.is_exhausted() && last_stats == Some(snapshot.decoder) {
                        break StopReason::CaptureDrained;
                    }
                    last_stats = Some(snapshot.decoder);
                }
                Some(open) => {
                    if failed {
                        source = Box::new(DisconnectedSource);
                        retry_at = Some(Instant::now() + self.reconnect);
                    }
                    if retry_at.is_some_and(|at| Instant::now() >= at) {
                        match open() {
                            Ok(link) => {
                                source = link;
                                engine.resync();
                                events.emit(&AppEvent::SourceRestored);
                                retry_at = None;
                            }
                            Err(_) => retry_at = Some(Instant::now() + self.reconnect),
                        }
                    }
                }
            }

            thread::sleep(self.tick.saturating_sub(started.elapsed()));
        };

        drop(source);
        info!("Byte source closed ({})", reason);

        RunSummary {
            reason,
            ticks: engine.tick_count(),
            decoder: engine.decoder_stats(),
            history_len: engine.store().history().len(),
        }
    }
}
