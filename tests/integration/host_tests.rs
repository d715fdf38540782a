//! Host loop: stop conditions and link upkeep.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use soilwatch::adapters::replay::ReplaySource;
use soilwatch::app::events::AppEvent;
use soilwatch::app::ports::ByteSource;
use soilwatch::app::service::Engine;
use soilwatch::config::SystemConfig;
use soilwatch::error::SourceError;
use soilwatch::host::{HostLoop, Link, StopReason};
use soilwatch::protocol::{SensorKind, encode_frame};

use crate::mock_io::{EventLog, RecordingSink, ScriptedSource, SnapshotLog, StepClock};

fn engine() -> Engine {
    Engine::new(&SystemConfig::default(), StepClock::new()).expect("valid config")
}

fn fast_loop(stop: &Arc<AtomicBool>) -> HostLoop {
    HostLoop::new(Duration::from_millis(1), Duration::ZERO, Arc::clone(stop))
}

fn scripted(frames: &[[u8; 4]]) -> Box<dyn ByteSource> {
    let mut src = ScriptedSource::new();
    for f in frames {
        src.arrive(f);
    }
    Box::new(src)
}

#[test]
fn stop_flag_ends_a_live_run_after_the_current_tick() {
    let stop = Arc::new(AtomicBool::new(true));
    let mut engine = engine();
    let (mut sink, mut events, mut screen) = (
        RecordingSink::default(),
        EventLog::default(),
        SnapshotLog::default(),
    );

    let link = Link::Live(Box::new(|| {
        Ok::<_, SourceError>(scripted(&[encode_frame(SensorKind::Humidity, 33)]))
    }));
    let summary = fast_loop(&stop).run(&mut engine, link, &mut sink, &mut events, &mut screen);

    assert_eq!(summary.reason, StopReason::Interrupted);
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.history_len, 1, "the in-flight tick is completed");
    assert_eq!(sink.records.len(), 1);
    assert_eq!(screen.snapshots.len(), 1);
}

#[test]
fn replay_stops_once_the_capture_is_drained() {
    let stop = Arc::new(AtomicBool::new(false));
    let mut engine = engine();
    let (mut sink, mut events, mut screen) = (
        RecordingSink::default(),
        EventLog::default(),
        SnapshotLog::default(),
    );

    let mut bytes = Vec::new();
    for v in [40, 28, 36] {
        bytes.extend_from_slice(&encode_frame(SensorKind::Humidity, v));
    }
    // Trailing half frame that never completes.
    bytes.extend_from_slice(&[0xAA, 0x01]);
    let link = Link::Replay(Box::new(ReplaySource::new(bytes, 3, None)));

    let summary = fast_loop(&stop).run(&mut engine, link, &mut sink, &mut events, &mut screen);

    assert_eq!(summary.reason, StopReason::CaptureDrained);
    assert_eq!(summary.history_len, 3);
    assert_eq!(summary.decoder.frames_decoded, 3);
    assert_eq!(sink.records.len(), 3);
}

#[test]
fn replay_source_error_ends_the_run() {
    let stop = Arc::new(AtomicBool::new(false));
    let mut engine = engine();
    let (mut sink, mut events, mut screen) = (
        RecordingSink::default(),
        EventLog::default(),
        SnapshotLog::default(),
    );

    let mut src = ScriptedSource::new();
    src.fail_next = Some(SourceError::Io(std::io::ErrorKind::InvalidData));
    let summary = fast_loop(&stop).run(
        &mut engine,
        Link::Replay(Box::new(src)),
        &mut sink,
        &mut events,
        &mut screen,
    );

    assert_eq!(summary.reason, StopReason::ReplayFailed);
    assert_eq!(summary.ticks, 1);
}

#[test]
fn missing_port_runs_degraded_then_reconnects() {
    let stop = Arc::new(AtomicBool::new(false));
    let attempts = Arc::new(AtomicUsize::new(0));
    let mut engine = engine();
    let (mut sink, mut events, mut screen) = (
        RecordingSink::default(),
        EventLog::default(),
        SnapshotLog::default(),
    );

    let link = {
        let stop = Arc::clone(&stop);
        let attempts = Arc::clone(&attempts);
        Link::Live(Box::new(move || {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(SourceError::Unavailable);
            }
            // Stop after the reconnected link has been ticked once.
            stop.store(true, Ordering::SeqCst);
            Ok(scripted(&[encode_frame(SensorKind::Lux, 512)]))
        }))
    };
    let summary = fast_loop(&stop).run(&mut engine, link, &mut sink, &mut events, &mut screen);

    assert_eq!(summary.reason, StopReason::Interrupted);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(summary.ticks, 2);
    assert_eq!(engine.store().last_lux(), 512);
    assert_eq!(
        events.events.first(),
        Some(&AppEvent::SourceUnavailable(SourceError::Unavailable))
    );
    assert_eq!(events.count(|e| *e == AppEvent::SourceRestored), 1);
    assert!(screen.snapshots[0].window.is_empty(), "degraded tick has no data");
}

#[test]
fn live_link_failure_drops_to_degraded_and_reopens() {
    let stop = Arc::new(AtomicBool::new(false));
    let attempts = Arc::new(AtomicUsize::new(0));
    let mut engine = engine();
    let (mut sink, mut events, mut screen) = (
        RecordingSink::default(),
        EventLog::default(),
        SnapshotLog::default(),
    );

    let link = {
        let stop = Arc::clone(&stop);
        let attempts = Arc::clone(&attempts);
        Link::Live(Box::new(move || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            let mut src = ScriptedSource::new();
            if n == 0 {
                src.fail_next = Some(SourceError::Disconnected);
            } else {
                stop.store(true, Ordering::SeqCst);
                src.arrive(&encode_frame(SensorKind::Humidity, 20));
            }
            Ok(Box::new(src) as Box<dyn ByteSource>)
        }))
    };
    let summary = fast_loop(&stop).run(&mut engine, link, &mut sink, &mut events, &mut screen);

    assert_eq!(summary.reason, StopReason::Interrupted);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(
        events.count(|e| *e == AppEvent::SourceFailed(SourceError::Disconnected)),
        1
    );
    assert_eq!(events.count(|e| *e == AppEvent::SourceRestored), 1);
    assert_eq!(summary.history_len, 1);
}
