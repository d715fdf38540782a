//! SoilWatch main entry point
//!
//! Hexagonal architecture driven by a fixed-rate host tick.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SerialByteSource  CsvRecordSink  LogEventSink  ConsoleRenderer│
//! │  ReplaySource      (RecordSink)   (EventSink)   (Renderer)     │
//! │  (ByteSource)      JsonConfigFile SystemClock                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Engine (pure logic)                       │    │
//! │  │  FrameDecoder · HysteresisController · DataStore       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};

use soilwatch::adapters::config_file::JsonConfigFile;
use soilwatch::adapters::console::ConsoleRenderer;
use soilwatch::adapters::csv_sink::CsvRecordSink;
use soilwatch::adapters::log_sink::LogEventSink;
use soilwatch::adapters::replay::ReplaySource;
use soilwatch::adapters::time::SystemClock;
use soilwatch::app::ports::{ByteSource, ConfigPort};
use soilwatch::app::service::Engine;
use soilwatch::config::SystemConfig;
use soilwatch::error::SourceError;
use soilwatch::host::{HostLoop, Link};

// ── CLI ───────────────────────────────────────────────────────

/// Monitor the lux / soil-humidity board and drive the irrigation pump.
#[derive(Parser, Debug)]
#[command(name = "soilwatch", version, about)]
struct Cli {
    /// JSON config file (CLI flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port (e.g. /dev/ttyUSB1, COM8)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Real-time window capacity
    #[arg(long)]
    window: Option<usize>,

    /// Pump turns ON below this humidity (%)
    #[arg(long)]
    low: Option<f32>,

    /// Pump turns OFF above this humidity (%)
    #[arg(long)]
    high: Option<f32>,

    /// CSV history log path
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Replay a captured byte stream instead of opening the port
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Max bytes per read while replaying
    #[arg(long, default_value_t = 3)]
    replay_chunk: usize,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,
}

/// Used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn,soilwatch=info";

/// `RUST_LOG` syntax; `--verbose` raises this crate to debug on top of it.
fn log_builder(rust_log: Option<&str>, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(rust_log.unwrap_or(DEFAULT_LOG_FILTER))
        .format_timestamp_secs();
    if verbose {
        builder.filter_module("soilwatch", log::LevelFilter::Debug);
    }
    builder
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    log_builder(rust_log.as_deref(), verbose).init();
}

fn load_config(cli: &Cli) -> Result<SystemConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = JsonConfigFile::new(path);
            file.load()
                .with_context(|| format!("loading config {}", file.path().display()))?
        }
        None => SystemConfig::default(),
    };

    if let Some(port) = &cli.port {
        config.port.clone_from(port);
    }
    if let Some(baud) = cli.baud {
        config.baud_rate = baud;
    }
    if let Some(window) = cli.window {
        config.window_capacity = window;
    }
    if let Some(low) = cli.low {
        config.humidity_low_trigger = low;
    }
    if let Some(high) = cli.high {
        config.humidity_high_reset = high;
    }
    if let Some(path) = &cli.log_path {
        config.log_path.clone_from(path);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

// ── Link management ───────────────────────────────────────────

#[cfg(feature = "serial")]
fn open_link(config: &SystemConfig) -> Result<Box<dyn ByteSource>, SourceError> {
    use soilwatch::adapters::serial::SerialByteSource;
    Ok(Box::new(SerialByteSource::open(config)?))
}

#[cfg(not(feature = "serial"))]
fn open_link(_config: &SystemConfig) -> Result<Box<dyn ByteSource>, SourceError> {
    warn!("Built without the `serial` feature; only --replay can deliver data");
    Err(SourceError::Unavailable)
}

/// Raised by SIGINT / SIGTERM; the host loop stops at the end of its tick.
fn shutdown_flag() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&stop))
            .context("installing shutdown signal handler")?;
    }
    Ok(stop)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("SoilWatch v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let mut engine = Engine::new(&config, SystemClock::new())?;
    let mut events = LogEventSink::new();
    let mut renderer = ConsoleRenderer::stdout();
    let host = HostLoop::from_config(&config, shutdown_flag()?);

    // ── Byte source ───────────────────────────────────────────
    let link = match &cli.replay {
        Some(path) => {
            let replay = ReplaySource::from_file(path, cli.replay_chunk, config.baud_rate)
                .with_context(|| format!("reading capture {}", path.display()))?;
            info!("Replaying {}", path.display());
            Link::Replay(Box::new(replay))
        }
        None => {
            let link_config = config.clone();
            Link::Live(Box::new(move || open_link(&link_config)))
        }
    };

    // ── History log ───────────────────────────────────────────
    let mut records = match CsvRecordSink::open(&config.log_path) {
        Ok(sink) => Some(sink),
        Err(e) => {
            warn!(
                "History log {} unavailable ({}); records kept in memory only",
                config.log_path.display(),
                e
            );
            None
        }
    };

    engine.start(&mut events);
    let summary = host.run(&mut engine, link, &mut records, &mut events, &mut renderer);
    drop(records);

    // End the status line before the summary.
    println!();
    info!(
        "Monitor stopped ({}) after {} ticks: {} frames decoded, {} rejected, {} bytes skipped, {} history records",
        summary.reason,
        summary.ticks,
        summary.decoder.frames_decoded,
        summary.decoder.frames_rejected,
        summary.decoder.bytes_skipped,
        summary.history_len
    );
    Ok(())
}
