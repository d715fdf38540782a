//! Self-synchronising frame decoder.
//!
//! Wire format:
//! ```text
//! ┌────────────┬──────────┬──────────┬────────────┐
//! │ Header (1B)│ Hi (1B)  │ Lo (1B)  │ 0x0A (1B)  │
//! └────────────┴──────────┴──────────┴────────────┘
//! ```
//!
//! The decoder consumes one byte at a time and keeps its partial state
//! between calls.  A single `ByteSource::read` may return part of a
//! frame or a frame and a half; the partial body survives until the next
//! tick delivers the rest.
//!
//! Alignment is recovered by scanning for a header byte.  Anything that is
//! not a header while seeking is skipped; a body whose terminator is wrong
//! is dropped whole (its three bytes are not rescanned) and seeking resumes
//! with the next byte.

use heapless::Vec;
use log::{debug, warn};

use super::{BODY_LEN, FRAME_LEN, SensorKind, TERMINATOR};

/// A frame that passed terminator validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    pub kind: SensorKind,
    pub value: u16,
}

/// Running counters, exposed read-only for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames emitted.
    pub frames_decoded: u64,
    /// Frames dropped for a bad terminator.
    pub frames_rejected: u64,
    /// Non-header bytes skipped while seeking.
    pub bytes_skipped: u64,
}

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Scanning for a header byte.
    SeekingHeader,
    /// Header seen, collecting `[hi, lo, terminator]` into `body`.
    AwaitingBody { kind: SensorKind },
}

/// Streaming frame decoder.
pub struct FrameDecoder {
    state: DecoderState,
    body: Vec<u8, BODY_LEN>,
    stats: DecoderStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::SeekingHeader,
            body: Vec::new(),
            stats: DecoderStats::default(),
        }
    }

    /// Feed one byte into the decoder.
    ///
    /// Returns `Some(DecodedFrame)` when this byte completes a valid frame.
    pub fn feed(&mut self, byte: u8) -> Option<DecodedFrame> {
        match self.state {
            DecoderState::SeekingHeader => {
                match SensorKind::from_header(byte) {
                    Some(kind) => {
                        self.body.clear();
                        self.state = DecoderState::AwaitingBody { kind };
                    }
                    None => self.stats.bytes_skipped += 1,
                }
                None
            }

            DecoderState::AwaitingBody { kind } => {
                // The body is drained as soon as it fills, so this never overflows.
                let _ = self.body.push(byte);
                if self.body.len() < BODY_LEN {
                    return None;
                }

                let frame = match self.body.as_slice() {
                    &[hi, lo, TERMINATOR] => {
                        self.stats.frames_decoded += 1;
                        Some(DecodedFrame {
                            kind,
                            value: u16::from_be_bytes([hi, lo]),
                        })
                    }
                    body => {
                        self.stats.frames_rejected += 1;
                        debug!(
                            "{} frame dropped: terminator 0x{:02X}, resyncing",
                            kind.label(),
                            body[BODY_LEN - 1]
                        );
                        None
                    }
                };

                self.body.clear();
                self.state = DecoderState::SeekingHeader;
                frame
            }
        }
    }

    /// Feed a run of bytes, collecting every frame they complete.
    pub fn feed_slice(&mut self, data: &[u8]) -> std::vec::Vec<DecodedFrame> {
        data.iter().filter_map(|&b| self.feed(b)).collect()
    }

    /// Bytes still needed before the frame in progress can complete.
    ///
    /// A whole frame while seeking; the rest of the body otherwise.
    pub fn bytes_to_complete(&self) -> usize {
        match self.state {
            DecoderState::SeekingHeader => FRAME_LEN,
            DecoderState::AwaitingBody { .. } => BODY_LEN - self.body.len(),
        }
    }

    /// True while a header has been seen but its body is incomplete.
    pub fn is_mid_frame(&self) -> bool {
        matches!(self.state, DecoderState::AwaitingBody { .. })
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Reset decoder state (e.g. after the byte source is reopened).
    ///
    /// Returns `true` if a partially received frame was discarded.
    pub fn reset(&mut self) -> bool {
        let discarded = match self.state {
            DecoderState::AwaitingBody { kind } => {
                warn!(
                    "Discarding partial {} frame ({} of {} body bytes), resyncing",
                    kind.label(),
                    self.body.len(),
                    BODY_LEN
                );
                true
            }
            DecoderState::SeekingHeader => false,
        };
        self.body.clear();
        self.state = DecoderState::SeekingHeader;
        discarded
    }
}
