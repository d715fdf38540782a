//! Replay a captured UART byte stream from a file.
//!
//! Bytes are released at the link's line rate (10 bits per byte at the
//! configured baud) and handed out in small reads, so the decoder sees the
//! same fragmented delivery it gets from real hardware.

use std::path::Path;
use std::time::Instant;

use crate::app::ports::ByteSource;
use crate::error::SourceError;

pub struct ReplaySource {
    data: Vec<u8>,
    pos: usize,
    /// Max bytes returned by a single `read`.
    chunk: usize,
    /// `None` releases everything immediately.
    bytes_per_sec: Option<u32>,
    started: Instant,
}

impl ReplaySource {
    pub fn new(data: Vec<u8>, chunk: usize, bytes_per_sec: Option<u32>) -> Self {
        Self {
            data,
            pos: 0,
            chunk: chunk.max(1),
            bytes_per_sec,
            started: Instant::now(),
        }
    }

    /// Load a capture, pacing it like a UART running at `baud_rate`.
    pub fn from_file(path: &Path, chunk: usize, baud_rate: u32) -> Result<Self, SourceError> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data, chunk, Some((baud_rate / 10).max(1))))
    }

    fn arrived(&self) -> usize {
        match self.bytes_per_sec {
            None => self.data.len(),
            Some(rate) => {
                let elapsed = self.started.elapsed().as_secs_f64();
                ((elapsed * f64::from(rate)) as usize).min(self.data.len())
            }
        }
    }
}

impl ByteSource for ReplaySource {
    fn available(&mut self) -> Result<usize, SourceError> {
        Ok(self.arrived().saturating_sub(self.pos))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let ready = self.arrived().saturating_sub(self.pos);
        let n = ready.min(self.chunk).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    /// Every byte of the capture has arrived; unread trailing bytes that
    /// cannot complete a frame may remain.
    fn is_exhausted(&self) -> bool {
        self.arrived() >= self.data.len()
    }
}
