//! UART byte source.
//!
//! - **`feature = "serial"`**: [`SerialByteSource`] wraps a `serialport`
//!   handle opened with a short read timeout, so an idle link hands
//!   control back to the tick loop instead of stalling it.
//! - [`DisconnectedSource`] stands in while the port is missing; it never
//!   yields bytes, which keeps the engine and renderer running on whatever
//!   history already exists.

use crate::app::ports::ByteSource;
use crate::error::SourceError;

#[cfg(feature = "serial")]
pub use serial_impl::SerialByteSource;

#[cfg(feature = "serial")]
mod serial_impl {
    use std::io::{self, Read};
    use std::time::Duration;

    use log::{info, warn};
    use serialport::{ClearBuffer, SerialPort};

    use crate::app::ports::ByteSource;
    use crate::config::SystemConfig;
    use crate::error::SourceError;

    /// Sensor board link over a host serial port.
    pub struct SerialByteSource {
        port: Box<dyn SerialPort>,
    }

    impl SerialByteSource {
        /// Open `config.port` at `config.baud_rate` and discard stale input.
        pub fn open(config: &SystemConfig) -> Result<Self, SourceError> {
            let port = serialport::new(&config.port, config.baud_rate)
                .timeout(Duration::from_millis(config.read_timeout_ms))
                .open()
                .map_err(|e| {
                    warn!("Could not open {}: {}", config.port, e);
                    SourceError::Unavailable
                })?;

            if let Err(e) = port.clear(ClearBuffer::Input) {
                warn!("{}: could not clear input buffer: {}", config.port, e);
            }
            info!("Connected to {} at {} baud", config.port, config.baud_rate);

            Ok(Self { port })
        }
    }

    fn runtime_error(e: &serialport::Error) -> SourceError {
        match e.kind() {
            serialport::ErrorKind::NoDevice => SourceError::Disconnected,
            serialport::ErrorKind::Io(kind) => io::Error::from(kind).into(),
            _ => SourceError::Io(io::ErrorKind::Other),
        }
    }

    impl ByteSource for SerialByteSource {
        fn available(&mut self) -> Result<usize, SourceError> {
            self.port
                .bytes_to_read()
                .map(|n| n as usize)
                .map_err(|e| runtime_error(&e))
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
            match self.port.read(buf) {
                Ok(n) => Ok(n),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// A source with no device behind it.  Used in degraded mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedSource;

impl ByteSource for DisconnectedSource {
    fn available(&mut self) -> Result<usize, SourceError> {
        Ok(0)
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, SourceError> {
        Ok(0)
    }
}
