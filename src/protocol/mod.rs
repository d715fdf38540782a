//! Sensor board wire protocol.
//!
//! The FPGA pushes fixed 4-byte frames over a bare UART link with no
//! out-of-band framing:
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬────────────┐
//! │ Header   │ Value hi │ Value lo │ Terminator │
//! │ AA / BB  │          │          │ 0x0A       │
//! └──────────┴──────────┴──────────┴────────────┘
//! ```
//!
//! The header byte doubles as the resynchronisation anchor for
//! [`codec::FrameDecoder`].

pub mod codec;

use serde::{Deserialize, Serialize};

/// Header byte announcing a lux reading.
pub const HEADER_LUX: u8 = 0xAA;

/// Header byte announcing a soil humidity reading.
pub const HEADER_HUMIDITY: u8 = 0xBB;

/// Trailing byte every valid frame must end with.
pub const TERMINATOR: u8 = 0x0A;

/// Total frame size on the wire.
pub const FRAME_LEN: usize = 4;

/// Bytes following the header: value hi, value lo, terminator.
pub const BODY_LEN: usize = FRAME_LEN - 1;

/// Which sensor a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Lux,
    Humidity,
}

impl SensorKind {
    /// Map a header byte to its sensor, `None` for anything else.
    pub const fn from_header(byte: u8) -> Option<Self> {
        match byte {
            HEADER_LUX => Some(Self::Lux),
            HEADER_HUMIDITY => Some(Self::Humidity),
            _ => None,
        }
    }

    pub const fn header(self) -> u8 {
        match self {
            Self::Lux => HEADER_LUX,
            Self::Humidity => HEADER_HUMIDITY,
        }
    }

    /// Short tag used in the persisted log's `Sensor` column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lux => "LUX",
            Self::Humidity => "HUM",
        }
    }

    /// Unit used in the persisted log's `Unit` column.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Lux => "lx",
            Self::Humidity => "%",
        }
    }
}

/// Build a valid frame for `value`.
///
/// The board is the only real producer; this exists for replay captures,
/// tests and fuzzing.
pub const fn encode_frame(kind: SensorKind, value: u16) -> [u8; FRAME_LEN] {
    let [hi, lo] = value.to_be_bytes();
    [kind.header(), hi, lo, TERMINATOR]
}
