//! CSV history log.
//!
//! One row per history record:
//!
//! ```text
//! Timestamp,Sensor,Value,Unit,Pump_State
//! 14:02:11,HUM,31,%,ON
//! ```
//!
//! The header is written exactly once, when the file is empty.  A file
//! that already holds rows is only ever appended to.  Each row is flushed as it is
//! written so a killed process loses at most the row in flight.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::RecordSink;
use crate::error::SinkError;
use crate::protocol::SensorKind;
use crate::store::history::HistoryRecord;

/// Column names, in order.
pub const HEADER: [&str; 5] = ["Timestamp", "Sensor", "Value", "Unit", "Pump_State"];

pub struct CsvRecordSink {
    writer: csv::Writer<File>,
    path: PathBuf,
}

fn csv_error(e: &csv::Error) -> SinkError {
    match e.kind() {
        csv::ErrorKind::Io(io) => SinkError::Io(io.kind()),
        _ => SinkError::Encode,
    }
}

impl CsvRecordSink {
    /// Open `path` for appending, creating it with a header row if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        // An empty file also covers one left behind by a failed header write.
        let fresh = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if fresh {
            writer.write_record(HEADER).map_err(|e| csv_error(&e))?;
            writer.flush()?;
            info!("Started history log {}", path.display());
        } else {
            info!("Appending to history log {}", path.display());
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvRecordSink {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), SinkError> {
        let kind = SensorKind::Humidity;
        self.writer
            .write_record([
                record.timestamp.format("%H:%M:%S").to_string().as_str(),
                kind.label(),
                record.humidity.to_string().as_str(),
                kind.unit(),
                record.pump_state.as_str(),
            ])
            .map_err(|e| csv_error(&e))?;
        self.writer.flush()?;
        Ok(())
    }
}
