//! CSV history log against a real file in a temp directory.

use chrono::NaiveDate;
use soilwatch::adapters::csv_sink::CsvRecordSink;
use soilwatch::app::ports::RecordSink;
use soilwatch::control::PumpState;
use soilwatch::store::history::HistoryRecord;
use tempfile::TempDir;

fn record(sequence: u64, humidity: u16, pump_state: PumpState) -> HistoryRecord {
    let timestamp = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(9, 5, 7))
        .expect("valid time");
    HistoryRecord {
        sequence,
        timestamp,
        humidity,
        lux: 512,
        pump_state,
    }
}

#[test]
fn new_file_gets_header_then_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.csv");

    let mut sink = CsvRecordSink::open(&path).unwrap();
    sink.append(&record(1, 31, PumpState::On)).unwrap();
    sink.append(&record(2, 36, PumpState::Off)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Timestamp,Sensor,Value,Unit,Pump_State\n\
         09:05:07,HUM,31,%,ON\n\
         09:05:07,HUM,36,%,OFF\n"
    );
}

#[test]
fn reopening_appends_without_second_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.csv");

    {
        let mut sink = CsvRecordSink::open(&path).unwrap();
        sink.append(&record(1, 40, PumpState::Off)).unwrap();
    }
    {
        let mut sink = CsvRecordSink::open(&path).unwrap();
        sink.append(&record(1, 28, PumpState::On)).unwrap();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.iter().filter(|l| l.starts_with("Timestamp")).count(), 1);
    assert_eq!(lines[2], "09:05:07,HUM,28,%,ON");
}

#[test]
fn rows_are_visible_before_the_sink_is_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.csv");

    let mut sink = CsvRecordSink::open(&path).unwrap();
    sink.append(&record(1, 33, PumpState::Off)).unwrap();

    let text = std::fs::read_to_string(sink.path()).unwrap();
    assert!(text.ends_with("09:05:07,HUM,33,%,OFF\n"));
}

#[test]
fn unwritable_location_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("log.csv");
    assert!(CsvRecordSink::open(&path).is_err());
}

#[test]
fn empty_existing_file_still_gets_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.csv");
    std::fs::write(&path, "").unwrap();

    let mut sink = CsvRecordSink::open(&path).unwrap();
    sink.append(&record(1, 29, PumpState::On)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Timestamp,Sensor,Value,Unit,Pump_State\n09:05:07,HUM,29,%,ON\n"
    );
}
