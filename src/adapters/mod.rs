//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to               |
//! |----------------|--------------------|---------------------------|
//! | `config_file`  | ConfigPort         | JSON file                 |
//! | `console`      | Renderer           | Terminal status line      |
//! | `csv_sink`     | RecordSink         | Append-only CSV log       |
//! | `log_sink`     | EventSink          | `log` facade              |
//! | `replay`       | ByteSource         | Captured byte file        |
//! | `serial`       | ByteSource         | UART via `serialport`     |
//! | `time`         | Clock              | Host local time           |

pub mod config_file;
pub mod console;
pub mod csv_sink;
pub mod log_sink;
pub mod replay;
pub mod serial;
pub mod time;
