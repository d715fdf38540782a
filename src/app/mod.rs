//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the runtime rules of the monitor: decoding,
//! storage, pump control and snapshotting.  All interaction with devices
//! and files happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without a serial port.

pub mod events;
pub mod ports;
pub mod service;
pub mod snapshot;
