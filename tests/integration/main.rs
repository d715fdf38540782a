//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  No serial hardware is required.

mod csv_sink_tests;
mod host_tests;
mod mock_io;
