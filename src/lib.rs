//! SoilWatch library.
//!
//! Exposes the pure-logic modules (decoder, controller, store, engine) for
//! integration testing and for hosts other than the bundled binary.  All
//! device and file access lives in [`adapters`] behind the port traits in
//! [`app::ports`]; [`host`] runs the fixed-rate loop over them.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod protocol;
pub mod store;

pub mod adapters;
pub mod host;
