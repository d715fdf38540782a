//! Host wall-clock adapter.
//!
//! Readings are stamped in local time; the history log only keeps
//! `HH:MM:SS`, so second resolution is all that matters downstream.

use chrono::{Local, NaiveDateTime};

use crate::app::ports::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
