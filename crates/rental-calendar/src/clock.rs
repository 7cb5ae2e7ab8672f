//! Wall-clock source for "today" and "now".
//!
//! Nothing in this crate reads the system clock directly. Callers inject a
//! [`Clock`] so that calendar computations stay deterministic under test.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::date::CanonicalDate;
use crate::error::Result;
use crate::time::CanonicalTime;

/// Provides the current wall-clock (local, timezone-free) date and time.
pub trait Clock: Send + Sync {
    /// The current local date and time as read off a wall clock.
    fn now(&self) -> NaiveDateTime;

    /// The current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the host's local time through [`chrono::Local`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// A clock frozen at `date` and `time`.
    pub fn at(date: CanonicalDate, time: CanonicalTime) -> Self {
        Self::new(date.as_naive().and_time(time.as_naive()))
    }

    /// Convenience constructor from raw components.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`CanonicalDate::new`] and
    /// [`CanonicalTime::new`].
    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self> {
        Ok(Self::at(
            CanonicalDate::new(year, month, day)?,
            CanonicalTime::new(hour, minute)?,
        ))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
