//! # rental-calendar
//!
//! Deterministic calendar computation for rental booking forms.
//!
//! Dates are handled as plain Gregorian year/month/day values and times as
//! 24-hour wall-clock values. No timezone ever enters the picture, and the
//! current date comes from an injected [`Clock`], so every function here is
//! reproducible under test.
//!
//! ## Modules
//!
//! - [`date`] — canonical `YYYY-MM-DD` dates: parsing, formatting, display
//! - [`time`] — 24-hour storage ↔ 12-hour display conversion
//! - [`grid`] — month grids with leading blanks for date pickers
//! - [`constraint`] — inclusive minimum-date gating
//! - [`duration`] — calendar-unit addition and elapsed rental duration
//! - [`quote`] — duration × rate, and the booking-service payload
//! - [`picker`] — date-picker and time-picker interaction state machines
//! - [`clock`] — injected wall-clock source
//! - [`error`] — error types

pub mod clock;
pub mod constraint;
pub mod date;
pub mod duration;
pub mod error;
pub mod grid;
pub mod picker;
pub mod quote;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constraint::{dropoff_min_date, is_canonical_date_disabled, is_date_disabled};
pub use date::{
    days_in_month, display_canonical_date, display_or_placeholder, format_canonical_date,
    is_leap_year, parse_canonical_date, today, CanonicalDate, DATE_PLACEHOLDER,
};
pub use duration::{
    add_calendar_units, duration_between, DateRange, DateTimePoint, DurationUnit, RentalDuration,
};
pub use error::{CalendarError, Result};
pub use grid::{
    compute_calendar_grid, compute_calendar_grid_with_options, CalendarMonth, GridCell,
    GridOptions, WeekStartDay,
};
pub use picker::{DatePicker, DatePickerState, TimePicker, TimePickerOptions};
pub use quote::{quote, BookingRequest, RentalQuote};
pub use time::{parse_display_time, to_12_hour, to_24_hour, CanonicalTime, DisplayTime, Period};
