//! Interaction models for the date and time pickers.
//!
//! The two pickers commit at different granularities:
//!
//! - [`DatePicker`] commits as soon as a day is clicked (or "Clear"/"Today"
//!   is pressed) and closes in the same step.
//! - [`TimePicker`] stages hour, minute and period in a draft while open;
//!   only [`TimePicker::apply`] commits. Dismissing drops the draft.
//!
//! Both are plain state machines. A rendering layer reads their state after
//! each transition and forwards pointer/keyboard events as method calls.

use chrono::Timelike;
use serde::Deserialize;
use tracing::debug;

use crate::clock::Clock;
use crate::constraint::is_date_disabled;
use crate::date::{self, CanonicalDate, DATE_PLACEHOLDER};
use crate::error::{CalendarError, Result};
use crate::grid::{CalendarMonth, GridCell, GridOptions};
use crate::time::{display_time_or_placeholder, CanonicalTime, Period};

// ── Date picker ─────────────────────────────────────────────────────────────

/// Whether the date picker is showing a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePickerState {
    Closed,
    Open(CalendarMonth),
}

/// A rendered day of an open date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CanonicalDate,
    pub disabled: bool,
    pub selected: bool,
    pub today: bool,
}

/// A rendered cell of an open date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerCell {
    Blank,
    Day(DayCell),
}

/// Commit-on-select date picker.
#[derive(Debug, Clone)]
pub struct DatePicker {
    value: Option<CanonicalDate>,
    min_date: Option<CanonicalDate>,
    options: GridOptions,
    state: DatePickerState,
}

impl DatePicker {
    pub fn new(value: Option<CanonicalDate>) -> Self {
        Self {
            value,
            min_date: None,
            options: GridOptions::default(),
            state: DatePickerState::Closed,
        }
    }

    pub fn with_min_date(mut self, min_date: Option<CanonicalDate>) -> Self {
        self.min_date = min_date;
        self
    }

    pub fn with_options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the inclusive minimum, e.g. when the pickup date changes and
    /// the drop-off picker must follow it.
    pub fn set_min_date(&mut self, min_date: Option<CanonicalDate>) {
        self.min_date = min_date;
    }

    pub fn value(&self) -> Option<CanonicalDate> {
        self.value
    }

    pub fn min_date(&self) -> Option<CanonicalDate> {
        self.min_date
    }

    pub fn state(&self) -> DatePickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DatePickerState::Open(_))
    }

    /// The committed value for the input field, or the placeholder.
    pub fn display_value(&self) -> String {
        self.value
            .map(|d| d.to_display())
            .unwrap_or_else(|| DATE_PLACEHOLDER.to_string())
    }

    /// Open on the committed value's month, or on today's month.
    pub fn open(&mut self, clock: &dyn Clock) {
        let anchor = self.value.unwrap_or_else(|| date::today(clock));
        let month = CalendarMonth::of(anchor);
        debug!(%month, "Opening date picker");
        self.state = DatePickerState::Open(month);
    }

    pub fn next_month(&mut self) {
        self.navigate(CalendarMonth::next);
    }

    pub fn prev_month(&mut self) {
        self.navigate(CalendarMonth::prev);
    }

    fn navigate(&mut self, step: fn(&CalendarMonth) -> Option<CalendarMonth>) {
        if let DatePickerState::Open(month) = self.state {
            if let Some(month) = step(&month) {
                debug!(%month, "Navigated");
                self.state = DatePickerState::Open(month);
            }
        }
    }

    /// Commit `day` of the shown month and close.
    ///
    /// Returns `false`, leaving the picker open, when the day does not exist
    /// or is before the minimum date. Does nothing while closed.
    pub fn select_day(&mut self, day: u32) -> bool {
        let DatePickerState::Open(month) = self.state else {
            return false;
        };
        match month.date(day) {
            Ok(date) => self.commit(date),
            Err(e) => {
                debug!(%e, "Ignoring click on a day outside the month");
                false
            }
        }
    }

    /// Commit today's date and close, unless today is before the minimum.
    pub fn select_today(&mut self, clock: &dyn Clock) -> bool {
        if !self.is_open() {
            return false;
        }
        self.commit(date::today(clock))
    }

    /// Commit an empty value and close.
    pub fn clear(&mut self) {
        if self.is_open() {
            debug!("Cleared date");
            self.value = None;
            self.state = DatePickerState::Closed;
        }
    }

    /// Close without committing anything.
    pub fn dismiss(&mut self) {
        self.state = DatePickerState::Closed;
    }

    fn commit(&mut self, date: CanonicalDate) -> bool {
        if is_date_disabled(&date, self.min_date.as_ref()) {
            debug!(%date, min_date = ?self.min_date, "Ignoring disabled date");
            return false;
        }
        debug!(%date, "Committed date");
        self.value = Some(date);
        self.state = DatePickerState::Closed;
        true
    }

    /// Cells of the shown month with selection state; empty while closed.
    pub fn cells(&self, clock: &dyn Clock) -> Vec<PickerCell> {
        let DatePickerState::Open(month) = self.state else {
            return Vec::new();
        };
        let today = date::today(clock);

        month
            .cells(&self.options)
            .into_iter()
            .map(|cell| match cell {
                GridCell::Blank => PickerCell::Blank,
                GridCell::Day(day) => match month.date(day) {
                    Ok(date) => PickerCell::Day(DayCell {
                        date,
                        disabled: is_date_disabled(&date, self.min_date.as_ref()),
                        selected: self.value == Some(date),
                        today: date == today,
                    }),
                    Err(_) => PickerCell::Blank,
                },
            })
            .collect()
    }
}

// ── Time picker ─────────────────────────────────────────────────────────────

/// Options for [`TimePicker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimePickerOptions {
    /// Staged minutes snap down to a multiple of this step (1-60).
    pub minute_step: u32,
}

impl Default for TimePickerOptions {
    fn default() -> Self {
        Self { minute_step: 1 }
    }
}

impl TimePickerOptions {
    fn snap(&self, minute: u32) -> u32 {
        let step = self.minute_step.clamp(1, 60);
        minute - minute % step
    }
}

/// Uncommitted hour/minute/period selection of an open time picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDraft {
    pub hour12: u32,
    pub minute: u32,
    pub period: Period,
}

impl TimeDraft {
    fn from_time(time: CanonicalTime) -> Self {
        let display = time.to_display();
        Self {
            hour12: display.hour12(),
            minute: display.minute(),
            period: display.period(),
        }
    }

    fn to_time(self) -> Result<CanonicalTime> {
        CanonicalTime::from_12_hour(self.hour12, self.minute, self.period)
    }
}

/// Stage-then-apply time picker.
#[derive(Debug, Clone, Default)]
pub struct TimePicker {
    committed: Option<CanonicalTime>,
    draft: Option<TimeDraft>,
    options: TimePickerOptions,
}

impl TimePicker {
    pub fn new(committed: Option<CanonicalTime>) -> Self {
        Self {
            committed,
            draft: None,
            options: TimePickerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TimePickerOptions) -> Self {
        self.options = options;
        self
    }

    /// The committed time; unaffected by anything staged.
    pub fn value(&self) -> Option<CanonicalTime> {
        self.committed
    }

    pub fn draft(&self) -> Option<TimeDraft> {
        self.draft
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// The committed value in 12-hour form, or the placeholder.
    pub fn display_value(&self) -> String {
        display_time_or_placeholder(self.committed)
    }

    /// Open with a draft seeded from the committed value, or from the
    /// clock's current time when nothing is committed yet. Opening an
    /// already open picker keeps the staged draft.
    pub fn open(&mut self, clock: &dyn Clock) {
        if self.draft.is_some() {
            return;
        }
        let seed = match self.committed {
            Some(time) => time,
            None => {
                let now = clock.now();
                CanonicalTime::new(now.hour(), self.options.snap(now.minute()))
                    .unwrap_or(CanonicalTime::MIDNIGHT)
            }
        };
        debug!(%seed, "Opening time picker");
        self.draft = Some(TimeDraft::from_time(seed));
    }

    /// Stage a 12-hour clock hour.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidHour`] when `hour12` is outside 1-12.
    pub fn stage_hour(&mut self, hour12: u32) -> Result<()> {
        if !(1..=12).contains(&hour12) {
            return Err(CalendarError::InvalidHour(format!(
                "{hour12} is outside 1-12"
            )));
        }
        if let Some(draft) = self.draft.as_mut() {
            draft.hour12 = hour12;
        }
        Ok(())
    }

    /// Stage a minute, snapped down to the configured step.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] when `minute` is outside 0-59.
    pub fn stage_minute(&mut self, minute: u32) -> Result<()> {
        if minute > 59 {
            return Err(CalendarError::InvalidTime(format!(
                "minute {minute} is outside 0-59"
            )));
        }
        let minute = self.options.snap(minute);
        if let Some(draft) = self.draft.as_mut() {
            draft.minute = minute;
        }
        Ok(())
    }

    pub fn stage_period(&mut self, period: Period) {
        if let Some(draft) = self.draft.as_mut() {
            draft.period = period;
        }
    }

    /// Commit the draft and close. Returns the newly committed time, or
    /// `None` when the picker was not open.
    pub fn apply(&mut self) -> Option<CanonicalTime> {
        let draft = self.draft.take()?;
        match draft.to_time() {
            Ok(time) => {
                debug!(%time, "Committed time");
                self.committed = Some(time);
                Some(time)
            }
            Err(e) => {
                // Drafts are only ever built from validated components.
                debug!(%e, ?draft, "Discarding unrepresentable draft");
                None
            }
        }
    }

    /// Close and throw the draft away; the committed value is untouched.
    pub fn dismiss(&mut self) {
        if self.draft.take().is_some() {
            debug!("Discarded staged time");
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
