//! Canonical calendar dates and their textual forms.
//!
//! A [`CanonicalDate`] is a plain Gregorian date with no timezone attached.
//! Parsing and formatting work on the integer year/month/day components
//! directly, so a date typed as `"2025-06-10"` is always June 10th no matter
//! which UTC offset the host happens to run in.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clock::Clock;
use crate::error::{CalendarError, Result};

/// Smallest year representable in the fixed-width `YYYY` form.
pub const MIN_YEAR: i32 = 1;
/// Largest year representable in the fixed-width `YYYY` form.
pub const MAX_YEAR: i32 = 9999;

/// Text shown in place of a date when nothing (valid) is selected.
pub const DATE_PLACEHOLDER: &str = "Select date";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Gregorian helpers ───────────────────────────────────────────────────────

/// Gregorian leap-year rule: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Full English month name ("June") for a month number, if valid.
pub fn month_name(month: u32) -> Option<&'static str> {
    month_index(month).map(|i| MONTH_NAMES[i])
}

/// Three-letter English month abbreviation ("Jun") for a month number, if valid.
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    month_index(month).map(|i| MONTH_ABBREVIATIONS[i])
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| (month - 1) as usize)
}

// ── CanonicalDate ───────────────────────────────────────────────────────────

/// A valid Gregorian date between years 1 and 9999.
///
/// Ordering is the `(year, month, day)` tuple ordering. Values are immutable;
/// every arithmetic operation returns a new date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Build a date from its components.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] for a month outside 1-12 and
    /// [`CalendarError::InvalidDate`] for a year outside 1-9999 or a day
    /// outside the month.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidDate(format!(
                "year {year} is outside {MIN_YEAR}-{MAX_YEAR}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(format!("{month}")));
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} is outside 1-{max_day} for {}",
                format_year_month(year, month)
            )));
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                CalendarError::InvalidDate(format_canonical_date(year, month, day))
            })
    }

    /// Wrap a chrono date, rejecting years the canonical form cannot hold.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Overflow`] when the year falls outside 1-9999.
    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(CalendarError::Overflow(format!(
                "{date} is outside years {MIN_YEAR}-{MAX_YEAR}"
            )))
        }
    }

    /// Like [`CanonicalDate::from_naive`], but pins out-of-range years to the
    /// first or last representable day.
    pub fn saturating_from_naive(date: NaiveDate) -> Self {
        if date.year() < MIN_YEAR {
            Self::MIN
        } else if date.year() > MAX_YEAR {
            Self::MAX
        } else {
            Self(date)
        }
    }

    /// 0001-01-01.
    pub const MIN: Self = match NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1) {
        Some(date) => Self(date),
        None => panic!("0001-01-01 is a valid date"),
    };

    /// 9999-12-31.
    pub const MAX: Self = match NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31) {
        Some(date) => Self(date),
        None => panic!("9999-12-31 is a valid date"),
    };

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The `(year, month, day)` tuple.
    pub fn components(&self) -> (i32, u32, u32) {
        (self.year(), self.month(), self.day())
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The underlying timezone-free chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The same year and month with `day`, pinned into 1..=days-in-month.
    pub fn with_day_clamped(&self, day: u32) -> Self {
        let day = day.clamp(1, days_in_month(self.year(), self.month()));
        self.0.with_day(day).map(Self).unwrap_or(*self)
    }

    /// Human-readable form, e.g. `"Jun 10, 2025"`.
    pub fn to_display(&self) -> String {
        let abbreviation = MONTH_ABBREVIATIONS[(self.month() - 1) as usize];
        format!("{abbreviation} {}, {}", self.day(), self.year())
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day()
        )
    }
}

impl FromStr for CanonicalDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month, day) = split_canonical(s.trim()).ok_or_else(|| {
            CalendarError::InvalidDate(format!("'{}': expected YYYY-MM-DD", s.trim()))
        })?;
        Self::new(year, month, day)
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Split a fixed-width `YYYY-MM-DD` string into integers without validating
/// the calendar.
fn split_canonical(s: &str) -> Option<(i32, u32, u32)> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let all_digits = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !all_digits {
        return None;
    }

    let year = s[0..4].parse().ok()?;
    let month = s[5..7].parse().ok()?;
    let day = s[8..10].parse().ok()?;
    Some((year, month, day))
}

fn format_year_month(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

// ── Serializer operations ───────────────────────────────────────────────────

/// Parse a canonical `YYYY-MM-DD` string.
///
/// Returns `None` for malformed input or a day that does not exist in the
/// month (e.g. `"2023-02-29"`). User input is expected to be occasionally
/// incomplete, so this never errors.
///
/// # Examples
///
/// ```
/// use rental_calendar::parse_canonical_date;
///
/// let date = parse_canonical_date("2024-02-29").unwrap();
/// assert_eq!(date.components(), (2024, 2, 29));
/// assert!(parse_canonical_date("2023-02-29").is_none());
/// assert!(parse_canonical_date("2024-2-29").is_none());
/// ```
pub fn parse_canonical_date(s: &str) -> Option<CanonicalDate> {
    s.parse().ok()
}

/// Format components as `YYYY-MM-DD`, zero-padding every field.
///
/// The components are not validated; use [`CanonicalDate::new`] for that.
pub fn format_canonical_date(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// Human-readable form of a canonical date string, e.g. `"Jun 10, 2025"`.
pub fn display_canonical_date(s: &str) -> Option<String> {
    parse_canonical_date(s).map(|date| date.to_display())
}

/// Human-readable form of an optional canonical date string, falling back to
/// [`DATE_PLACEHOLDER`] when it is absent or invalid.
pub fn display_or_placeholder(s: Option<&str>) -> String {
    s.and_then(display_canonical_date)
        .unwrap_or_else(|| DATE_PLACEHOLDER.to_string())
}

/// Today's wall-clock date as seen by `clock`.
pub fn today(clock: &dyn Clock) -> CanonicalDate {
    CanonicalDate::saturating_from_naive(clock.today())
}

// ── Tests ───────────────────────────────────────────────────────────────────
