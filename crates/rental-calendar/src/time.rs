//! 24-hour time storage and its 12-hour display form.
//!
//! Times are always stored as a [`CanonicalTime`] (hour 0-23, minute 0-59).
//! The 12-hour [`DisplayTime`] is derived from it on demand and never stored,
//! so the two representations cannot drift apart.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalendarError, Result};

/// Text shown in place of a time when nothing is selected.
pub const TIME_PLACEHOLDER: &str = "Select time";

/// Half of the day in 12-hour notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Am,
    Pm,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        })
    }
}

impl FromStr for Period {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" | "a.m." | "a" => Ok(Period::Am),
            "pm" | "p.m." | "p" => Ok(Period::Pm),
            other => Err(CalendarError::InvalidTime(format!(
                "'{other}': expected AM or PM"
            ))),
        }
    }
}

// ── Conversion ──────────────────────────────────────────────────────────────

/// Convert a 24-hour clock hour to its 12-hour form.
///
/// `0 → 12 AM`, `1..=11 → AM`, `12 → 12 PM`, `13..=23 → PM`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidHour`] when `hour24 > 23`.
///
/// # Examples
///
/// ```
/// use rental_calendar::{to_12_hour, Period};
///
/// assert_eq!(to_12_hour(0).unwrap(), (12, Period::Am));
/// assert_eq!(to_12_hour(13).unwrap(), (1, Period::Pm));
/// ```
pub fn to_12_hour(hour24: u32) -> Result<(u32, Period)> {
    if hour24 > 23 {
        return Err(CalendarError::InvalidHour(format!(
            "{hour24} is outside 0-23"
        )));
    }
    Ok(split_hour(hour24))
}

/// `hour24` must already be within 0-23.
fn split_hour(hour24: u32) -> (u32, Period) {
    let hour12 = match hour24 {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let period = if hour24 >= 12 { Period::Pm } else { Period::Am };
    (hour12, period)
}

/// Convert a 12-hour clock hour and period back to a 24-hour hour.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidHour`] when `hour12` is outside 1-12.
pub fn to_24_hour(hour12: u32, period: Period) -> Result<u32> {
    if !(1..=12).contains(&hour12) {
        return Err(CalendarError::InvalidHour(format!(
            "{hour12} is outside 1-12"
        )));
    }
    Ok(match (hour12, period) {
        (12, Period::Am) => 0,
        (12, Period::Pm) => 12,
        (h, Period::Pm) => h + 12,
        (h, Period::Am) => h,
    })
}

// ── CanonicalTime ───────────────────────────────────────────────────────────

/// A wall-clock time of day with minute precision, stored in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalTime(NaiveTime);

impl CanonicalTime {
    pub const MIDNIGHT: Self = match NaiveTime::from_hms_opt(0, 0, 0) {
        Some(time) => Self(time),
        None => panic!("00:00 is a valid time"),
    };

    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] when the hour is outside 0-23 or
    /// the minute outside 0-59.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                CalendarError::InvalidTime(format!("{hour:02}:{minute:02} is not a valid time"))
            })
    }

    /// Build from the 12-hour components a picker shows.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidHour`] or [`CalendarError::InvalidTime`]
    /// for out-of-range components.
    pub fn from_12_hour(hour12: u32, minute: u32, period: Period) -> Result<Self> {
        Self::new(to_24_hour(hour12, period)?, minute)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// The derived 12-hour representation.
    pub fn to_display(&self) -> DisplayTime {
        let (hour12, period) = split_hour(self.hour());
        DisplayTime {
            hour12,
            minute: self.minute(),
            period,
        }
    }
}

impl fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for CanonicalTime {
    type Err = CalendarError;

    /// Parses the canonical `HH:MM` form.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(CalendarError::InvalidTime(format!("'{s}': expected HH:MM")));
        }
        let hour = s[0..2]
            .parse()
            .map_err(|_| CalendarError::InvalidTime(format!("'{s}': bad hour")))?;
        let minute = s[3..5]
            .parse()
            .map_err(|_| CalendarError::InvalidTime(format!("'{s}': bad minute")))?;
        Self::new(hour, minute)
    }
}

impl Serialize for CanonicalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── DisplayTime ─────────────────────────────────────────────────────────────

/// 12-hour view of a [`CanonicalTime`]. Only obtainable through
/// [`CanonicalTime::to_display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayTime {
    hour12: u32,
    minute: u32,
    period: Period,
}

impl DisplayTime {
    pub fn hour12(&self) -> u32 {
        self.hour12
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour12, self.minute, self.period)
    }
}

// ── Typed input ─────────────────────────────────────────────────────────────

/// Parse a typed time: `"14:30"`, `"2:30pm"`, `"2:30 PM"`, `"2pm"`.
///
/// Returns `None` when the input is not a recognizable time.
pub fn parse_display_time(s: &str) -> Option<CanonicalTime> {
    let s = s.trim().to_ascii_lowercase();

    if let Ok(t) = NaiveTime::parse_from_str(&s, "%H:%M") {
        return CanonicalTime::new(t.hour(), t.minute()).ok();
    }

    let compact = s.replace(['.', ' '], "");
    let (clock, period) = if let Some(rest) = compact.strip_suffix("pm") {
        (rest, Period::Pm)
    } else if let Some(rest) = compact.strip_suffix("am") {
        (rest, Period::Am)
    } else {
        return None;
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) if m.len() == 2 => (parse_digits(h)?, parse_digits(m)?),
        Some(_) => return None,
        None => (parse_digits(clock)?, 0),
    };

    CanonicalTime::from_12_hour(hour, minute, period).ok()
}

/// `u32::from_str` also takes a leading `+`; typed times may not.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// The 12-hour display string of an optional time, or [`TIME_PLACEHOLDER`].
pub fn display_time_or_placeholder(time: Option<CanonicalTime>) -> String {
    time.map(|t| t.to_display().to_string())
        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
}

// ── Tests ───────────────────────────────────────────────────────────────────
