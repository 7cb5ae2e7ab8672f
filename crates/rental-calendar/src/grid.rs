//! Month grids for date pickers.
//!
//! A grid is a run of blank cells (one per weekday before the 1st of the
//! month) followed by one cell per day. Everything is derived from the
//! integer year and month; no zoned instant is ever involved, so the weekday
//! of the 1st cannot shift around midnight in some UTC offset.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::date::{days_in_month, month_name, CanonicalDate, MAX_YEAR, MIN_YEAR};
use crate::error::{CalendarError, Result};

const SUNDAY_FIRST_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const MONDAY_FIRST_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

// ── Options ─────────────────────────────────────────────────────────────────

/// Which weekday occupies the first column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// US convention, matching a `firstWeekdayOffset` of 0 for Sunday.
    #[default]
    Sunday,
    /// ISO 8601 convention.
    Monday,
}

impl WeekStartDay {
    /// How many columns `weekday` sits to the right of the first column.
    pub fn days_from_start(self, weekday: Weekday) -> u32 {
        match self {
            WeekStartDay::Sunday => weekday.num_days_from_sunday(),
            WeekStartDay::Monday => weekday.num_days_from_monday(),
        }
    }
}

impl FromStr for WeekStartDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStartDay::Sunday),
            "monday" | "mon" => Ok(WeekStartDay::Monday),
            other => Err(CalendarError::InvalidWeekStart(format!(
                "'{other}': week must start on sunday or monday"
            ))),
        }
    }
}

/// Layout options for [`compute_calendar_grid_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub week_start: WeekStartDay,
    /// Append blanks so the last row is a full week.
    pub pad_trailing: bool,
}

// ── Cells ───────────────────────────────────────────────────────────────────

/// One cell of a month grid. Serializes as `null` or the day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum GridCell {
    Blank,
    Day(u32),
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(day) => Some(*day),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, GridCell::Blank)
    }
}

// ── CalendarMonth ───────────────────────────────────────────────────────────

/// A year/month pair shown by an open picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: CanonicalDate,
}

impl CalendarMonth {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] for a month outside 1-12 and
    /// [`CalendarError::InvalidDate`] for a year outside 1-9999.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        CanonicalDate::new(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn of(date: CanonicalDate) -> Self {
        Self {
            first: date.with_day_clamped(1),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Weekday index of the 1st, with 0 = Sunday.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first_weekday_offset_from(WeekStartDay::Sunday)
    }

    /// Weekday index of the 1st counted from `week_start`.
    pub fn first_weekday_offset_from(&self, week_start: WeekStartDay) -> u32 {
        week_start.days_from_start(self.first.weekday())
    }

    /// The following month, or `None` past December 9999.
    pub fn next(&self) -> Option<Self> {
        match self.month() {
            12 if self.year() == MAX_YEAR => None,
            12 => Self::new(self.year() + 1, 1).ok(),
            m => Self::new(self.year(), m + 1).ok(),
        }
    }

    /// The preceding month, or `None` before January of year 1.
    pub fn prev(&self) -> Option<Self> {
        match self.month() {
            1 if self.year() == MIN_YEAR => None,
            1 => Self::new(self.year() - 1, 12).ok(),
            m => Self::new(self.year(), m - 1).ok(),
        }
    }

    /// The date of `day` in this month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] when the month has no such day.
    pub fn date(&self, day: u32) -> Result<CanonicalDate> {
        CanonicalDate::new(self.year(), self.month(), day)
    }

    pub fn contains(&self, date: &CanonicalDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Heading for the picker, e.g. `"June 2025"`.
    pub fn title(&self) -> String {
        let name = month_name(self.month()).unwrap_or_default();
        format!("{name} {}", self.year())
    }

    /// The cells of this month laid out according to `options`.
    pub fn cells(&self, options: &GridOptions) -> Vec<GridCell> {
        let offset = self.first_weekday_offset_from(options.week_start);
        let days = self.days_in_month();

        let mut cells: Vec<GridCell> = (0..offset)
            .map(|_| GridCell::Blank)
            .chain((1..=days).map(GridCell::Day))
            .collect();

        if options.pad_trailing {
            let remainder = cells.len() % 7;
            if remainder != 0 {
                cells.extend((remainder..7).map(|_| GridCell::Blank));
            }
        }

        trace!(
            year = self.year(),
            month = self.month(),
            offset,
            days,
            n_cells = cells.len(),
            "Built month grid"
        );
        cells
    }

    /// The cells of this month split into week rows of up to seven cells.
    pub fn weeks(&self, options: &GridOptions) -> Vec<Vec<GridCell>> {
        self.cells(options)
            .chunks(7)
            .map(<[GridCell]>::to_vec)
            .collect()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

// ── Builder operations ──────────────────────────────────────────────────────

/// Build the Sunday-first grid for `month` (1-12) of `year`.
///
/// The result holds `first_weekday_offset` blank cells followed by one cell
/// per day of the month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] for a month outside 1-12 and
/// [`CalendarError::InvalidDate`] for a year outside 1-9999.
///
/// # Examples
///
/// ```
/// use rental_calendar::{compute_calendar_grid, GridCell};
///
/// // June 1st 2025 is a Sunday: no leading blanks.
/// let cells = compute_calendar_grid(2025, 6).unwrap();
/// assert_eq!(cells.len(), 30);
/// assert_eq!(cells[0], GridCell::Day(1));
/// ```
pub fn compute_calendar_grid(year: i32, month: u32) -> Result<Vec<GridCell>> {
    compute_calendar_grid_with_options(year, month, &GridOptions::default())
}

/// Build the grid for `month` of `year` with a configurable week start and
/// optional trailing padding.
///
/// # Errors
///
/// Same as [`compute_calendar_grid`].
pub fn compute_calendar_grid_with_options(
    year: i32,
    month: u32,
    options: &GridOptions,
) -> Result<Vec<GridCell>> {
    Ok(CalendarMonth::new(year, month)?.cells(options))
}

/// Column headings for a grid starting on `week_start`.
pub fn weekday_labels(week_start: WeekStartDay) -> [&'static str; 7] {
    match week_start {
        WeekStartDay::Sunday => SUNDAY_FIRST_LABELS,
        WeekStartDay::Monday => MONDAY_FIRST_LABELS,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn leading_blanks(cells: &[GridCell]) -> usize {
        cells.iter().take_while(|c| c.is_blank()).count()
    }

    #[test]
    fn test_june_2025_starts_on_sunday() {
        let month = CalendarMonth::new(2025, 6).unwrap();
        assert_eq!(month.first_weekday_offset(), 0);
        assert_eq!(month.days_in_month(), 30);
        assert_eq!(compute_calendar_grid(2025, 6).unwrap().len(), 30);
    }

    #[test]
    fn test_leading_blanks_match_offset() {
        // March 1st 2025 is a Saturday.
        let cells = compute_calendar_grid(2025, 3).unwrap();
        assert_eq!(leading_blanks(&cells), 6);
        assert_eq!(cells[6], GridCell::Day(1));
        assert_eq!(cells.last(), Some(&GridCell::Day(31)));
        assert_eq!(cells.len(), 6 + 31);
    }

    #[test]
    fn test_leap_february() {
        let cells = compute_calendar_grid(2024, 2).unwrap();
        assert!(cells.contains(&GridCell::Day(29)));

        let cells = compute_calendar_grid(2023, 2).unwrap();
        assert!(!cells.contains(&GridCell::Day(29)));
        assert_eq!(cells.last(), Some(&GridCell::Day(28)));
    }

    #[test]
    fn test_century_leap_rules() {
        assert_eq!(CalendarMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(CalendarMonth::new(2000, 2).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_monday_week_start() {
        let options = GridOptions {
            week_start: WeekStartDay::Monday,
            pad_trailing: false,
        };
        // June 1st 2025 is a Sunday: last column when weeks start on Monday.
        let cells = compute_calendar_grid_with_options(2025, 6, &options).unwrap();
        assert_eq!(leading_blanks(&cells), 6);
        assert_eq!(cells.len(), 36);
    }

    #[test]
    fn test_trailing_pad_fills_last_week() {
        let options = GridOptions {
            pad_trailing: true,
            ..GridOptions::default()
        };
        let cells = compute_calendar_grid_with_options(2025, 3, &options).unwrap();
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.len(), 42);

        // February 2026 starts on Sunday and spans exactly four weeks.
        let cells = compute_calendar_grid_with_options(2026, 2, &options).unwrap();
        assert_eq!(cells.len(), 28);
    }

    #[test]
    fn test_weeks_are_rows_of_seven() {
        let month = CalendarMonth::new(2025, 3).unwrap();
        let weeks = month.weeks(&GridOptions::default());
        assert_eq!(weeks.len(), 6);
        assert!(weeks[..5].iter().all(|w| w.len() == 7));
        assert_eq!(weeks[0][6], GridCell::Day(1));
    }

    #[test]
    fn test_invalid_month_is_error() {
        assert!(matches!(
            compute_calendar_grid(2025, 13),
            Err(CalendarError::InvalidMonth(_))
        ));
        assert!(compute_calendar_grid(2025, 0).is_err());
        assert!(compute_calendar_grid(0, 1).is_err());
    }

    #[test]
    fn test_navigation_crosses_year_boundary() {
        let december = CalendarMonth::new(2024, 12).unwrap();
        let january = december.next().unwrap();
        assert_eq!((january.year(), january.month()), (2025, 1));
        assert_eq!(january.prev(), Some(december));
    }

    #[test]
    fn test_navigation_stops_at_range_edges() {
        assert!(CalendarMonth::new(9999, 12).unwrap().next().is_none());
        assert!(CalendarMonth::new(1, 1).unwrap().prev().is_none());
    }

    #[test]
    fn test_month_of_date() {
        let date = CanonicalDate::new(2025, 6, 17).unwrap();
        let month = CalendarMonth::of(date);
        assert_eq!(month.to_string(), "2025-06");
        assert!(month.contains(&date));
        assert_eq!(month.date(30).unwrap().to_string(), "2025-06-30");
        assert!(month.date(31).is_err());
    }

    #[test]
    fn test_title_and_labels() {
        assert_eq!(CalendarMonth::new(2025, 6).unwrap().title(), "June 2025");
        assert_eq!(weekday_labels(WeekStartDay::Sunday)[0], "Su");
        assert_eq!(weekday_labels(WeekStartDay::Monday)[6], "Su");
    }

    #[test]
    fn test_cells_serialize_as_null_or_day() {
        let json = serde_json::to_string(&[GridCell::Blank, GridCell::Day(1)]).unwrap();
        assert_eq!(json, "[null,1]");
    }

    #[test]
    fn test_week_start_from_str() {
        assert_eq!(
            "Monday".parse::<WeekStartDay>().unwrap(),
            WeekStartDay::Monday
        );
        assert!(matches!(
            "friday".parse::<WeekStartDay>(),
            Err(CalendarError::InvalidWeekStart(_))
        ));
    }

    #[test]
    fn test_grid_options_deserialize_with_defaults() {
        let options: GridOptions = serde_json::from_str(r#"{"week_start":"monday"}"#).unwrap();
        assert_eq!(options.week_start, WeekStartDay::Monday);
        assert!(!options.pad_trailing);

        let options: GridOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, GridOptions::default());

        let options: GridOptions = serde_json::from_str(r#"{"pad_trailing":true}"#).unwrap();
        assert_eq!(options.week_start, WeekStartDay::Sunday);
        assert_eq!(compute_calendar_grid_with_options(2025, 6, &options).unwrap().len(), 35);

        assert!(serde_json::from_str::<GridOptions>(r#"{"week_start":"friday"}"#).is_err());
    }
}
