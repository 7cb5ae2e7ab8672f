//! Calendar-unit arithmetic and rental durations.
//!
//! Month and year addition **clamp**: when the start day does not exist in
//! the destination month, the result is that month's last day
//! (`2025-01-31 + 1 month = 2025-02-28`, `2024-02-29 + 1 year = 2025-02-28`).
//! [`duration_between`] counts whole units with the same rule, so for any
//! date `d` and time `t`:
//!
//! ```text
//! duration_between(d@t, add_calendar_units(d, unit, n)@t, unit) == n
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::Days;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{days_in_month, parse_canonical_date, CanonicalDate, MAX_YEAR};
use crate::error::{CalendarError, Result};
use crate::time::CanonicalTime;

const MINUTES_PER_DAY: i64 = 24 * 60;

// ── DurationUnit ────────────────────────────────────────────────────────────

/// Billing unit of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Day,
    Month,
    Year,
}

impl DurationUnit {
    /// Singular or plural noun for `quantity` units.
    pub fn noun(self, quantity: u32) -> &'static str {
        match (self, quantity == 1) {
            (DurationUnit::Day, true) => "day",
            (DurationUnit::Day, false) => "days",
            (DurationUnit::Month, true) => "month",
            (DurationUnit::Month, false) => "months",
            (DurationUnit::Year, true) => "year",
            (DurationUnit::Year, false) => "years",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun(1))
    }
}

impl FromStr for DurationUnit {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "d" => Ok(DurationUnit::Day),
            "month" | "months" | "m" => Ok(DurationUnit::Month),
            "year" | "years" | "y" => Ok(DurationUnit::Year),
            other => Err(CalendarError::InvalidUnit(format!(
                "'{other}': expected day, month or year"
            ))),
        }
    }
}

// ── DateTimePoint / DateRange ───────────────────────────────────────────────

/// A pickup or drop-off moment: a date plus a wall-clock time.
///
/// Ordered by date, then time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateTimePoint {
    pub date: CanonicalDate,
    pub time: CanonicalTime,
}

impl DateTimePoint {
    pub fn new(date: CanonicalDate, time: CanonicalTime) -> Self {
        Self { date, time }
    }

    pub fn at_midnight(date: CanonicalDate) -> Self {
        Self::new(date, CanonicalTime::MIDNIGHT)
    }

    /// Signed minutes from `self` to `other`.
    fn minutes_until(&self, other: &Self) -> i64 {
        let days = other
            .date
            .as_naive()
            .signed_duration_since(self.date.as_naive())
            .num_days();
        let minutes = i64::from(other.time.minutes_since_midnight())
            - i64::from(self.time.minutes_since_midnight());
        days * MINUTES_PER_DAY + minutes
    }
}

impl fmt::Display for DateTimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

impl FromStr for DateTimePoint {
    type Err = CalendarError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once([' ', 'T']) {
            Some((date, time)) => Ok(Self::new(date.parse()?, time.parse()?)),
            None => Ok(Self::at_midnight(s.parse()?)),
        }
    }
}

/// The span between pickup and drop-off.
///
/// A range whose end precedes its start is not an error; it simply measures
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTimePoint,
    pub end: DateTimePoint,
}

impl DateRange {
    pub fn new(start: DateTimePoint, end: DateTimePoint) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Whole `unit`s elapsed; see [`duration_between`].
    pub fn duration(&self, unit: DurationUnit) -> u32 {
        duration_between(&self.start, &self.end, unit)
    }

    /// The billable duration: at least one unit for any forward range,
    /// however short.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] when drop-off precedes pickup;
    /// such a range measures zero and has nothing to bill.
    pub fn rental_duration(&self, unit: DurationUnit) -> Result<RentalDuration> {
        if self.is_inverted() {
            debug!(start = %self.start, end = %self.end, "Inverted range is not billable");
            return Err(CalendarError::InvalidRange(format!(
                "drop-off {} precedes pickup {}",
                self.end, self.start
            )));
        }
        Ok(RentalDuration {
            unit,
            quantity: self.duration(unit).max(1),
        })
    }
}

// ── RentalDuration ──────────────────────────────────────────────────────────

/// Quantity and unit handed to pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RentalDuration {
    unit: DurationUnit,
    quantity: u32,
}

impl RentalDuration {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidQuantity`] when `quantity` is zero.
    pub fn new(unit: DurationUnit, quantity: u32) -> Result<Self> {
        if quantity == 0 {
            return Err(CalendarError::InvalidQuantity(
                "a rental lasts at least one unit".to_string(),
            ));
        }
        Ok(Self { unit, quantity })
    }

    pub fn unit(&self) -> DurationUnit {
        self.unit
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl fmt::Display for RentalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.unit.noun(self.quantity))
    }
}

// ── Calendar addition ───────────────────────────────────────────────────────

/// Add `days` days.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] past 9999-12-31.
pub fn add_days(date: CanonicalDate, days: u32) -> Result<CanonicalDate> {
    date.as_naive()
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| overflow(date, days, DurationUnit::Day))
        .and_then(CanonicalDate::from_naive)
}

/// Add `months` months, clamping the day to the destination month's length.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] past December 9999.
pub fn add_months(date: CanonicalDate, months: u32) -> Result<CanonicalDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month() - 1) + i64::from(months);
    let year = total.div_euclid(12);
    if year > i64::from(MAX_YEAR) {
        return Err(overflow(date, months, DurationUnit::Month));
    }
    // Bounded by MAX_YEAR above, so these conversions cannot truncate.
    let year = year as i32;
    let month = total.rem_euclid(12) as u32 + 1;

    let max_day = days_in_month(year, month);
    if date.day() > max_day {
        debug!(
            %date,
            months,
            clamped_to = max_day,
            "Start day does not exist in destination month, clamping"
        );
    }
    CanonicalDate::new(year, month, date.day().min(max_day))
}

/// Add `years` years; February 29th becomes February 28th in a common year.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] past year 9999.
pub fn add_years(date: CanonicalDate, years: u32) -> Result<CanonicalDate> {
    let year = i64::from(date.year()) + i64::from(years);
    if year > i64::from(MAX_YEAR) {
        return Err(overflow(date, years, DurationUnit::Year));
    }
    let year = year as i32;

    let max_day = days_in_month(year, date.month());
    if date.day() > max_day {
        debug!(%date, years, "Leap day in a common year, clamping to Feb 28");
    }
    CanonicalDate::new(year, date.month(), date.day().min(max_day))
}

/// Add `quantity` calendar units to `date`.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] when the result lies past 9999-12-31.
///
/// # Examples
///
/// ```
/// use rental_calendar::{add_calendar_units, parse_canonical_date, DurationUnit};
///
/// let jan_31 = parse_canonical_date("2025-01-31").unwrap();
/// let result = add_calendar_units(jan_31, DurationUnit::Month, 1).unwrap();
/// assert_eq!(result.to_string(), "2025-02-28");
/// ```
pub fn add_calendar_units(
    date: CanonicalDate,
    unit: DurationUnit,
    quantity: u32,
) -> Result<CanonicalDate> {
    match unit {
        DurationUnit::Day => add_days(date, quantity),
        DurationUnit::Month => add_months(date, quantity),
        DurationUnit::Year => add_years(date, quantity),
    }
}

/// Like [`add_calendar_units`], for canonical date strings.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] for an unparseable date, otherwise
/// as [`add_calendar_units`].
pub fn add_calendar_units_str(date: &str, unit: DurationUnit, quantity: u32) -> Result<String> {
    let date = parse_canonical_date(date)
        .ok_or_else(|| CalendarError::InvalidDate(format!("'{}'", date.trim())))?;
    add_calendar_units(date, unit, quantity).map(|d| d.to_string())
}

fn overflow(date: CanonicalDate, quantity: u32, unit: DurationUnit) -> CalendarError {
    CalendarError::Overflow(format!(
        "{date} + {quantity} {} is past {MAX_YEAR}-12-31",
        unit.noun(quantity)
    ))
}

// ── Elapsed duration ────────────────────────────────────────────────────────

/// Whole `unit`s elapsed from `start` to `end`.
///
/// - **day**: elapsed minutes divided by 1440, rounded half up.
/// - **month** / **year**: the largest `n` such that adding `n` units to the
///   start date (keeping the start time) does not pass `end`.
///
/// An inverted range (`end < start`) measures zero.
///
/// # Examples
///
/// ```
/// use rental_calendar::{duration_between, DateTimePoint, DurationUnit};
///
/// let start: DateTimePoint = "2025-03-01".parse().unwrap();
/// let end: DateTimePoint = "2025-03-05".parse().unwrap();
/// assert_eq!(duration_between(&start, &end, DurationUnit::Day), 4);
/// ```
pub fn duration_between(start: &DateTimePoint, end: &DateTimePoint, unit: DurationUnit) -> u32 {
    if end < start {
        debug!(%start, %end, "Inverted range measures zero");
        return 0;
    }

    let elapsed = match unit {
        DurationUnit::Day => {
            let minutes = start.minutes_until(end);
            (minutes + MINUTES_PER_DAY / 2) / MINUTES_PER_DAY
        }
        DurationUnit::Month => {
            let estimate = month_index(&end.date) - month_index(&start.date);
            whole_units(start, end, unit, estimate)
        }
        DurationUnit::Year => {
            let estimate = i64::from(end.date.year()) - i64::from(start.date.year());
            whole_units(start, end, unit, estimate)
        }
    };

    u32::try_from(elapsed).unwrap_or(u32::MAX)
}

fn month_index(date: &CanonicalDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month()) - 1
}

/// `estimate` lands the start date in the end's month (or year). Adding one
/// fewer unit always lands strictly before `end`, so the answer is either
/// `estimate` or `estimate - 1`.
fn whole_units(start: &DateTimePoint, end: &DateTimePoint, unit: DurationUnit, estimate: i64) -> i64 {
    let Ok(quantity) = u32::try_from(estimate) else {
        return 0;
    };
    match add_calendar_units(start.date, unit, quantity) {
        Ok(date) if DateTimePoint::new(date, start.time) <= *end => estimate,
        _ => (estimate - 1).max(0),
    }
}

/// [`duration_between`] for two canonical date strings at midnight.
///
/// Unparseable input measures zero.
pub fn duration_between_dates(start: &str, end: &str, unit: DurationUnit) -> u32 {
    match (parse_canonical_date(start), parse_canonical_date(end)) {
        (Some(start), Some(end)) => duration_between(
            &DateTimePoint::at_midnight(start),
            &DateTimePoint::at_midnight(end),
            unit,
        ),
        _ => 0,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CanonicalDate {
        parse_canonical_date(s).unwrap()
    }

    fn point(s: &str) -> DateTimePoint {
        s.parse().unwrap()
    }

    // ── add_calendar_units ──────────────────────────────────────────────

    #[test]
    fn test_add_days_across_month() {
        let result = add_calendar_units(date("2025-02-27"), DurationUnit::Day, 2).unwrap();
        assert_eq!(result.to_string(), "2025-03-01");
    }

    #[test]
    fn test_add_days_leap_year() {
        let result = add_calendar_units(date("2024-02-28"), DurationUnit::Day, 1).unwrap();
        assert_eq!(result.to_string(), "2024-02-29");
    }

    #[test]
    fn test_add_month_clamps_to_month_end() {
        let result = add_calendar_units(date("2025-01-31"), DurationUnit::Month, 1).unwrap();
        assert_eq!(result.to_string(), "2025-02-28");

        let result = add_calendar_units(date("2024-01-31"), DurationUnit::Month, 1).unwrap();
        assert_eq!(result.to_string(), "2024-02-29");

        let result = add_calendar_units(date("2025-03-31"), DurationUnit::Month, 1).unwrap();
        assert_eq!(result.to_string(), "2025-04-30");
    }

    #[test]
    fn test_add_months_across_year() {
        let result = add_calendar_units(date("2025-11-15"), DurationUnit::Month, 3).unwrap();
        assert_eq!(result.to_string(), "2026-02-15");

        let result = add_calendar_units(date("2025-01-31"), DurationUnit::Month, 25).unwrap();
        assert_eq!(result.to_string(), "2027-02-28");
    }

    #[test]
    fn test_add_year_from_leap_day() {
        let result = add_calendar_units(date("2024-02-29"), DurationUnit::Year, 1).unwrap();
        assert_eq!(result.to_string(), "2025-02-28");

        let result = add_calendar_units(date("2024-02-29"), DurationUnit::Year, 4).unwrap();
        assert_eq!(result.to_string(), "2028-02-29");
    }

    #[test]
    fn test_add_zero_is_identity() {
        for unit in [DurationUnit::Day, DurationUnit::Month, DurationUnit::Year] {
            let d = date("2025-01-31");
            assert_eq!(add_calendar_units(d, unit, 0).unwrap(), d);
        }
    }

    #[test]
    fn test_add_overflow_is_error() {
        let late = date("9999-12-01");
        assert!(matches!(
            add_calendar_units(late, DurationUnit::Day, 31),
            Err(CalendarError::Overflow(_))
        ));
        assert!(matches!(
            add_calendar_units(late, DurationUnit::Month, 1),
            Err(CalendarError::Overflow(_))
        ));
        assert!(matches!(
            add_calendar_units(late, DurationUnit::Year, 1),
            Err(CalendarError::Overflow(_))
        ));
        assert!(add_calendar_units(late, DurationUnit::Day, 30).is_ok());
    }

    #[test]
    fn test_add_str_form() {
        assert_eq!(
            add_calendar_units_str("2025-01-31", DurationUnit::Month, 1).unwrap(),
            "2025-02-28"
        );
        assert!(matches!(
            add_calendar_units_str("2025-02-30", DurationUnit::Day, 1),
            Err(CalendarError::InvalidDate(_))
        ));
    }

    // ── duration_between ────────────────────────────────────────────────

    #[test]
    fn test_days_between() {
        let d = duration_between(&point("2025-03-01"), &point("2025-03-05"), DurationUnit::Day);
        assert_eq!(d, 4);
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = point("2025-03-01 10:00");
        for unit in [DurationUnit::Day, DurationUnit::Month, DurationUnit::Year] {
            assert_eq!(duration_between(&p, &p, unit), 0);
        }
    }

    #[test]
    fn test_days_round_half_up() {
        let start = point("2025-03-01 10:00");
        assert_eq!(
            duration_between(&start, &point("2025-03-02 21:59"), DurationUnit::Day),
            1
        );
        assert_eq!(
            duration_between(&start, &point("2025-03-02 22:00"), DurationUnit::Day),
            2
        );
        assert_eq!(
            duration_between(&start, &point("2025-03-01 21:59"), DurationUnit::Day),
            0
        );
    }

    #[test]
    fn test_days_across_dst_style_boundary_are_wall_clock() {
        // No zones are involved: March 8th to 9th is one day everywhere.
        let d = duration_between(
            &point("2026-03-08 09:00"),
            &point("2026-03-09 09:00"),
            DurationUnit::Day,
        );
        assert_eq!(d, 1);
    }

    #[test]
    fn test_inverted_range_is_zero() {
        let d = duration_between(&point("2025-03-05"), &point("2025-03-01"), DurationUnit::Day);
        assert_eq!(d, 0);
        let range = DateRange::new(point("2025-03-05"), point("2025-03-01"));
        assert!(range.is_inverted());
        assert_eq!(range.duration(DurationUnit::Month), 0);
    }

    #[test]
    fn test_months_between_inverts_clamped_addition() {
        let d = duration_between(&point("2025-01-31"), &point("2025-02-28"), DurationUnit::Month);
        assert_eq!(d, 1);
        let d = duration_between(&point("2025-01-31"), &point("2025-02-27"), DurationUnit::Month);
        assert_eq!(d, 0);
    }

    #[test]
    fn test_months_between_respects_time_of_day() {
        let start = point("2025-01-15 10:00");
        assert_eq!(
            duration_between(&start, &point("2025-02-15 09:59"), DurationUnit::Month),
            0
        );
        assert_eq!(
            duration_between(&start, &point("2025-02-15 10:00"), DurationUnit::Month),
            1
        );
    }

    #[test]
    fn test_months_between_across_years() {
        let d = duration_between(&point("2024-11-30"), &point("2026-02-28"), DurationUnit::Month);
        assert_eq!(d, 15);
    }

    #[test]
    fn test_years_between_leap_day() {
        let start = point("2024-02-29");
        assert_eq!(
            duration_between(&start, &point("2025-02-28"), DurationUnit::Year),
            1
        );
        assert_eq!(
            duration_between(&start, &point("2025-02-27"), DurationUnit::Year),
            0
        );
        assert_eq!(
            duration_between(&start, &point("2028-02-28"), DurationUnit::Year),
            3
        );
    }

    #[test]
    fn test_round_trip_every_unit() {
        let starts = ["2024-01-31", "2024-02-29", "2025-08-31", "2025-12-31"];
        for start in starts {
            for unit in [DurationUnit::Day, DurationUnit::Month, DurationUnit::Year] {
                for n in [0, 1, 2, 11, 12, 13, 48] {
                    let start = DateTimePoint::new(date(start), CanonicalTime::new(9, 15).unwrap());
                    let end_date = add_calendar_units(start.date, unit, n).unwrap();
                    let end = DateTimePoint::new(end_date, start.time);
                    assert_eq!(duration_between(&start, &end, unit), n, "{start} + {n} {unit}");
                }
            }
        }
    }

    #[test]
    fn test_duration_between_dates_str() {
        assert_eq!(
            duration_between_dates("2025-03-01", "2025-03-05", DurationUnit::Day),
            4
        );
        assert_eq!(
            duration_between_dates("2025-03-01", "nope", DurationUnit::Day),
            0
        );
    }

    // ── RentalDuration ──────────────────────────────────────────────────

    #[test]
    fn test_rental_duration_bills_at_least_one_unit() {
        let range = DateRange::new(point("2025-03-01 10:00"), point("2025-03-01 12:00"));
        let rental = range.rental_duration(DurationUnit::Day).unwrap();
        assert_eq!(rental.quantity(), 1);
        assert_eq!(rental.to_string(), "1 day");

        let range = DateRange::new(point("2025-03-01"), point("2025-06-01"));
        assert_eq!(
            range.rental_duration(DurationUnit::Month).unwrap().to_string(),
            "3 months"
        );
    }

    #[test]
    fn test_rental_duration_of_inverted_range_is_error() {
        let range = DateRange::new(point("2025-03-05"), point("2025-03-01"));
        assert_eq!(range.duration(DurationUnit::Month), 0);
        for unit in [DurationUnit::Day, DurationUnit::Month, DurationUnit::Year] {
            assert!(matches!(
                range.rental_duration(unit),
                Err(CalendarError::InvalidRange(_))
            ));
        }
    }

    #[test]
    fn test_rental_duration_rejects_zero() {
        assert!(matches!(
            RentalDuration::new(DurationUnit::Year, 0),
            Err(CalendarError::InvalidQuantity(_))
        ));
        assert_eq!(
            RentalDuration::new(DurationUnit::Year, 2).unwrap().to_string(),
            "2 years"
        );
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("Days".parse::<DurationUnit>().unwrap(), DurationUnit::Day);
        assert_eq!("m".parse::<DurationUnit>().unwrap(), DurationUnit::Month);
        assert_eq!("year".parse::<DurationUnit>().unwrap(), DurationUnit::Year);
        assert!("week".parse::<DurationUnit>().is_err());
    }

    #[test]
    fn test_point_parsing() {
        assert_eq!(point("2025-03-01T08:30").to_string(), "2025-03-01 08:30");
        assert_eq!(point("2025-03-01").to_string(), "2025-03-01 00:00");
        assert!("2025-03-01 8:30".parse::<DateTimePoint>().is_err());
    }

    #[test]
    fn test_point_ordering_is_date_then_time() {
        assert!(point("2025-03-01 23:59") < point("2025-03-02 00:00"));
        assert!(point("2025-03-01 08:00") < point("2025-03-01 08:01"));
    }
}
