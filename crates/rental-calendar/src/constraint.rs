//! Minimum-date gating for booking forms.
//!
//! Comparisons use the `(year, month, day)` tuple ordering of
//! [`CanonicalDate`], never a zoned instant.

use crate::date::{parse_canonical_date, CanonicalDate};

/// Whether `candidate` falls before the inclusive minimum `min_date`.
///
/// Without a minimum nothing is disabled.
///
/// # Examples
///
/// ```
/// use rental_calendar::{is_date_disabled, parse_canonical_date};
///
/// let min = parse_canonical_date("2025-06-10").unwrap();
/// let june_9 = parse_canonical_date("2025-06-09").unwrap();
/// let june_10 = parse_canonical_date("2025-06-10").unwrap();
/// assert!(is_date_disabled(&june_9, Some(&min)));
/// assert!(!is_date_disabled(&june_10, Some(&min)));
/// ```
pub fn is_date_disabled(candidate: &CanonicalDate, min_date: Option<&CanonicalDate>) -> bool {
    min_date.is_some_and(|min| candidate < min)
}

/// String form of [`is_date_disabled`] for values coming straight from a form.
///
/// An unparseable candidate is disabled; an unparseable minimum is ignored.
pub fn is_canonical_date_disabled(candidate: &str, min_date: Option<&str>) -> bool {
    match parse_canonical_date(candidate) {
        Some(candidate) => {
            let min = min_date.and_then(parse_canonical_date);
            is_date_disabled(&candidate, min.as_ref())
        }
        None => true,
    }
}

/// Earliest selectable drop-off date: the later of `today` and the chosen
/// pickup date.
pub fn dropoff_min_date(today: CanonicalDate, pickup: Option<CanonicalDate>) -> CanonicalDate {
    pickup.map_or(today, |pickup| pickup.max(today))
}
