//! Turning a rental duration into a price, and the payload handed to the
//! booking service.
//!
//! Rates and totals are plain minor-currency amounts (cents); currency and
//! tariffs belong to the pricing service.

use serde::Serialize;

use crate::date::CanonicalDate;
use crate::duration::{DateRange, DurationUnit, RentalDuration};
use crate::error::{CalendarError, Result};
use crate::time::CanonicalTime;

/// A priced rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RentalQuote {
    pub unit: DurationUnit,
    pub quantity: u32,
    pub rate_per_unit: u64,
    pub total: u64,
}

/// Multiply `duration` by `rate_per_unit`.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] if the total does not fit in a `u64`.
pub fn quote(duration: &RentalDuration, rate_per_unit: u64) -> Result<RentalQuote> {
    let total = rate_per_unit
        .checked_mul(u64::from(duration.quantity()))
        .ok_or_else(|| {
            CalendarError::Overflow(format!("{duration} at {rate_per_unit} per unit"))
        })?;

    Ok(RentalQuote {
        unit: duration.unit(),
        quantity: duration.quantity(),
        rate_per_unit,
        total,
    })
}

/// What the pricing/booking service receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub pickup_date: CanonicalDate,
    pub pickup_time: CanonicalTime,
    pub dropoff_date: CanonicalDate,
    pub dropoff_time: CanonicalTime,
    #[serde(flatten)]
    pub duration: RentalDuration,
}

impl BookingRequest {
    /// Build the request for `range` billed in `unit`s.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] when drop-off precedes pickup.
    pub fn new(range: &DateRange, unit: DurationUnit) -> Result<Self> {
        Ok(Self {
            pickup_date: range.start.date,
            pickup_time: range.start.time,
            dropoff_date: range.end.date,
            dropoff_time: range.end.time,
            duration: range.rental_duration(unit)?,
        })
    }
}
