//! Error types for rental-calendar operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid hour: {0}")]
    InvalidHour(String),

    #[error("Invalid week start: {0}")]
    InvalidWeekStart(String),

    #[error("Invalid duration unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
