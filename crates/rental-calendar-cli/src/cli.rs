use clap::{Parser, Subcommand};
use rental_calendar::{DateTimePoint, DurationUnit, Period, WeekStartDay};
use tracing::Level;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Log verbosity written to stderr.
    #[clap(long, global = true, default_value = "warn", env = "RENTCAL_LOG_LEVEL")]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the day-cell layout of a month.
    Grid(GridArgs),

    /// Parse a YYYY-MM-DD date and show its display form.
    Parse {
        /// Date as typed by the user.
        date: String,
    },

    /// Check whether a date falls before an inclusive minimum.
    Disabled {
        /// Candidate date (YYYY-MM-DD).
        date: String,

        /// Inclusive minimum date (YYYY-MM-DD).
        #[clap(long = "min")]
        min_date: Option<String>,
    },

    /// Convert a 24-hour clock hour to 12-hour form.
    To12 {
        /// Hour, 0-23.
        hour: u32,
    },

    /// Convert a 12-hour clock hour and AM/PM to 24-hour form.
    To24 {
        /// Hour, 1-12.
        hour: u32,

        /// AM or PM.
        period: Period,
    },

    /// Add calendar units to a date.
    Add {
        /// Start date (YYYY-MM-DD).
        date: String,

        #[clap(long, default_value = "day")]
        unit: DurationUnit,

        #[clap(long, default_value = "1")]
        quantity: u32,
    },

    /// Whole units elapsed between pickup and drop-off.
    Duration(RangeArgs),

    /// Price a rental and print the booking-service payload.
    Quote {
        #[clap(flatten)]
        range: RangeArgs,

        /// Rate per unit in minor currency units (e.g. cents).
        #[clap(long)]
        rate: u64,
    },

    /// Print today's local date.
    Today,
}

#[derive(Parser)]
pub struct GridArgs {
    #[clap(long)]
    pub year: i32,

    /// Month, 1-12.
    #[clap(long)]
    pub month: u32,

    /// First column of the grid: sunday or monday.
    #[clap(long, default_value = "sunday", env = "RENTCAL_WEEK_START")]
    pub week_start: WeekStartDay,

    /// Pad the last row with blanks to a full week.
    #[clap(long)]
    pub pad: bool,
}

#[derive(Parser)]
pub struct RangeArgs {
    /// Pickup as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.
    #[clap(long)]
    pub start: DateTimePoint,

    /// Drop-off as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.
    #[clap(long)]
    pub end: DateTimePoint,

    #[clap(long, default_value = "day")]
    pub unit: DurationUnit,
}
