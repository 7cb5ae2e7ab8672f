mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use rental_calendar::grid::weekday_labels;
use rental_calendar::{
    add_calendar_units, compute_calendar_grid_with_options, is_canonical_date_disabled,
    parse_canonical_date, quote, to_12_hour, to_24_hour, today, BookingRequest, CalendarMonth,
    DateRange, GridOptions, SystemClock, DATE_PLACEHOLDER,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::cli::{Args, Command, GridArgs, RangeArgs};

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();

    let output = run(args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(command: Command) -> Result<Value> {
    match command {
        Command::Grid(args) => grid(&args),
        Command::Parse { date } => Ok(match parse_canonical_date(&date) {
            Some(parsed) => json!({
                "valid": true,
                "date": parsed,
                "display": parsed.to_display(),
            }),
            None => {
                debug!(input = %date, "Unparseable date, showing placeholder");
                json!({ "valid": false, "display": DATE_PLACEHOLDER })
            }
        }),
        Command::Disabled { date, min_date } => Ok(json!({
            "date": date,
            "minDate": min_date,
            "disabled": is_canonical_date_disabled(&date, min_date.as_deref()),
        })),
        Command::To12 { hour } => {
            let (hour12, period) = to_12_hour(hour)?;
            Ok(json!({ "hour12": hour12, "period": period }))
        }
        Command::To24 { hour, period } => Ok(json!({ "hour24": to_24_hour(hour, period)? })),
        Command::Add {
            date,
            unit,
            quantity,
        } => {
            let start = parse_canonical_date(&date)
                .with_context(|| format!("'{date}' is not a valid YYYY-MM-DD date"))?;
            let result = add_calendar_units(start, unit, quantity)
                .with_context(|| format!("cannot add {quantity} {unit} to {start}"))?;
            Ok(json!({ "date": result }))
        }
        Command::Duration(args) => {
            let range = range(&args);
            let elapsed = range.duration(args.unit);
            let billable = range.rental_duration(args.unit).ok();
            Ok(json!({
                "unit": args.unit,
                "elapsed": elapsed,
                "billable": billable.map(|d| d.quantity()),
                "human": billable.map(|d| d.to_string()),
            }))
        }
        Command::Quote { range: args, rate } => {
            let request = BookingRequest::new(&range(&args), args.unit)
                .context("cannot quote this rental")?;
            let priced = quote(&request.duration, rate)?;
            Ok(json!({ "booking": request, "quote": priced }))
        }
        Command::Today => Ok(json!({ "today": today(&SystemClock) })),
    }
}

fn grid(args: &GridArgs) -> Result<Value> {
    let options = GridOptions {
        week_start: args.week_start,
        pad_trailing: args.pad,
    };
    let month = CalendarMonth::new(args.year, args.month)
        .with_context(|| format!("cannot build a grid for {}-{}", args.year, args.month))?;
    let cells = compute_calendar_grid_with_options(args.year, args.month, &options)?;

    Ok(json!({
        "month": month.to_string(),
        "title": month.title(),
        "daysInMonth": month.days_in_month(),
        "firstWeekdayOffset": month.first_weekday_offset_from(options.week_start),
        "weekdays": weekday_labels(options.week_start),
        "cells": cells,
    }))
}

fn range(args: &RangeArgs) -> DateRange {
    if args.end < args.start {
        debug!(start = %args.start, end = %args.end, "Drop-off precedes pickup");
    }
    DateRange::new(args.start, args.end)
}
