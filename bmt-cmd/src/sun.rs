use anyhow::Context;
use bmt_core::site::EventSite;
use bmt_data::sun::SunTransitionTable;
use bmt_utils::dates::{format_clock, format_date, parse_date};
use log::info;

/// Print the sun transition table for the event site.
///
/// `start` and `end` default to the event's own dates.
pub fn run_sun(start: Option<&str>, end: Option<&str>) -> anyhow::Result<()> {
    let site = EventSite::burning_man_2019();
    let start_date = match start {
        Some(s) => parse_date(s).with_context(|| format!("Invalid start date {s}"))?,
        None => site.start_date,
    };
    let end_date = match end {
        Some(s) => parse_date(s).with_context(|| format!("Invalid end date {s}"))?,
        None => site.end_date,
    };
    if end_date < start_date {
        anyhow::bail!("End date {end_date} is before start date {start_date}");
    }
    info!(
        "Computing sun transitions at {} from {} to {}",
        site.name, start_date, end_date
    );

    let table = SunTransitionTable::compute(
        site.latitude,
        site.longitude,
        site.elevation,
        start_date,
        end_date,
        site.display_timezone,
    )?;
    for line in format_table(&table) {
        println!("{line}");
    }
    Ok(())
}

/// Table rows followed by the mean sunrise and sunset.
pub fn format_table(table: &SunTransitionTable) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<12}{:<10}{:<10}{}",
        "date", "sunrise", "sunset", "night"
    )];
    for row in table.rows() {
        lines.push(format!(
            "{:<12}{:<10}{:<10}{} -> {}",
            format_date(&row.date),
            format_clock(&row.sunrise.time()),
            format_clock(&row.sunset.time()),
            row.previous_sunset.format("%m-%d %H:%M"),
            row.sunrise.format("%m-%d %H:%M"),
        ));
    }
    if let (Some(sunrise), Some(sunset)) = (table.mean_sunrise(), table.mean_sunset()) {
        lines.push(format!(
            "mean sunrise {}, mean sunset {}",
            format_clock(&sunrise),
            format_clock(&sunset)
        ));
    }
    lines
}
