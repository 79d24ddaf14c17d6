//! Resampling and the 24-hour average curve.
//!
//! Sources log at different, irregular intervals. Before averaging, each
//! series is snapped onto a fixed grid so every source contributes the same
//! clock times, then grid points are grouped by time-of-day across all days.

use crate::error::{DataError, Result};
use bmt_core::series::{TemperatureReading, TemperatureSeries};
use bmt_core::temperature::{TemperatureUnit, Temperatures};
use bmt_utils::dates::{seconds_of_day, SECONDS_PER_DAY};
use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use log::debug;
use std::collections::BTreeMap;

/// Default grid step for resampling, in minutes.
pub const DEFAULT_RESAMPLE_MINUTES: i64 = 10;

/// Snap a series onto a fixed grid, back-filling each grid point.
///
/// The grid is anchored at local midnight of the first reading's day, so
/// grid points fall on whole local clock steps whatever the zone's UTC
/// offset. It starts at the first reading floored to `step` and ends at or
/// before the last reading. Every grid point takes the first reading at or
/// after it.
pub fn resample_backfill(series: &TemperatureSeries, step: TimeDelta) -> Result<TemperatureSeries> {
    let step_seconds = validate_step(step)?;
    let readings = series.readings();
    let (first, last) = match (readings.first(), readings.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(TemperatureSeries::default()),
    };
    let tz = first.timestamp.timezone();
    let start = first.timestamp.timestamp();
    let end = last.timestamp.timestamp();
    let anchor = local_midnight(&first.timestamp);
    let mut grid_point = anchor + (start - anchor).div_euclid(step_seconds) * step_seconds;

    let mut resampled = Vec::new();
    let mut cursor = 0;
    while grid_point <= end {
        while readings[cursor].timestamp.timestamp() < grid_point {
            cursor += 1;
        }
        let timestamp = DateTime::from_timestamp(grid_point, 0)
            .ok_or_else(|| DataError::InvalidStep(format!("grid point {grid_point} out of range")))?
            .with_timezone(&tz);
        resampled.push(TemperatureReading::new(
            timestamp,
            readings[cursor].temperature,
        ));
        grid_point += step_seconds;
    }
    Ok(TemperatureSeries(resampled))
}

/// Epoch seconds of local midnight on the day of `timestamp`.
///
/// Falls back to subtracting the clock time when midnight itself does not
/// exist in the zone.
fn local_midnight(timestamp: &DateTime<Tz>) -> i64 {
    let tz = timestamp.timezone();
    timestamp
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
        .map(|midnight| midnight.timestamp())
        .unwrap_or_else(|| timestamp.timestamp() - i64::from(seconds_of_day(&timestamp.time())))
}

fn validate_step(step: TimeDelta) -> Result<i64> {
    let seconds = step.num_seconds();
    if seconds <= 0 || i64::from(SECONDS_PER_DAY) % seconds != 0 {
        return Err(DataError::InvalidStep(format!(
            "{seconds}s does not evenly divide one day"
        )));
    }
    Ok(seconds)
}

/// Mean temperature at one time of day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAverage {
    pub time: NaiveTime,
    pub temperature: Temperatures,
    /// Number of days contributing to the mean
    pub samples: usize,
}

/// 24-hour average curve for one source, ordered by time of day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyAverageTable(pub Vec<DailyAverage>);

#[derive(Default)]
struct Accumulator {
    celsius: f64,
    fahrenheit: f64,
    kelvin: f64,
    count: usize,
}

impl DailyAverageTable {
    /// Resample `series` onto a `step` grid and average each time of day.
    ///
    /// Each unit is averaged independently, so a Fahrenheit mean is exact
    /// for a Fahrenheit source.
    pub fn from_series(series: &TemperatureSeries, step: TimeDelta) -> Result<DailyAverageTable> {
        let resampled = resample_backfill(series, step)?;
        let mut groups: BTreeMap<NaiveTime, Accumulator> = BTreeMap::new();
        for reading in resampled.readings() {
            let entry = groups.entry(reading.timestamp.time()).or_default();
            entry.celsius += reading.temperature.celsius;
            entry.fahrenheit += reading.temperature.fahrenheit;
            entry.kelvin += reading.temperature.kelvin;
            entry.count += 1;
        }
        debug!(
            "averaged {} resampled points into {} times of day",
            resampled.len(),
            groups.len()
        );
        let rows = groups
            .into_iter()
            .map(|(time, acc)| {
                let n = acc.count as f64;
                DailyAverage {
                    time,
                    temperature: Temperatures {
                        celsius: acc.celsius / n,
                        fahrenheit: acc.fahrenheit / n,
                        kelvin: acc.kelvin / n,
                    },
                    samples: acc.count,
                }
            })
            .collect();
        Ok(DailyAverageTable(rows))
    }

    pub fn rows(&self) -> &[DailyAverage] {
        &self.0
    }

    pub fn get(&self, time: NaiveTime) -> Option<&DailyAverage> {
        self.0
            .binary_search_by_key(&time, |row| row.time)
            .ok()
            .map(|i| &self.0[i])
    }

    /// (time of day, mean) pairs in the requested unit.
    pub fn values(&self, unit: TemperatureUnit) -> Vec<(NaiveTime, f64)> {
        self.0
            .iter()
            .map(|row| (row.time, unit.pick(&row.temperature)))
            .collect()
    }
}
