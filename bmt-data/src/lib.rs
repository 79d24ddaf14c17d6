//! Derived tables for temperature series.
//!
//! This crate turns loaded series into forms suitable for charting:
//! sunrise/sunset transitions and night spans, back-filled resampling,
//! and the 24-hour average curve per source.

pub mod daily_average;
pub mod error;
pub mod sun;

/// Averages of clock times (time-of-day, date discarded).
pub mod clock {
    use bmt_utils::dates::{seconds_of_day, time_from_seconds_of_day};
    use chrono::NaiveTime;

    /// Mean of a set of clock times, to the nearest second.
    ///
    /// Times are averaged as seconds since midnight, so the result is only
    /// meaningful when they cluster around the same point of the day.
    /// Times straddling midnight (23:50 and 00:10) average to midday.
    pub fn mean_clock_time(times: &[NaiveTime]) -> Option<NaiveTime> {
        if times.is_empty() {
            return None;
        }
        let total: u64 = times.iter().map(|t| u64::from(seconds_of_day(t))).sum();
        let mean = (total as f64 / times.len() as f64).round() as u32;
        Some(time_from_seconds_of_day(mean))
    }

}
