//! Shared utility functions for the playa temperature crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

    /// Seconds in one day.
    pub const SECONDS_PER_DAY: u32 = 86_400;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Format a clock time as "HH:MM"
    pub fn format_clock(time: &NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }

    /// Seconds elapsed since midnight for a clock time, ignoring leap seconds.
    pub fn seconds_of_day(time: &NaiveTime) -> u32 {
        time.num_seconds_from_midnight()
    }

    /// Clock time for a number of seconds since midnight.
    /// Values past one day wrap around.
    pub fn time_from_seconds_of_day(seconds: u32) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(seconds % SECONDS_PER_DAY, 0)
            .unwrap_or_default()
    }

    /// Milliseconds since the epoch of a wall-clock datetime, treating it as UTC.
    /// Charts use this to plot local clock readings independent of the viewer's zone.
    pub fn wall_clock_millis(datetime: &NaiveDateTime) -> i64 {
        datetime.and_utc().timestamp_millis()
    }

    /// Milliseconds since midnight for a clock time.
    pub fn clock_millis(time: &NaiveTime) -> i64 {
        i64::from(seconds_of_day(time)) * 1000 + i64::from(time.nanosecond() / 1_000_000)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{NaiveDate, NaiveTime};

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2019, 8, 25).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2019-08-25");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_seconds_of_day_round_trip() {
            let time = NaiveTime::from_hms_opt(6, 15, 30).unwrap();
            let seconds = seconds_of_day(&time);
            assert_eq!(seconds, 6 * 3600 + 15 * 60 + 30);
            assert_eq!(time_from_seconds_of_day(seconds), time);
        }

        #[test]
        fn test_time_from_seconds_wraps() {
            let time = time_from_seconds_of_day(SECONDS_PER_DAY + 60);
            assert_eq!(time, NaiveTime::from_hms_opt(0, 1, 0).unwrap());
        }

        #[test]
        fn test_wall_clock_millis() {
            let dt = NaiveDate::from_ymd_opt(1970, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 1)
                .unwrap();
            assert_eq!(wall_clock_millis(&dt), 86_401_000);
            let time = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
            assert_eq!(clock_millis(&time), 3_600_000);
        }
    }
}

/// Inclusive date range iteration
pub mod date_range {
    use chrono::{NaiveDate, TimeDelta};
    use std::mem::replace;

    /// A date range iterator that yields each date from the start date
    /// through the end date (inclusive).
    #[derive(Clone, Eq, PartialEq, Copy, Debug)]
    pub struct DateRange(pub NaiveDate, pub NaiveDate);

    impl Iterator for DateRange {
        type Item = NaiveDate;
        fn next(&mut self) -> Option<Self::Item> {
            if self.0 <= self.1 {
                let next = self.0 + TimeDelta::days(1);
                Some(replace(&mut self.0, next))
            } else {
                None
            }
        }
    }

}
