//! CSV loading for registered temperature sources.
//!
//! Each source file has a header row and at least two relevant columns, a
//! timestamp and a temperature, named per source in the registry. Loading
//! renames nothing on disk; it locates those columns by header name, parses
//! every row into a [`TemperatureReading`] and fills in the units the file
//! did not record.
//!
//! # Timestamps
//!
//! Naive timestamps are interpreted in the source's recording timezone and
//! then converted into the display timezone. Timestamps carrying an explicit
//! offset skip the localization step. Ambiguous local times (the repeated hour
//! when DST ends) resolve to the earlier instant.

use crate::error::{Result, TemperatureError};
use crate::series::{LoadedSource, TemperatureReading, TemperatureSeries};
use crate::source::SourceDescriptor;
use crate::temperature::{TemperatureUnit, Temperatures};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;

/// Accepted layouts for timestamps without an offset.
pub const NAIVE_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Accepted layouts for timestamps with a numeric offset, besides RFC 3339.
pub const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f %z"];

impl SourceDescriptor {
    /// Read this source's CSV file into a series in `display_tz`.
    ///
    /// The declared unit is validated before the file is opened.
    pub fn read_csv(&self, display_tz: Tz) -> Result<TemperatureSeries> {
        let unit = TemperatureUnit::parse_source_unit(&self.temp_units)?;
        let source_tz = self.source_timezone()?;
        let file = File::open(self.file_path())?;
        self.read_records(file, unit, source_tz, display_tz)
    }

    /// Read CSV text from any reader, interpreting it with this descriptor.
    pub fn read_from<R: Read>(&self, reader: R, display_tz: Tz) -> Result<TemperatureSeries> {
        let unit = TemperatureUnit::parse_source_unit(&self.temp_units)?;
        let source_tz = self.source_timezone()?;
        self.read_records(reader, unit, source_tz, display_tz)
    }

    fn read_records<R: Read>(
        &self,
        reader: R,
        unit: TemperatureUnit,
        source_tz: Tz,
        display_tz: Tz,
    ) -> Result<TemperatureSeries> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let datetime_idx = self.column_index(&headers, &self.datetime_col)?;
        let temp_idx = self.column_index(&headers, &self.temp_col)?;

        let mut readings = Vec::new();
        let mut skipped = 0u32;
        for result in rdr.records() {
            let record = result?;
            let row = record.position().map_or(0, |p| p.line() as usize);
            let raw_time = record.get(datetime_idx).unwrap_or("").trim();
            let raw_temp = record.get(temp_idx).unwrap_or("").trim();

            if raw_temp.is_empty() {
                skipped += 1;
                continue;
            }
            let value: f64 = raw_temp
                .parse()
                .map_err(|_| TemperatureError::InvalidTemperature {
                    row,
                    value: raw_temp.to_string(),
                })?;
            if value.is_nan() {
                skipped += 1;
                continue;
            }
            let timestamp = parse_timestamp(raw_time, row, source_tz, display_tz)?;
            readings.push(TemperatureReading::new(
                timestamp,
                Temperatures::from_recorded(value, unit),
            ));
        }
        if skipped > 0 {
            warn!("{}: skipped {} rows without a temperature", self.filename, skipped);
        }
        debug!("{}: parsed {} readings", self.filename, readings.len());
        Ok(TemperatureSeries::from_readings(readings))
    }

    fn column_index(&self, headers: &StringRecord, column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| TemperatureError::MissingColumn {
                file: self.filename.clone(),
                column: column.to_string(),
            })
    }
}

/// Parse a timestamp cell and express it in `display_tz`.
pub fn parse_timestamp(
    value: &str,
    row: usize,
    source_tz: Tz,
    display_tz: Tz,
) -> Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&display_tz));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.with_timezone(&display_tz));
        }
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| TemperatureError::InvalidTimestamp {
            row,
            value: value.to_string(),
        })?;
    let localized = match source_tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(TemperatureError::NonexistentLocalTime {
                row,
                value: value.to_string(),
                timezone: source_tz.name().to_string(),
            })
        }
    };
    Ok(localized.with_timezone(&display_tz))
}

/// Load every source, stopping at the first failure.
pub fn load_all(sources: Vec<SourceDescriptor>, display_tz: Tz) -> Result<Vec<LoadedSource>> {
    let mut loaded = Vec::with_capacity(sources.len());
    for descriptor in sources {
        info!("{}", descriptor.filename);
        let series = descriptor.read_csv(display_tz)?;
        info!(
            "  {} readings for {}",
            series.len(),
            descriptor.display_name()
        );
        loaded.push(LoadedSource { descriptor, series });
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Offset, Timelike};
    use chrono_tz::America::Los_Angeles;
    use chrono_tz::UTC;
    use std::path::PathBuf;

    const ALTITUDE_CSV: &str = r#"Time,Outdoor Temperature (F),Outdoor Humidity(%)
2019-08-25 08:00:00,70.0,21
2019-08-25 08:05:00,71.6,20
2019-08-25 08:10:00,,20
2019-08-25 08:15:00,73.4,19
"#;

    fn descriptor(datetime_col: &str, temp_col: &str, units: &str, tz: &str) -> SourceDescriptor {
        SourceDescriptor {
            filename: "test.csv".to_string(),
            path: PathBuf::from("data"),
            recording_location: "outdoors".to_string(),
            owner: "tester".to_string(),
            datetime_col: datetime_col.to_string(),
            temp_col: temp_col.to_string(),
            temp_units: units.to_string(),
            timezone: tz.to_string(),
            tags: vec![],
            color: "#2ca02c".to_string(),
        }
    }

    #[test]
    fn test_read_fahrenheit_source() {
        let source = descriptor("Time", "Outdoor Temperature (F)", "F", "America/Los_Angeles");
        let series = source.read_from(ALTITUDE_CSV.as_bytes(), Los_Angeles).unwrap();
        assert_eq!(series.len(), 3);

        let first = &series.readings()[0];
        assert_eq!(first.temperature.fahrenheit, 70.0);
        let expected_c = (70.0 - 32.0) * 5.0 / 9.0;
        assert!((first.temperature.celsius - expected_c).abs() < 1e-9);
        assert!((first.temperature.kelvin - (expected_c + 273.15)).abs() < 1e-9);
        assert_eq!(first.timestamp.hour(), 8);
    }

    #[test]
    fn test_utc_source_converted_to_display_zone() {
        let csv = "datetime,temperature\n2019-08-25T15:00,30.5\n2019-08-26T03:30,12.0\n";
        let source = descriptor("datetime", "temperature", "C", "UTC");
        let series = source.read_from(csv.as_bytes(), Los_Angeles).unwrap();
        for reading in series.readings() {
            assert_eq!(reading.timestamp.timezone(), Los_Angeles);
            assert_eq!(reading.timestamp.offset().fix().local_minus_utc(), -7 * 3600);
        }
        let first = series.readings()[0].timestamp;
        assert_eq!(first.hour(), 8);
        assert_eq!(
            first.date_naive(),
            NaiveDate::from_ymd_opt(2019, 8, 25).unwrap()
        );
        let second = series.readings()[1].timestamp;
        assert_eq!((second.hour(), second.minute()), (20, 30));
    }

    #[test]
    fn test_unsupported_unit_fails_before_reading() {
        let source = descriptor("datetime", "temperature", "K", "UTC");
        let result = source.read_from("not,even,csv".as_bytes(), UTC);
        assert!(matches!(result, Err(TemperatureError::UnsupportedUnit(_))));

        let missing_file = descriptor("datetime", "temperature", "kelvin", "UTC");
        assert!(matches!(
            missing_file.read_csv(UTC),
            Err(TemperatureError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_missing_column() {
        let source = descriptor("timestamp", "temperature", "C", "UTC");
        let result = source.read_from("datetime,temperature\n2019-08-25T08:00,20\n".as_bytes(), UTC);
        match result {
            Err(TemperatureError::MissingColumn { column, .. }) => assert_eq!(column, "timestamp"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_values() {
        let source = descriptor("datetime", "temperature", "C", "UTC");
        let bad_temp = source.read_from("datetime,temperature\n2019-08-25T08:00,hot\n".as_bytes(), UTC);
        assert!(matches!(
            bad_temp,
            Err(TemperatureError::InvalidTemperature { row: 2, .. })
        ));
        let bad_time = source.read_from("datetime,temperature\nyesterday,20\n".as_bytes(), UTC);
        assert!(matches!(bad_time, Err(TemperatureError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Los_Angeles.with_ymd_and_hms(2019, 8, 30, 21, 5, 0).unwrap();
        for value in [
            "2019-08-30T21:05:00",
            "2019-08-30T21:05",
            "2019-08-30 21:05:00.000",
            "8/30/2019 21:05",
            "08/30/2019 9:05:00 PM",
            "2019-08-31T04:05:00Z",
            "2019-08-30 21:05:00-0700",
        ] {
            let parsed = parse_timestamp(value, 1, Los_Angeles, Los_Angeles).unwrap();
            assert_eq!(parsed, expected, "failed on {value}");
        }
    }

    #[test]
    fn test_nonexistent_local_time() {
        let result = parse_timestamp("2019-03-10T02:30", 7, Los_Angeles, Los_Angeles);
        assert!(matches!(
            result,
            Err(TemperatureError::NonexistentLocalTime { row: 7, .. })
        ));
    }

    #[test]
    fn test_ambiguous_local_time_resolves_to_earliest() {
        let parsed = parse_timestamp("2019-11-03T01:30", 4, Los_Angeles, Los_Angeles).unwrap();
        assert_eq!(parsed.offset().fix().local_minus_utc(), -7 * 3600);
        assert_eq!((parsed.hour(), parsed.minute()), (1, 30));
        let as_utc = parse_timestamp("2019-11-03T01:30", 4, Los_Angeles, UTC).unwrap();
        assert_eq!(as_utc.hour(), 8);
    }

    #[test]
    fn test_nan_temperature_skipped() {
        let csv = "datetime,temperature\n2019-08-25T08:00,20\n2019-08-25T08:10,NaN\n2019-08-25T08:20,22\n";
        let source = descriptor("datetime", "temperature", "C", "America/Los_Angeles");
        let series = source.read_from(csv.as_bytes(), Los_Angeles).unwrap();
        let values: Vec<f64> = series.readings().iter().map(|r| r.temperature.celsius).collect();
        assert_eq!(values, vec![20.0, 22.0]);
    }

    #[test]
    fn test_load_all_propagates_failure() {
        let mut source = descriptor("datetime", "temperature", "C", "UTC");
        source.path = PathBuf::from("/nonexistent/bmt");
        let result = load_all(vec![source], UTC);
        assert!(matches!(result, Err(TemperatureError::Io(_))));
    }
}
