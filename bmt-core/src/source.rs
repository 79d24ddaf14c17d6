use crate::error::{Result, TemperatureError};
use chrono_tz::Tz;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Embedded registry of every temperature log recorded during the event.
pub static SOURCES_CSV: &str = include_str!("../../fixtures/sources.csv");

/// Default directory holding the recorded CSV files.
pub const DATA_DIR: &str = "data";

/// Expected number of columns in a registry row.
pub const REGISTRY_ROW_LENGTH: usize = 9;

/// Metadata for one temperature recording and how to interpret its CSV.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub filename: String,
    /// Directory the file lives in
    pub path: PathBuf,
    pub recording_location: String,
    pub owner: String,
    pub datetime_col: String,
    pub temp_col: String,
    /// Unit as declared in the registry ("C" or "F")
    pub temp_units: String,
    /// IANA name of the zone the device clock was set to
    pub timezone: String,
    pub tags: Vec<String>,
    /// CSS color used for this source's trace
    pub color: String,
}

impl SourceDescriptor {
    /// Location and owner, e.g. "shiftpod2 (mjp)".
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.recording_location, self.owner)
    }

    /// Full path of the CSV file.
    pub fn file_path(&self) -> PathBuf {
        self.path.join(&self.filename)
    }

    /// Timezone the recorded timestamps are expressed in.
    pub fn source_timezone(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Sources from the embedded registry, reading their files from `data_dir`.
    pub fn get_registered_sources(data_dir: &Path) -> Result<Vec<SourceDescriptor>> {
        SourceDescriptor::parse_source_csv(SOURCES_CSV, data_dir)
    }

    /// Parse a registry CSV into descriptors.
    ///
    /// Expected columns: filename, location, owner, datetime column,
    /// temperature column, unit, timezone, `;`-separated tags, color.
    pub fn parse_source_csv(csv_object: &str, data_dir: &Path) -> Result<Vec<SourceDescriptor>> {
        let mut source_list: Vec<SourceDescriptor> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            if record.len() != REGISTRY_ROW_LENGTH {
                return Err(TemperatureError::Registry(format!(
                    "expected {} fields, found {} in {:?}",
                    REGISTRY_ROW_LENGTH,
                    record.len(),
                    record
                )));
            }
            let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
            let tags = field(7)
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            let source = SourceDescriptor {
                filename: field(0),
                path: data_dir.to_path_buf(),
                recording_location: field(1),
                owner: field(2),
                datetime_col: field(3),
                temp_col: field(4),
                temp_units: field(5),
                timezone: field(6),
                tags,
                color: field(8),
            };
            if source.filename.is_empty() {
                return Err(TemperatureError::Registry("empty filename".to_string()));
            }
            source_list.push(source);
        }
        Ok(source_list)
    }
}

/// Resolve an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TemperatureError::UnknownTimezone(name.to_string()))
}
