/// Error types for loading temperature sources
use thiserror::Error;

/// Main error type for registry and loader operations
#[derive(Error, Debug)]
pub enum TemperatureError {
    /// Declared unit is not one a source may be recorded in
    #[error("Unsupported temperature unit {0:?}, expected C or F")]
    UnsupportedUnit(String),

    /// Timezone name not found in the tz database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Column named by the descriptor is absent from the header row
    #[error("Column {column:?} not found in {file}")]
    MissingColumn { file: String, column: String },

    /// Timestamp cell did not match any accepted format
    #[error("Failed to parse timestamp {value:?} on row {row}")]
    InvalidTimestamp { row: usize, value: String },

    /// Naive timestamp falls in a DST gap of the source timezone
    #[error("Timestamp {value:?} on row {row} does not exist in {timezone}")]
    NonexistentLocalTime {
        row: usize,
        value: String,
        timezone: String,
    },

    /// Temperature cell is not a number
    #[error("Failed to parse temperature {value:?} on row {row}")]
    InvalidTemperature { row: usize, value: String },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open or read a file
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed registry row
    #[error("Invalid registry entry: {0}")]
    Registry(String),
}

/// Type alias for Results using TemperatureError
pub type Result<T> = std::result::Result<T, TemperatureError>;
