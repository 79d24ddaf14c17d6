/// Error types for derived tables
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DataError {
    /// Latitude or longitude out of range
    #[error("Invalid coordinates: lat={latitude}, lng={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// The sun does not rise or set on this day at this location
    #[error("No {event} on {date} at this location")]
    NoSolarEvent { date: NaiveDate, event: &'static str },

    /// Resample step that is not a positive divisor of one day
    #[error("Invalid resample step: {0}")]
    InvalidStep(String),
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
