/// Error types for chart rendering
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Failed to write an output file
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the chart payload
    #[error("Failed to serialize chart: {0}")]
    Json(#[from] serde_json::Error),

    /// plotters drawing failure
    #[error("Failed to draw SVG: {0}")]
    Svg(String),

    /// Trace color is not a #rrggbb hex string
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Type alias for Results using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
