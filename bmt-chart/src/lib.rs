//! Chart rendering for playa temperature series.
//!
//! [`model::ChartSpec`] describes a chart: night shading drawn beneath the
//! temperature lines, a legend-only night placeholder, and one line per
//! source. [`html`] writes it as an interactive D3.js page and [`svg`] as a
//! static plotters image.

pub mod error;
pub mod html;
pub mod model;
pub mod svg;

/// File name of the full time-range chart.
pub const OVERALL_CHART_FILE: &str = "temperature_overall";

/// File name of the 24-hour average chart.
pub const DAILY_AVERAGE_CHART_FILE: &str = "temperature_24h_average";
