//! Serializable chart model shared by the HTML and SVG renderers.
//!
//! X values are milliseconds of display-local wall-clock time (or of the
//! clock for 24-hour charts), so the rendered axis reads the same clock
//! times regardless of where the chart is opened.

use bmt_core::series::LoadedSource;
use bmt_core::source::SourceDescriptor;
use bmt_core::temperature::TemperatureUnit;
use bmt_data::daily_average::DailyAverageTable;
use bmt_data::sun::NightSpan;
use bmt_utils::dates::{clock_millis, wall_clock_millis, SECONDS_PER_DAY};
use chrono::NaiveTime;
use serde::Serialize;

/// Fill color of night shading.
pub const NIGHT_FILL: &str = "#30336b";

/// Opacity of night shading.
pub const NIGHT_OPACITY: f64 = 0.2;

/// Legend label of the night placeholder trace.
pub const NIGHT_LABEL: &str = "night";

/// Milliseconds in one day; the right edge of 24-hour charts.
pub const DAY_MILLIS: i64 = SECONDS_PER_DAY as i64 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxisKind {
    /// Calendar date and time
    Timestamp,
    /// Time of day only
    ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Below,
    Above,
}

/// Fixed y-axis range per unit.
pub fn display_range(unit: TemperatureUnit) -> (f64, f64) {
    match unit {
        TemperatureUnit::Celsius => (0.0, 50.0),
        TemperatureUnit::Fahrenheit => (32.0, 122.0),
        TemperatureUnit::Kelvin => (273.15, 323.15),
    }
}

/// A filled rectangle spanning `x0..x1` and `y0..y1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadedRegion {
    pub x0: i64,
    pub x1: i64,
    pub y0: f64,
    pub y1: f64,
    pub fill: String,
    pub opacity: f64,
    pub layer: Layer,
}

impl ShadedRegion {
    pub fn night(x0: i64, x1: i64, y_range: (f64, f64)) -> ShadedRegion {
        ShadedRegion {
            x0,
            x1,
            y0: y_range.0,
            y1: y_range.1,
            fill: NIGHT_FILL.to_string(),
            opacity: NIGHT_OPACITY,
            layer: Layer::Below,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: i64,
    pub y: f64,
}

/// A named line. Placeholder traces carry no points and only label the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub color: String,
    pub points: Vec<ChartPoint>,
    pub placeholder: bool,
}

impl LineTrace {
    pub fn placeholder(name: &str, color: &str) -> LineTrace {
        LineTrace {
            name: name.to_string(),
            color: color.to_string(),
            points: Vec::new(),
            placeholder: true,
        }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: XAxisKind,
    pub y_label: String,
    pub y_range: (f64, f64),
    /// Drawn before the traces
    pub shapes: Vec<ShadedRegion>,
    pub traces: Vec<LineTrace>,
}

/// One night rectangle per span, covering the full display range.
pub fn night_rectangles(spans: &[NightSpan], y_range: (f64, f64)) -> Vec<ShadedRegion> {
    spans
        .iter()
        .map(|span| {
            ShadedRegion::night(
                wall_clock_millis(&span.start.naive_local()),
                wall_clock_millis(&span.end.naive_local()),
                y_range,
            )
        })
        .collect()
}

/// Night rectangles on a 24-hour clock: midnight to sunrise and sunset to midnight.
pub fn clock_night_rectangles(
    sunrise: NaiveTime,
    sunset: NaiveTime,
    y_range: (f64, f64),
) -> Vec<ShadedRegion> {
    vec![
        ShadedRegion::night(0, clock_millis(&sunrise), y_range),
        ShadedRegion::night(clock_millis(&sunset), DAY_MILLIS, y_range),
    ]
}

fn axis_label(unit: TemperatureUnit) -> String {
    format!("Temperature ({})", unit.symbol())
}

impl ChartSpec {
    /// Full time range of every source over night shading.
    pub fn overall(sources: &[LoadedSource], nights: &[NightSpan], unit: TemperatureUnit) -> ChartSpec {
        let y_range = display_range(unit);
        let mut traces = vec![LineTrace::placeholder(NIGHT_LABEL, NIGHT_FILL)];
        traces.extend(sources.iter().map(|source| LineTrace {
            name: source.descriptor.display_name(),
            color: source.descriptor.color.clone(),
            points: source
                .series
                .values(unit)
                .into_iter()
                .map(|(timestamp, y)| ChartPoint {
                    x: wall_clock_millis(&timestamp.naive_local()),
                    y,
                })
                .collect(),
            placeholder: false,
        }));
        ChartSpec {
            title: "Burning Man 2019 temperatures".to_string(),
            x_axis: XAxisKind::Timestamp,
            y_label: axis_label(unit),
            y_range,
            shapes: night_rectangles(nights, y_range),
            traces,
        }
    }

    /// 24-hour average curve of every source over the mean night.
    pub fn daily_average(
        curves: &[(&SourceDescriptor, &DailyAverageTable)],
        mean_sunrise: NaiveTime,
        mean_sunset: NaiveTime,
        unit: TemperatureUnit,
    ) -> ChartSpec {
        let y_range = display_range(unit);
        let mut traces = vec![LineTrace::placeholder(NIGHT_LABEL, NIGHT_FILL)];
        traces.extend(curves.iter().map(|(descriptor, table)| LineTrace {
            name: descriptor.display_name(),
            color: descriptor.color.clone(),
            points: table
                .values(unit)
                .into_iter()
                .map(|(time, y)| ChartPoint {
                    x: clock_millis(&time),
                    y,
                })
                .collect(),
            placeholder: false,
        }));
        ChartSpec {
            title: "Burning Man 2019 temperatures, 24-hour average".to_string(),
            x_axis: XAxisKind::ClockTime,
            y_label: axis_label(unit),
            y_range,
            shapes: clock_night_rectangles(mean_sunrise, mean_sunset, y_range),
            traces,
        }
    }

    /// Smallest and largest x over traces and shapes.
    pub fn x_bounds(&self) -> Option<(i64, i64)> {
        let xs = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.x))
            .chain(self.shapes.iter().flat_map(|s| [s.x0, s.x1]));
        xs.fold(None, |bounds, x| match bounds {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }
}
