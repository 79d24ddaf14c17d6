//! Static SVG rendition of a chart, drawn with plotters.

use crate::error::{ChartError, Result};
use crate::model::{ChartSpec, XAxisKind};
use chrono::DateTime;
use log::info;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Pixel size of rendered SVG charts.
pub const SVG_SIZE: (u32, u32) = (1200, 600);

/// Parse a `#rrggbb` color.
pub fn parse_hex_color(color: &str) -> Result<RGBColor> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ChartError::InvalidColor(color.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ChartError::InvalidColor(color.to_string()))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn format_x(kind: XAxisKind, millis: f64) -> String {
    let datetime = DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc());
    match (kind, datetime) {
        (XAxisKind::Timestamp, Some(dt)) => dt.format("%a %d %H:%M").to_string(),
        (XAxisKind::ClockTime, Some(dt)) => dt.format("%H:%M").to_string(),
        (_, None) => String::new(),
    }
}

fn draw_error<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Svg(format!("{e:?}"))
}

/// Render a chart as an SVG document.
pub fn render_svg(spec: &ChartSpec) -> Result<String> {
    let (x_min, x_max) = spec.x_bounds().unwrap_or((0, 1));
    let (x_min, x_max) = match spec.x_axis {
        XAxisKind::ClockTime => (0.0, crate::model::DAY_MILLIS as f64),
        XAxisKind::Timestamp => (x_min as f64, (x_max.max(x_min + 1)) as f64),
    };
    let (y_min, y_max) = spec.y_range;
    let night = match spec.shapes.first() {
        Some(shape) => parse_hex_color(&shape.fill)?,
        None => BLACK,
    };
    let colors = spec
        .traces
        .iter()
        .filter(|t| !t.placeholder)
        .map(|t| parse_hex_color(&t.color))
        .collect::<Result<Vec<_>>>()?;

    let mut svg_string = String::new();
    {
        let backend = SVGBackend::with_string(&mut svg_string, SVG_SIZE);
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(20i32)
            .x_label_area_size(40u32)
            .y_label_area_size(60u32)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_error)?;
        let kind = spec.x_axis;
        chart
            .configure_mesh()
            .x_labels(12_usize)
            .x_label_formatter(&|x| format_x(kind, *x))
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(spec.shapes.iter().map(|shape| {
                Rectangle::new(
                    [(shape.x0 as f64, shape.y0), (shape.x1 as f64, shape.y1)],
                    night.mix(shape.opacity).filled(),
                )
            }))
            .map_err(draw_error)?;

        for (trace, color) in spec.traces.iter().filter(|t| !t.placeholder).zip(colors) {
            chart
                .draw_series(LineSeries::new(
                    trace.points.iter().map(|p| (p.x as f64, p.y)),
                    color,
                ))
                .map_err(draw_error)?
                .label(trace.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }
    Ok(svg_string)
}

/// Write a chart as SVG, creating the parent directory if needed.
pub fn write_svg(spec: &ChartSpec, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_svg(spec)?)?;
    info!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}
