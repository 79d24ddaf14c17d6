//! Full chart pipeline: load, derive, render.

use anyhow::Context;
use bmt_chart::model::ChartSpec;
use bmt_chart::{html, svg, DAILY_AVERAGE_CHART_FILE, OVERALL_CHART_FILE};
use bmt_core::loader::load_all;
use bmt_core::series::LoadedSource;
use bmt_core::site::EventSite;
use bmt_core::source::SourceDescriptor;
use bmt_core::temperature::TemperatureUnit;
use bmt_data::daily_average::DailyAverageTable;
use bmt_data::sun::SunTransitionTable;
use bmt_utils::dates::format_clock;
use chrono::TimeDelta;
use log::info;
use std::path::PathBuf;

/// Settings for one render run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub unit: TemperatureUnit,
    pub resample_minutes: i64,
    pub svg: bool,
}

/// Load every registered source and write both charts.
///
/// Returns the paths written, overall chart first.
pub fn run_render(options: &RenderOptions) -> anyhow::Result<Vec<PathBuf>> {
    let site = EventSite::burning_man_2019();
    let sources = SourceDescriptor::get_registered_sources(&options.data_dir)
        .context("Failed to parse the source registry")?;
    info!(
        "Loading {} sources from {}",
        sources.len(),
        options.data_dir.display()
    );
    let loaded = load_all(sources, site.display_timezone)
        .with_context(|| format!("Failed to load sources from {}", options.data_dir.display()))?;
    render_charts(&loaded, &site, options)
}

/// Derive the sun and average tables for `loaded` and write both charts.
pub fn render_charts(
    loaded: &[LoadedSource],
    site: &EventSite,
    options: &RenderOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    let sun = SunTransitionTable::for_site(site).context("Failed to compute sun transitions")?;
    let mean_sunrise = sun.mean_sunrise().context("No sunrise in the event range")?;
    let mean_sunset = sun.mean_sunset().context("No sunset in the event range")?;
    info!(
        "{} nights, mean sunrise {}, mean sunset {}",
        sun.rows().len(),
        format_clock(&mean_sunrise),
        format_clock(&mean_sunset)
    );

    let step = TimeDelta::minutes(options.resample_minutes);
    let tables = loaded
        .iter()
        .map(|source| {
            DailyAverageTable::from_series(&source.series, step)
                .with_context(|| format!("Failed to average {}", source.descriptor.filename))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let curves: Vec<_> = loaded
        .iter()
        .map(|source| &source.descriptor)
        .zip(tables.iter())
        .collect();

    let overall = ChartSpec::overall(loaded, &sun.night_spans(), options.unit);
    let daily = ChartSpec::daily_average(&curves, mean_sunrise, mean_sunset, options.unit);

    let mut written = Vec::new();
    for (spec, name) in [(&overall, OVERALL_CHART_FILE), (&daily, DAILY_AVERAGE_CHART_FILE)] {
        let html_path = options.output_dir.join(format!("{name}.html"));
        written.push(
            html::write_html(spec, &html_path)
                .with_context(|| format!("Failed to write {}", html_path.display()))?,
        );
        if options.svg {
            let svg_path = options.output_dir.join(format!("{name}.svg"));
            written.push(
                svg::write_svg(spec, &svg_path)
                    .with_context(|| format!("Failed to write {}", svg_path.display()))?,
            );
        }
    }
    info!("Render complete. Output: {}", options.output_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn options(output_dir: PathBuf, svg: bool) -> RenderOptions {
        RenderOptions {
            data_dir: PathBuf::from("data"),
            output_dir,
            unit: TemperatureUnit::Fahrenheit,
            resample_minutes: 10,
            svg,
        }
    }

    fn loaded_altitude(site: &EventSite) -> LoadedSource {
        let sources = SourceDescriptor::get_registered_sources(Path::new("data")).unwrap();
        let descriptor = sources[2].clone();
        let csv = "Time,Outdoor Temperature (F)\n\
                   2019-08-25 08:00:00,70\n\
                   2019-08-25 14:00:00,95\n\
                   2019-08-26 08:00:00,72\n";
        let series = descriptor
            .read_from(csv.as_bytes(), site.display_timezone)
            .unwrap();
        LoadedSource { descriptor, series }
    }

    #[test]
    fn test_render_charts_writes_both_files() {
        let site = EventSite::burning_man_2019();
        let dir = std::env::temp_dir().join(format!("bmt-cmd-render-{}", std::process::id()));
        let written = render_charts(&[loaded_altitude(&site)], &site, &options(dir.clone(), true)).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "temperature_overall.html",
                "temperature_overall.svg",
                "temperature_24h_average.html",
                "temperature_24h_average.svg",
            ]
        );
        let overall = fs::read_to_string(&written[0]).unwrap();
        assert!(overall.contains("outdoors (Altitude Lounge)"));
        assert!(overall.contains("\"x_axis\":\"timestamp\""));
        let daily = fs::read_to_string(&written[2]).unwrap();
        assert!(daily.contains("\"x_axis\":\"clock_time\""));
        assert!(daily.contains("\"y\":71.0"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_rejects_bad_step() {
        let site = EventSite::burning_man_2019();
        let dir = std::env::temp_dir().join(format!("bmt-cmd-step-{}", std::process::id()));
        let mut opts = options(dir, false);
        opts.resample_minutes = 7;
        assert!(render_charts(&[loaded_altitude(&site)], &site, &opts).is_err());
    }

    #[test]
    fn test_run_render_fails_on_missing_data() {
        let mut opts = options(std::env::temp_dir().join("bmt-cmd-missing"), false);
        opts.data_dir = PathBuf::from("/nonexistent/bmt-data");
        assert!(run_render(&opts).is_err());
    }
}
