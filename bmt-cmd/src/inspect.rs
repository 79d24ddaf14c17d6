use anyhow::Context;
use bmt_core::loader::load_all;
use bmt_core::series::LoadedSource;
use bmt_core::site::EventSite;
use bmt_core::source::SourceDescriptor;
use std::path::Path;

/// Load every registered source and print the first `rows` readings of one.
pub fn run_inspect(data_dir: &Path, index: usize, rows: usize) -> anyhow::Result<()> {
    let site = EventSite::burning_man_2019();
    let sources = SourceDescriptor::get_registered_sources(data_dir)?;
    let count = sources.len();
    let loaded = load_all(sources, site.display_timezone)
        .with_context(|| format!("Failed to load sources from {}", data_dir.display()))?;
    let source = loaded
        .get(index)
        .with_context(|| format!("No source at index {index}, registry has {count}"))?;
    for line in format_head(source, rows) {
        println!("{line}");
    }
    Ok(())
}

/// Descriptor summary and the first `rows` readings with all three units.
pub fn format_head(source: &LoadedSource, rows: usize) -> Vec<String> {
    let descriptor = &source.descriptor;
    let mut lines = vec![
        format!(
            "{} [{}] {} readings, tags: {}",
            descriptor.display_name(),
            descriptor.filename,
            source.series.len(),
            descriptor.tags.join(", ")
        ),
        format!(
            "{:<27}{:>15}{:>15}{:>15}",
            "datetime", "temperature C", "temperature F", "temperature K"
        ),
    ];
    for reading in source.series.head(rows) {
        lines.push(format!(
            "{:<27}{:>15.2}{:>15.2}{:>15.2}",
            reading.timestamp.format("%Y-%m-%d %H:%M:%S %Z"),
            reading.temperature.celsius,
            reading.temperature.fahrenheit,
            reading.temperature.kelvin
        ));
    }
    lines
}
