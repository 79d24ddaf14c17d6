//! Self-contained HTML output.
//!
//! The chart script is embedded at compile time and inlined together with
//! the serialized [`ChartSpec`]; only D3.js itself is loaded from its CDN.

use crate::error::Result;
use crate::model::ChartSpec;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

static TEMPERATURE_CHART_JS: &str = include_str!("../assets/js/temperature-chart.js");

/// D3.js release the chart script is written against.
pub const D3_CDN_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";

/// DOM id of the chart container div.
const CHART_CONTAINER_ID: &str = "temperature-chart";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 24px; }
.bmt-title { font-size: 20px; font-weight: bold; }
#temperature-chart { position: relative; }
.bmt-tooltip {
  position: absolute; pointer-events: none; background: rgba(255,255,255,0.92);
  border: 1px solid #ccc; padding: 6px 8px; font-size: 12px; border-radius: 4px;
}
"#;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the full HTML document for a chart.
pub fn render_html(spec: &ChartSpec) -> Result<String> {
    // `</` inside an inline script would close the script element early.
    let spec_json = serde_json::to_string(spec)?.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
<script src="{D3_CDN_URL}"></script>
</head>
<body>
<div id="{CHART_CONTAINER_ID}"></div>
<script>
{TEMPERATURE_CHART_JS}
renderTemperatureChart('{CHART_CONTAINER_ID}', {spec_json});
</script>
</body>
</html>
"#,
        title = escape_html(&spec.title),
    ))
}

/// Write a chart as HTML, creating the parent directory if needed.
pub fn write_html(spec: &ChartSpec, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_html(spec)?)?;
    info!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}
