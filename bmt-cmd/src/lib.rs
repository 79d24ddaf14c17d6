//! Command implementations for the BMT CLI.
//!
//! Provides subcommands for rendering the temperature charts, printing the
//! sun transition table and inspecting loaded sources.

use bmt_core::source::DATA_DIR;
use bmt_core::temperature::TemperatureUnit;
use bmt_data::daily_average::DEFAULT_RESAMPLE_MINUTES;
use clap::Subcommand;
use std::path::PathBuf;

pub mod inspect;
pub mod render;
pub mod sun;

/// Default directory charts are written to.
pub const OUTPUT_DIR: &str = "output";

fn parse_unit(s: &str) -> Result<TemperatureUnit, String> {
    s.parse::<TemperatureUnit>().map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum Command {
    /// Load every registered source and write the overall and 24-hour charts
    Render {
        /// Directory holding the recorded CSV files
        #[arg(short = 'd', long, default_value = DATA_DIR)]
        data_dir: PathBuf,

        /// Directory the charts are written to
        #[arg(short = 'o', long, default_value = OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Unit to plot (C, F or K)
        #[arg(short = 'u', long, default_value = "F", value_parser = parse_unit)]
        unit: TemperatureUnit,

        /// Resample grid step for the 24-hour average, in minutes
        #[arg(long, default_value_t = DEFAULT_RESAMPLE_MINUTES)]
        resample_minutes: i64,

        /// Also write a static SVG next to each HTML chart
        #[arg(long)]
        svg: bool,
    },

    /// Print sunrise, sunset and night spans at the event site
    Sun {
        /// First day (YYYY-MM-DD), defaults to the first day of the event
        #[arg(long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD), defaults to the last day of the event
        #[arg(long)]
        end: Option<String>,
    },

    /// Load every registered source and print the first rows of one
    Inspect {
        /// Directory holding the recorded CSV files
        #[arg(short = 'd', long, default_value = DATA_DIR)]
        data_dir: PathBuf,

        /// Registry position of the source to print
        #[arg(short = 'i', long, default_value_t = 2)]
        index: usize,

        /// Number of rows to print
        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            data_dir,
            output_dir,
            unit,
            resample_minutes,
            svg,
        } => {
            let options = render::RenderOptions {
                data_dir,
                output_dir,
                unit,
                resample_minutes,
                svg,
            };
            render::run_render(&options).map(|_| ())
        }
        Command::Sun { start, end } => sun::run_sun(start.as_deref(), end.as_deref()),
        Command::Inspect {
            data_dir,
            index,
            rows,
        } => inspect::run_inspect(&data_dir, index, rows),
    }
}
