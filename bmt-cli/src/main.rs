//! BMT CLI - charts the Burning Man 2019 temperature logs.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bmt-cli",
    version,
    about = "Burning Man 2019 temperature charts"
)]
struct Cli {
    #[command(subcommand)]
    command: bmt_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    bmt_cmd::run(cli.command)
}
