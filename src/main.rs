use brrthooks::cli::{run_cli, Cli};
use brrthooks::telemetry::{init_logging, LogConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env())?;
    run_cli(cli)
}
