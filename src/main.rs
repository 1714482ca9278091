//! CLI entry point for pixel art grid analysis and reconstruction

use clap::Parser;
use depixelator::io::cli::{Cli, run};

fn main() -> depixelator::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();
    run(cli)
}
