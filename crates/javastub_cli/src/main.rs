// javastub-importer entry point
use anyhow::Result;
use clap::Parser;

use javastub_cli::{init_logging, run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.verbose);
    run(&cli, config)?;
    Ok(())
}
