//! CLI entry point for disease cluster analysis

use clap::Parser;
use lesionmap::io::cli::{CaseProcessor, Cli};

fn main() -> lesionmap::Result<()> {
    let cli = Cli::parse();
    let _logger = cli.log_settings().start()?;
    let mut processor = CaseProcessor::new(cli);
    processor.process()?;
    Ok(())
}
