//! CLI entry point for the incremental distance field tool

use clap::Parser;
use exitfield::io::cli::{Cli, FileProcessor};

fn main() -> exitfield::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
