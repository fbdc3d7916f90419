use std::path::Path;

use anyhow::{Context, Result};
use capsid::core::config::Config;
use clap::Parser;
use tracing::{debug, info};

use crate::args::{Args, Command};

mod args;
mod assemble;
mod inspect;
mod logging;
mod operators;
mod scene;

fn load_config(path: &Path) -> Result<Config> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open configuration {path:?}"))?;
    Config::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to load configuration {path:?}"))
}

/// Read a whole input file, naming it when it is missing.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read input file {path:?}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose, args.quiet, args.log_file.as_deref())?;
    debug!("Parsed arguments: {args:?}");

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    info!("Using configuration: {config:?}");

    match args.command {
        Command::Build(build) => assemble::run(build, &config),
        Command::Operators(operators) => operators::run(operators, &config),
        Command::Inspect(inspect) => inspect::run(inspect, &config),
        Command::Scene(scene) => scene::run(scene),
    }
}
