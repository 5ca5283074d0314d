//! Command line tool for batch generation of radionuclide libraries

// standard library
use std::path::PathBuf;
use std::process::ExitCode;

// external crates
use clap::Parser;
use log::{error, info, warn};

// rnlib modules
use rnlib::batch::{run_dataset, Batch};
use rnlib::utils::f;

/// Generate radionuclide libraries from IAEA decay data
///
/// Every active dataset of the batch file is processed in turn. A dataset
/// that fails is reported and skipped, and the remaining datasets still run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML batch file
    batch: PathBuf,

    /// Run only these datasets instead of the active list
    #[arg(short, long, value_name = "NAME")]
    dataset: Vec<String>,

    /// Only use cached decay data, never query the API
    #[arg(long)]
    offline: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // verbosity 0 still shows warnings and errors
    if let Err(e) = stderrlog::new()
        .module("rnlib")
        .module("rnlib_chain")
        .module("rnlib_iaea")
        .quiet(cli.quiet)
        .verbosity(usize::from(cli.verbose) + 1)
        .show_module_names(cli.verbose > 2)
        .init()
    {
        eprintln!("Could not initialise logging: {e}");
    }

    let mut batch = match Batch::from_file(&cli.batch) {
        Ok(batch) => batch,
        Err(e) => {
            error!("{}", chain(&e));
            return ExitCode::FAILURE;
        }
    };

    if !cli.dataset.is_empty() {
        batch.active_datasets = cli.dataset;
    }

    let active = batch.active();
    if active.is_empty() {
        warn!("Nothing to do, no active datasets in {:?}", cli.batch);
    }

    let mut failed = 0;
    for (name, config) in active {
        match run_dataset(name, config, cli.offline) {
            Ok(paths) => info!("Finished \"{name}\" ({} files)", paths.len()),
            Err(e) => {
                error!("Dataset \"{name}\" failed: {}", chain(&e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Full error message including every underlying cause
fn chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message += &f!(": {cause}");
        source = cause.source();
    }
    message
}
