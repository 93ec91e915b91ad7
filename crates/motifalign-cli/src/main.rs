mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::{CliOverrides, PartialAppConfig};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 MotifAlign CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let (files, mode) = match &cli.command {
        Commands::Matrix(args) => (args.files.as_slice(), args.mode),
        Commands::Quick(args) => (args.files.as_slice(), None),
        Commands::Align(_) => (&[][..], None),
    };
    let overrides = CliOverrides {
        landmark_atom: cli.landmark_atom.as_deref(),
        polymer: cli.polymer.as_deref(),
        mode,
        files,
    };
    let config = PartialAppConfig::load(cli.config.as_deref())?.merge_with_cli(&overrides)?;

    let command_result = match &cli.command {
        Commands::Matrix(args) => {
            info!("Dispatching to 'matrix' command.");
            commands::matrix::run(args, &config)
        }
        Commands::Align(args) => {
            info!("Dispatching to 'align' command.");
            commands::align::run(args, &config)
        }
        Commands::Quick(args) => {
            info!("Dispatching to 'quick' command.");
            commands::quick::run(args, &config)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
