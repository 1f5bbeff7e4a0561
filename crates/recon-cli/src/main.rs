//! Recon CLI - keyed reconciliation of tabular exports.

mod cli;
mod commands;
mod logging;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Reconcile {
            file_a,
            file_b,
            key,
            secondary_keys,
            output,
            format,
        } => commands::reconcile::run(
            file_a,
            file_b,
            key,
            secondary_keys,
            output,
            format,
            cli.verbose,
        ),

        Commands::Inspect { file, json } => commands::inspect::run(file, json, cli.verbose),

        Commands::Serve(args) => commands::serve::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
