//! athena-pack - Athena application packager
//!
//! Packages the Athena desktop application into a macOS application bundle:
//! resolves the version, freezes the application with PyInstaller and
//! patches the bundle's Info.plist.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod pipeline;
mod process;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build(args) => commands::build::run(cli.workspace, config, args),
        Commands::Plan(args) => commands::plan::run(cli.workspace, config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
