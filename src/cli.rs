//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// athena-pack - Athena application packager
///
/// Resolve the version, freeze the application and patch the bundle metadata.
#[derive(Parser, Debug)]
#[command(
    name = "athena-pack",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package the Athena desktop application as a macOS app bundle",
    long_about = "athena-pack resolves the application version, freezes Athena with PyInstaller \
                  into dist/Athena.app and patches the bundle's Info.plist \
                  (NSHighResolutionCapable, CFBundleShortVersionString).",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  athena-pack build\n    \
                  athena-pack build -- --noconfirm --log-level WARN\n    \
                  athena-pack build --dry-run\n    \
                  athena-pack plan --json"
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "ATHENA_PACK_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Configuration file, relative to the workspace (defaults to athena-pack.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the application bundle
    Build(BuildArgs),

    /// Show the commands a build would run
    Plan(PlanArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Build dist/Athena.app:\n    athena-pack build\n\n\
                   Forward options to PyInstaller:\n    athena-pack build -- --noconfirm --log-level WARN\n\n\
                   Rebuild from scratch:\n    athena-pack build --clean\n\n\
                   Show what would run:\n    athena-pack build --dry-run")]
pub struct BuildArgs {
    /// Print the plan and exit without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Remove the previous bundle before freezing
    #[arg(long)]
    pub clean: bool,

    /// Extra arguments appended verbatim to the freezer command line
    #[arg(
        value_name = "FREEZER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub freezer_args: Vec<String>,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the build plan:\n    athena-pack plan\n\n\
                  Machine-readable plan:\n    athena-pack plan --json")]
pub struct PlanArgs {
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Extra arguments appended verbatim to the freezer command line
    #[arg(
        value_name = "FREEZER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub freezer_args: Vec<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    athena-pack completions --shell bash > ~/.bash_completion.d/athena-pack\n\n\
                  Generate zsh completions:\n    athena-pack completions --shell zsh > ~/.zfunc/_athena-pack")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: clap_complete::Shell,
}
