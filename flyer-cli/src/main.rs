//! flyer: pick a flyer template, fill its fields, render it.
//!
//! # Usage
//!
//! ```text
//! flyer init [--api-base <url>] [--force]
//! flyer templates [--json] [--local]
//! flyer fields <template> [--json] [--local]
//! flyer generate <template> [--set NAME=VALUE]... [--params <file>] [--out <file>] [--local]
//! ```
//!
//! Every command but `init` also takes `--catalog <file>` to read templates
//! from a local catalog file.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    fields::FieldsArgs, generate::GenerateArgs, init::InitArgs, templates::TemplatesArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "flyer",
    version,
    about = "Fill flyer templates and render them",
    long_about = None,
)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default ~/.flyer/config.yaml.
    Init(InitArgs),

    /// List templates available for selection.
    Templates(TemplatesArgs),

    /// Show the fields a template asks for.
    Fields(FieldsArgs),

    /// Fill a template's fields and render the flyer.
    Generate(GenerateArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Templates(args) => args.run(),
        Commands::Fields(args) => args.run(),
        Commands::Generate(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
