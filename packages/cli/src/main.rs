mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, export, init, layers, new, scope, ApplyArgs, ExportArgs, InitArgs, LayersArgs, NewArgs,
    ScopeArgs,
};
use tracing_subscriber::EnvFilter;

/// Blockforge CLI - edit and export block documents
#[derive(Parser, Debug)]
#[command(name = "blockforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a blockforge.config.json
    Init(InitArgs),

    /// Create a new document
    New(NewArgs),

    /// Apply a JSON list of mutations to a document
    Apply(ApplyArgs),

    /// Export a document to HTML
    Export(ExportArgs),

    /// Scope an external stylesheet to the preview container
    Scope(ScopeArgs),

    /// Print the layer tree of a document
    Layers(LayersArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Scope(args) => scope(args, &cwd),
        Command::Layers(args) => layers(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
