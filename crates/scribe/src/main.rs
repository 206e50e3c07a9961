//! Scribe CLI - Markdown editor toolkit.
//!
//! Provides commands for:
//! - `render`: Render a Markdown file to HTML
//! - `tree`: List the files of a project directory
//! - `theme`: Show or change the saved theme preference
//! - `commit` / `push`: Commit and push a project with git

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommitArgs, PushArgs, RenderArgs, ThemeArgs, TreeArgs};
use output::Output;

/// Scribe - Markdown editor toolkit.
#[derive(Parser)]
#[command(name = "scribe", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise `RUST_LOG` is used).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file to HTML.
    Render(RenderArgs),
    /// Print the file tree of a project directory.
    Tree(TreeArgs),
    /// Show or change the theme preference.
    Theme(ThemeArgs),
    /// Stage all changes and commit them.
    Commit(CommitArgs),
    /// Push the current branch.
    Push(PushArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Tree(args) => args.execute(&output),
        Commands::Theme(args) => args.execute(&output),
        Commands::Commit(args) => args.execute(&output),
        Commands::Push(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
