//! Command-line interface for themekit.
//!
//! # Commands
//!
//! - [`render`](RenderCommand) - Render a template with JSON data to stdout
//! - [`deps`](DepsCommand) - Show the templates a template depends on
//! - [`list`](ListCommand) - List the templates a theme can see
//!
//! Every command reads templates from `--root/<theme>/<name>` and accepts the
//! shared [`ThemeArgs`]. Parent themes come from a themes configuration file
//! (see [`crate::config`]).
//!
//! # Logging
//!
//! `RUST_LOG` takes precedence. Otherwise `--verbose` enables debug output for
//! themekit, `--quiet` turns logging off, and the default is warnings only.
//! Logs go to stderr so rendered output on stdout stays clean.

mod common;
mod deps;
mod list;
mod render;

pub use common::{ThemeArgs, explain, similar_names};
pub use deps::DepsCommand;
pub use list::ListCommand;
pub use render::RenderCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "themekit",
    about = "Render themed templates with layouts and parent-theme fallback",
    version,
    long_about = "themekit resolves a template's layouts and partials across a chain of themes, \
                  compiles them into one unit and renders it with JSON data."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template to stdout
    Render(RenderCommand),
    /// Show what a template depends on
    Deps(DepsCommand),
    /// List the templates a theme can see
    List(ListCommand),
}

impl Cli {
    /// Log filter directive implied by the flags, or `None` when logging is off.
    #[must_use]
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("themekit=debug")
        } else if self.quiet {
            None
        } else {
            Some("warn")
        }
    }

    /// Install the stderr tracing subscriber.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = self.log_level() {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Run the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error for display by the caller.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Render(cmd) => cmd.execute(),
            Commands::Deps(cmd) => cmd.execute(),
            Commands::List(cmd) => cmd.execute(),
        }
    }
}
