//! themekit CLI entry point
//!
//! Parses arguments, sets up logging and runs the selected command:
//! - `render` - Render a template with JSON data
//! - `deps` - Show what a template depends on
//! - `list` - List the templates a theme can see

use anyhow::Result;
use clap::Parser;
use themekit::cli;
use themekit::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.init_logging();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
