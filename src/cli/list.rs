//! List the templates a theme can see.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;

use super::common::ThemeArgs;
use crate::core::OperationContext;

/// List template names available to a theme, including inherited ones.
#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(flatten)]
    pub theme: ThemeArgs,
}

impl ListCommand {
    /// Print to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if a theme directory cannot be walked.
    pub fn execute(self) -> Result<()> {
        let stdout = std::io::stdout();
        self.execute_to(&mut stdout.lock())
    }

    /// Print into `out`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_to<W: Write>(&self, mut out: W) -> Result<()> {
        let theme = self.theme.build_theme()?;
        let names = theme.template_names(&OperationContext::new())?;

        if names.is_empty() {
            tracing::info!("Theme '{}' has no templates", theme.name());
        }
        for name in names {
            writeln!(out, "{name}").context("Failed to write output")?;
        }
        Ok(())
    }
}
