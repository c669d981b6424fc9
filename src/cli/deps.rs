//! Show what a template depends on.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;

use super::common::{ThemeArgs, explain};
use crate::core::OperationContext;

/// List every template a template needs, one per line as
/// `name -> path (theme)`, sorted by name.
#[derive(Args, Debug)]
pub struct DepsCommand {
    /// Template name, relative to the theme directory.
    pub template: String,

    #[command(flatten)]
    pub theme: ThemeArgs,
}

impl DepsCommand {
    /// Print to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or a declared layout cannot be found.
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
        let ctx = OperationContext::new();
        let deps = theme.dependencies(&ctx, &self.template).map_err(|e| explain(e, &theme, &ctx))?;

        for (name, record) in &deps {
            writeln!(out, "{} -> {} ({})", name, record.path(), record.theme())
                .context("Failed to write output")?;
        }
        Ok(())
    }
}
