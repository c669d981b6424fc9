//! Render a template to stdout.

use anyhow::{Context, Result};
use clap::Args;
use std::io::{Read, Write};
use std::path::PathBuf;

use super::common::{ThemeArgs, explain};
use crate::core::OperationContext;

/// Render a template with JSON data.
///
/// # Examples
///
/// ```bash
/// themekit render home.html --root themes --data page.json
/// themekit render home.html --root themes --theme site --data - < page.json
/// ```
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template name, relative to the theme directory.
    pub template: String,

    #[command(flatten)]
    pub theme: ThemeArgs,

    /// JSON file with the template data (`-` reads stdin). Without it the
    /// template renders with an empty context.
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

impl RenderCommand {
    /// Render to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or the template fails to
    /// resolve, assemble or execute.
    pub fn execute(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute_to(&mut out)?;
        out.flush().context("Failed to flush output")
    }

    /// Render into `out`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_to<W: Write>(&self, out: W) -> Result<()> {
        let data = self.load_data()?;
        let theme = self.theme.build_theme()?;
        let ctx = OperationContext::new();

        tracing::debug!("Rendering '{}' with theme '{}'", self.template, theme.name());
        theme.write(&ctx, out, &self.template, &data).map_err(|e| explain(e, &theme, &ctx))
    }

    fn load_data(&self) -> Result<serde_json::Value> {
        let Some(path) = &self.data else {
            return Ok(serde_json::Value::Null);
        };

        let content = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read data from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read data file {}", path.display()))?
        };

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON data from {}", path.display()))
    }
}
