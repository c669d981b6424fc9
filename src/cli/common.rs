//! Shared arguments and helpers for themekit commands.

use anyhow::{Result, anyhow};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use strsim::levenshtein;

use crate::config::{ThemeSet, ThemesConfig};
use crate::constants::{DEFAULT_THEME, MAX_SUGGESTIONS, SUGGESTION_DISTANCE_RATIO};
use crate::core::{ErrorContext, OperationContext, ThemeError, theme_error_context};
use crate::store::{FsStore, Store};
use crate::theme::Theme;

/// Theme selection shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ThemeArgs {
    /// Directory holding one subdirectory per theme.
    #[arg(short, long, env = "THEMEKIT_ROOT")]
    pub root: PathBuf,

    /// Theme to use.
    #[arg(short, long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Themes configuration file (defaults to `$THEMEKIT_CONFIG` or
    /// `./themekit.toml` when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bypass the compiled-unit cache.
    #[arg(long)]
    pub debug: bool,
}

impl ThemeArgs {
    /// Effective configuration for this invocation.
    ///
    /// Without a configuration file, a single parentless theme named by
    /// `--theme` is configured. `THEMEKIT_DEBUG` and `--debug` apply on top.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is given or found but cannot be
    /// loaded.
    pub fn load_config(&self) -> Result<ThemesConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => Some(ThemesConfig::default_path()).filter(|p| p.is_file()),
        };

        let mut config = match path {
            Some(path) => {
                tracing::debug!("Loading themes configuration from {}", path.display());
                ThemesConfig::load(&path)?
            }
            None => ThemesConfig::single(&self.theme),
        };

        config.apply_env();
        if self.debug {
            config.debug = true;
        }
        Ok(config)
    }

    /// Build the selected theme over a filesystem store at `--root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or does not define the
    /// selected theme.
    pub fn build_theme(&self) -> Result<Arc<Theme>> {
        let config = self.load_config()?;
        let store: Arc<dyn Store> = Arc::new(FsStore::new(&self.root));
        let themes = ThemeSet::from_config(&config, store)?;

        themes.get(&self.theme).ok_or_else(|| {
            let known: Vec<&str> = themes.names().collect();
            anyhow!("Theme '{}' is not configured (known themes: {})", self.theme, known.join(", "))
        })
    }
}

/// Names from `candidates` close to `target`, closest first.
///
/// A candidate qualifies when its edit distance is at most half of the length
/// of `target`; at most three are returned.
pub fn similar_names(target: &str, candidates: &[String]) -> Vec<String> {
    let limit = (target.chars().count() as f64 * SUGGESTION_DISTANCE_RATIO) as usize;

    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .filter(|c| c.as_str() != target)
        .map(|c| (levenshtein(target, c), c))
        .filter(|(distance, _)| *distance <= limit)
        .collect();
    scored.sort();

    scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, c)| c.clone()).collect()
}

/// Turn a theme error into a CLI error, suggesting similar template names for
/// a missing template.
pub fn explain(error: ThemeError, theme: &Theme, ctx: &OperationContext) -> anyhow::Error {
    let name = match &error {
        ThemeError::NotFound {
            name,
            ..
        } => name.clone(),
        _ => return error.into(),
    };

    let candidates = match theme.template_names(ctx) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!("Cannot list templates for suggestions: {}", e);
            return error.into();
        }
    };
    let similar = similar_names(&name, &candidates);
    if similar.is_empty() {
        return error.into();
    }

    let context: ErrorContext = theme_error_context(&error)
        .with_suggestion(format!("Did you mean one of these? {}", similar.join(", ")));
    anyhow::Error::new(context)
}
