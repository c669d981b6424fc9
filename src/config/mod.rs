//! Theme configuration for themekit
//!
//! Themes, their parent links and the settings applied to every theme are
//! described in one TOML file:
//!
//! ```toml
//! # Bypass the compiled-unit cache (useful while editing templates)
//! debug = false
//! # Register ternary/empty/dump/has on every theme
//! builtin_functions = true
//!
//! [[theme]]
//! name = "base"
//!
//! [[theme]]
//! name = "site"
//! parent = "base"
//! ```
//!
//! # Location
//!
//! 1. An explicit path (the CLI's `--config`)
//! 2. The `THEMEKIT_CONFIG` environment variable
//! 3. `themekit.toml` in the working directory
//!
//! `THEMEKIT_DEBUG` overrides the file's `debug` setting.
//!
//! # Validation
//!
//! Theme names must be non-empty and unique, parents must name a configured
//! theme, and parent links must not loop. [`ThemeSet::from_config`] turns a
//! valid configuration into linked [`Theme`]s.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{CONFIG_ENV, DEBUG_ENV, DEFAULT_CONFIG_FILE};
use crate::store::Store;
use crate::templating::builtin_functions;
use crate::theme::Theme;

/// Top-level themes configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemesConfig {
    /// Debug mode applied to every theme
    #[serde(default)]
    pub debug: bool,

    /// Whether the built-in helper functions are registered on every theme
    #[serde(default)]
    pub builtin_functions: bool,

    /// Configured themes, in file order
    #[serde(default, rename = "theme", skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<ThemeConfig>,
}

/// One `[[theme]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme name, also the theme's directory in a filesystem store
    pub name: String,

    /// Theme consulted when this one lacks a template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl ThemeConfig {
    /// A parentless theme.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Builder setting the parent theme.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

impl ThemesConfig {
    /// Configuration with a single parentless theme.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            themes: vec![ThemeConfig::new(name)],
            ..Self::default()
        }
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML, unknown keys, or a configuration that
    /// fails [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).context("Failed to parse themes configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or
    /// [`from_toml_str`](Self::from_toml_str) fails.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read themes configuration from {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid themes configuration in {}", path.display()))
    }

    /// Default configuration path, honoring `THEMEKIT_CONFIG`.
    pub fn default_path() -> PathBuf {
        Self::default_path_with(|key| std::env::var(key).ok())
    }

    /// [`default_path`](Self::default_path) with an explicit environment lookup.
    pub fn default_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        match env(CONFIG_ENV) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Apply environment overrides (`THEMEKIT_DEBUG`).
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// [`apply_env`](Self::apply_env) with an explicit environment lookup.
    ///
    /// Unrecognized values are ignored with a warning.
    pub fn apply_env_with(&mut self, env: impl Fn(&str) -> Option<String>) {
        let Some(value) = env(DEBUG_ENV) else {
            return;
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => self.debug = true,
            "0" | "false" | "no" | "off" | "" => self.debug = false,
            other => tracing::warn!("Ignoring {}={:?}: expected true or false", DEBUG_ENV, other),
        }
    }

    /// Check names, parents and parent cycles.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut parents: HashMap<&str, Option<&str>> = HashMap::new();

        for theme in &self.themes {
            if theme.name.trim().is_empty() {
                bail!("Theme names must not be empty");
            }
            if parents.insert(theme.name.as_str(), theme.parent.as_deref()).is_some() {
                bail!("Theme '{}' is configured more than once", theme.name);
            }
        }

        for theme in &self.themes {
            let Some(parent) = theme.parent.as_deref() else {
                continue;
            };
            if !parents.contains_key(parent) {
                bail!("Theme '{}' has unknown parent '{}'", theme.name, parent);
            }

            let mut seen = HashSet::from([theme.name.as_str()]);
            let mut current = Some(parent);
            while let Some(name) = current {
                if !seen.insert(name) {
                    bail!("Parent chain of theme '{}' loops back to '{}'", theme.name, name);
                }
                current = parents.get(name).copied().flatten();
            }
        }

        Ok(())
    }

    /// Themes ordered so that every parent precedes its children.
    ///
    /// Assumes a validated configuration; themes in a loop are omitted.
    pub fn parents_first(&self) -> Vec<&ThemeConfig> {
        let by_name: HashMap<&str, &ThemeConfig> =
            self.themes.iter().map(|t| (t.name.as_str(), t)).collect();
        let mut placed: HashSet<&str> = HashSet::new();
        let mut ordered = Vec::with_capacity(self.themes.len());

        for theme in &self.themes {
            let mut chain = Vec::new();
            let mut current = Some(theme);
            while let Some(t) = current {
                if placed.contains(t.name.as_str()) || chain.iter().any(|c: &&ThemeConfig| c.name == t.name) {
                    break;
                }
                chain.push(t);
                current = t.parent.as_deref().and_then(|p| by_name.get(p).copied());
            }
            for t in chain.into_iter().rev() {
                placed.insert(t.name.as_str());
                ordered.push(t);
            }
        }

        ordered
    }
}

/// Linked themes built from a [`ThemesConfig`].
#[derive(Debug, Default)]
pub struct ThemeSet {
    themes: BTreeMap<String, Arc<Theme>>,
}

impl ThemeSet {
    /// Create every configured theme over `store`, apply the shared settings
    /// and link parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &ThemesConfig, store: Arc<dyn Store>) -> Result<Self> {
        config.validate()?;

        let mut themes = BTreeMap::new();
        for theme_config in &config.themes {
            let theme = Theme::new(theme_config.name.clone(), Arc::clone(&store));
            if config.builtin_functions {
                theme.add_func_map(builtin_functions());
            }
            theme.set_debug(config.debug);
            themes.insert(theme_config.name.clone(), Arc::new(theme));
        }

        for theme_config in config.parents_first() {
            let Some(parent_name) = theme_config.parent.as_deref() else {
                continue;
            };
            let (Some(theme), Some(parent)) = (themes.get(&theme_config.name), themes.get(parent_name))
            else {
                bail!("Theme '{}' has unknown parent '{}'", theme_config.name, parent_name);
            };
            theme
                .set_parent(Some(Arc::clone(parent)))
                .with_context(|| format!("Failed to link theme '{}'", theme_config.name))?;
        }

        tracing::debug!("Built {} theme(s) from configuration", themes.len());
        Ok(Self {
            themes,
        })
    }

    /// Theme named `name`.
    pub fn get(&self, name: &str) -> Option<Arc<Theme>> {
        self.themes.get(name).cloned()
    }

    /// Configured theme names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether no themes are configured.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
