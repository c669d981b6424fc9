//! In-memory template store.

use dashmap::DashMap;
use std::sync::Arc;

use super::Store;
use crate::core::{OperationContext, ThemeError};
use crate::templating::TemplateRecord;

/// Concurrent map of templates keyed by `(theme, name)`.
///
/// Records are built once on [`add`](Self::add) and shared on every lookup.
///
/// # Examples
///
/// ```rust
/// use themekit::core::OperationContext;
/// use themekit::store::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// store.add("site", "home", "<h1>{{ title }}</h1>");
///
/// let record = store.find(&OperationContext::new(), "site", "home").unwrap();
/// assert_eq!(record.content(), "<h1>{{ title }}</h1>");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: DashMap<(String, String), Arc<TemplateRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace `theme/name`.
    pub fn add(&self, theme: impl Into<String>, name: impl Into<String>, raw: impl Into<String>) {
        let theme = theme.into();
        let name = name.into();
        let record = Arc::new(TemplateRecord::new(theme.clone(), name.clone(), raw));
        self.templates.insert((theme, name), record);
    }

    /// Remove `theme/name`, returning whether it existed.
    pub fn remove(&self, theme: &str, name: &str) -> bool {
        self.templates.remove(&(theme.to_string(), name.to_string())).is_some()
    }

    /// Total number of templates across all themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the store holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Store for MemoryStore {
    fn find(
        &self,
        _ctx: &OperationContext,
        theme: &str,
        name: &str,
    ) -> Result<Arc<TemplateRecord>, ThemeError> {
        self.templates
            .get(&(theme.to_string(), name.to_string()))
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ThemeError::not_found(theme, name))
    }

    fn list(&self, _ctx: &OperationContext, theme: &str) -> Result<Vec<String>, ThemeError> {
        let mut names: Vec<String> = self
            .templates
            .iter()
            .filter(|entry| entry.key().0 == theme)
            .map(|entry| entry.key().1.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
