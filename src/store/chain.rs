//! Ordered chain of stores.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::Store;
use crate::core::{OperationContext, ThemeError};
use crate::templating::TemplateRecord;

/// Consults stores in order; the first one that has the template wins.
///
/// A `NotFound` from one store moves on to the next. Any other failure aborts
/// the lookup, so a broken store is never silently skipped.
#[derive(Default, Clone)]
pub struct StoreChain {
    stores: Vec<Arc<dyn Store>>,
}

impl std::fmt::Debug for StoreChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreChain").field("stores", &self.stores.len()).finish()
    }
}

impl StoreChain {
    /// Create an empty chain. An empty chain finds nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `store`, consulted after every store already in the chain.
    pub fn add(&mut self, store: Arc<dyn Store>) {
        self.stores.push(store);
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, store: Arc<dyn Store>) -> Self {
        self.add(store);
        self
    }

    /// Number of stores in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the chain has no stores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl Store for StoreChain {
    fn find(
        &self,
        ctx: &OperationContext,
        theme: &str,
        name: &str,
    ) -> Result<Arc<TemplateRecord>, ThemeError> {
        for store in &self.stores {
            match store.find(ctx, theme, name) {
                Err(err) if err.is_not_found() => continue,
                result => return result,
            }
        }
        Err(ThemeError::not_found(theme, name))
    }

    fn list(&self, ctx: &OperationContext, theme: &str) -> Result<Vec<String>, ThemeError> {
        let mut names = BTreeSet::new();
        for store in &self.stores {
            names.extend(store.list(ctx, theme)?);
        }
        Ok(names.into_iter().collect())
    }
}
