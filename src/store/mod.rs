//! Template stores.
//!
//! A [`Store`] maps `(theme, name)` to a [`TemplateRecord`]. Themes only ever
//! talk to their store through this trait, so the engine works unchanged over
//! memory, a directory tree, or an ordered chain of both.
//!
//! # Contract
//!
//! - A missing template is reported as [`ThemeError::NotFound`]. This is the
//!   only kind a theme will answer by consulting its parent theme.
//! - Every other failure is a [`ThemeError::Store`] and aborts the lookup.
//! - Stores may honor [`OperationContext::is_cancelled`]; the bundled ones do not.
//!
//! # Available Stores
//!
//! - [`MemoryStore`] - Concurrent in-memory map, handy for tests and embedding
//! - [`FsStore`] - Reads `<root>/<theme>/<name>` from disk on every lookup
//! - [`StoreChain`] - Ordered list of stores; the first hit wins

mod chain;
mod fs;
mod memory;

pub use chain::StoreChain;
pub use fs::FsStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::core::{OperationContext, ThemeError};
use crate::templating::TemplateRecord;

/// Source of raw templates, keyed by theme and template name.
pub trait Store: Send + Sync {
    /// Load `name` from `theme`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::NotFound`] when the template does not exist, or
    /// [`ThemeError::Store`] for any other failure.
    fn find(
        &self,
        ctx: &OperationContext,
        theme: &str,
        name: &str,
    ) -> Result<Arc<TemplateRecord>, ThemeError>;

    /// Template names available in `theme`, sorted.
    ///
    /// Used for diagnostics only; stores that cannot enumerate return an
    /// empty list.
    fn list(&self, _ctx: &OperationContext, _theme: &str) -> Result<Vec<String>, ThemeError> {
        Ok(Vec::new())
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn find(
        &self,
        ctx: &OperationContext,
        theme: &str,
        name: &str,
    ) -> Result<Arc<TemplateRecord>, ThemeError> {
        (**self).find(ctx, theme, name)
    }

    fn list(&self, ctx: &OperationContext, theme: &str) -> Result<Vec<String>, ThemeError> {
        (**self).list(ctx, theme)
    }
}
