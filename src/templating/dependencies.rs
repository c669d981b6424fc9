//! Dependency discovery for theme templates.
//!
//! Given a root template name, [`resolve`] walks everything the root needs in
//! order to execute: the template its declaration marker layers it onto, and
//! every template named by a reference marker (`include`, `import`,
//! `extends`). The walk is depth-first and memoized by name, so shared
//! dependencies and reference cycles are visited once.
//!
//! # Required vs optional dependencies
//!
//! A declared path is mandatory: if it cannot be found, resolution fails.
//! Referenced templates are optional: a `NotFound` for one of them is logged
//! and skipped, since the reference may be guarded (`ignore missing`) or never
//! reached at execution time. Any other failure aborts resolution.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use super::markers::scan_references;
use super::record::TemplateRecord;
use crate::core::{OperationContext, ThemeError};

/// Single-name template lookup used by the resolver.
///
/// Implemented by [`Theme`](crate::theme::Theme), which adds parent-theme
/// fallback on top of its store.
pub trait TemplateFinder {
    /// Find `name`, returning a `NotFound`-kind error when it is absent.
    fn find(&self, ctx: &OperationContext, name: &str) -> Result<Arc<TemplateRecord>, ThemeError>;
}

/// Every template record needed to execute one requested template.
///
/// Keys are logical names; iteration is ordered by name so unit assembly is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    records: BTreeMap<String, Arc<TemplateRecord>>,
}

impl DependencySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has been resolved.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Record resolved under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<TemplateRecord>> {
        self.records.get(name)
    }

    /// Number of resolved templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolved names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// `(name, record)` pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Arc<TemplateRecord>> {
        self.records.iter()
    }

    /// Insert `record` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, record: Arc<TemplateRecord>) {
        self.records.insert(name.into(), record);
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = (&'a String, &'a Arc<TemplateRecord>);
    type IntoIter = btree_map::Iter<'a, String, Arc<TemplateRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Resolve the full dependency set of `root`.
///
/// # Errors
///
/// - `NotFound` if `root` itself, or any declared path in its layout chain,
///   cannot be found
/// - Any non-`NotFound` error from the finder, for any dependency
pub fn resolve<F>(ctx: &OperationContext, finder: &F, root: &str) -> Result<DependencySet, ThemeError>
where
    F: TemplateFinder + ?Sized,
{
    let mut set = DependencySet::new();
    collect(ctx, finder, &mut set, root)?;

    tracing::debug!("Resolved '{}' to {} template(s)", root, set.len());
    Ok(set)
}

fn collect<F>(
    ctx: &OperationContext,
    finder: &F,
    set: &mut DependencySet,
    name: &str,
) -> Result<(), ThemeError>
where
    F: TemplateFinder + ?Sized,
{
    if set.contains(name) {
        return Ok(());
    }

    let record = finder.find(ctx, name)?;
    set.insert(name, Arc::clone(&record));

    if !record.is_root() {
        tracing::trace!("'{}' layers onto '{}'", name, record.path());
        collect(ctx, finder, set, record.path())?;
    }

    for reference in scan_references(record.content()) {
        match collect(ctx, finder, set, &reference) {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                tracing::debug!(
                    "Optional reference '{}' from '{}' not resolved: {}",
                    reference,
                    name,
                    err
                );
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
