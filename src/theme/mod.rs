//! Themes: named template namespaces with caching and parent fallback.
//!
//! A [`Theme`] answers [`write`](Theme::write) calls by resolving the requested
//! template's dependencies, assembling them into a [`CompiledUnit`], caching the
//! unit and executing it against caller data.
//!
//! # Lookup
//!
//! Templates are looked up in the theme's own store first. When the store
//! reports the template as absent and a parent theme is linked, the parent is
//! asked next (and may ask its own parent). Only absence triggers fallback.
//!
//! # Configuration Cascade
//!
//! Changing the debug flag, the function registry or the parent link clears
//! the theme's cache and then pushes the theme's function registry and debug
//! flag onto its parent, which does the same for its own parent. The parent's
//! previous registry is replaced, not merged.
//!
//! # Concurrency
//!
//! All methods take `&self` and may be called from many threads at once.
//! Concurrent misses for the same name each compile their own unit; the last
//! one stored wins. A configuration change racing an in-flight `write` does not
//! affect that call, and a unit compiled under the old configuration may land
//! in the cache right after it was cleared.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use themekit::core::OperationContext;
//! use themekit::store::MemoryStore;
//! use themekit::theme::Theme;
//!
//! let store = MemoryStore::new();
//! store.add("t", "home", "<h1>{{ Title }}</h1>");
//!
//! let theme = Theme::new("t", Arc::new(store));
//! let mut out = Vec::new();
//! theme
//!     .write(&OperationContext::new(), &mut out, "home", &serde_json::json!({"Title": "Hi"}))
//!     .unwrap();
//! assert_eq!(out, b"<h1>Hi</h1>");
//! ```

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::core::{OperationContext, ThemeError};
use crate::store::Store;
use crate::templating::{
    CompiledUnit, DependencySet, FuncMap, TemplateFinder, TemplateFunction, TemplateRecord,
    resolve,
};

/// Serializes parent linking across all themes.
static PARENT_LINKS: Mutex<()> = Mutex::new(());

/// A named template namespace backed by a store.
pub struct Theme {
    name: String,
    store: Arc<dyn Store>,
    cache: DashMap<String, Arc<CompiledUnit>>,
    functions: DashMap<String, TemplateFunction>,
    debug: AtomicBool,
    parent: RwLock<Option<Arc<Theme>>>,
}

impl std::fmt::Debug for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theme")
            .field("name", &self.name)
            .field("debug", &self.debug())
            .field("cached", &self.cache.len())
            .field("functions", &self.functions.len())
            .field("parent", &self.parent().map(|p| p.name.clone()))
            .finish()
    }
}

impl Theme {
    /// Create a theme named `name` reading from `store`.
    ///
    /// The theme starts with no functions, no parent and debug off.
    pub fn new(name: impl Into<String>, store: Arc<dyn Store>) -> Self {
        Self {
            name: name.into(),
            store,
            cache: DashMap::new(),
            functions: DashMap::new(),
            debug: AtomicBool::new(false),
            parent: RwLock::new(None),
        }
    }

    /// Theme name, as passed to the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether caching is bypassed.
    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }

    /// Turn debug mode on or off.
    ///
    /// In debug mode every `write` re-resolves and recompiles from the store.
    /// Setting the current value again does nothing.
    pub fn set_debug(&self, enabled: bool) {
        if self.debug.swap(enabled, Ordering::SeqCst) == enabled {
            return;
        }
        tracing::debug!("Theme '{}' debug set to {}", self.name, enabled);
        self.reset();
    }

    /// Currently linked parent theme.
    pub fn parent(&self) -> Option<Arc<Theme>> {
        self.parent.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Link (or with `None`, unlink) the parent theme.
    ///
    /// The new parent immediately receives this theme's function registry and
    /// debug flag.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ParentCycle`] if `parent` is this theme or one of
    /// its descendants; nothing changes in that case.
    pub fn set_parent(&self, parent: Option<Arc<Theme>>) -> Result<(), ThemeError> {
        // Held across the ancestor walk and the store so two links cannot
        // close a loop between them.
        let linking = PARENT_LINKS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(candidate) = &parent {
            let mut ancestor = Some(Arc::clone(candidate));
            while let Some(theme) = ancestor {
                if std::ptr::eq(Arc::as_ptr(&theme), self) {
                    return Err(ThemeError::ParentCycle {
                        theme: self.name.clone(),
                        parent: candidate.name.clone(),
                    });
                }
                ancestor = theme.parent();
            }
        }

        tracing::debug!(
            "Theme '{}' parent set to {:?}",
            self.name,
            parent.as_ref().map(|p| p.name.as_str())
        );
        *self.parent.write().unwrap_or_else(PoisonError::into_inner) = parent;
        drop(linking);
        self.reset();
        Ok(())
    }

    /// Snapshot of the function registry.
    pub fn func_map(&self) -> FuncMap {
        self.functions
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    /// Replace the function registry with `funcs`.
    pub fn set_func_map(&self, funcs: FuncMap) {
        self.functions.clear();
        self.add_func_map(funcs);
    }

    /// Merge `funcs` into the registry, replacing same-named entries.
    pub fn add_func_map(&self, funcs: FuncMap) {
        for (name, f) in funcs {
            self.functions.insert(name, f);
        }
        self.reset();
    }

    /// Drop every cached unit. Like any configuration change, this cascades to
    /// the parent theme.
    pub fn clear(&self) {
        self.reset();
    }

    /// Number of cached compiled units.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn reset(&self) {
        self.cache.clear();

        if let Some(parent) = self.parent() {
            tracing::debug!("Theme '{}' cascading configuration to '{}'", self.name, parent.name);
            parent.set_func_map(self.func_map());
            parent.set_debug(self.debug());
        }
    }

    /// Look `name` up in this theme, falling back to the parent chain when the
    /// store reports it absent.
    ///
    /// The returned record carries the theme it was actually found in.
    ///
    /// # Errors
    ///
    /// A [`ThemeError::NotFound`] naming this theme when no theme in the chain
    /// has the template, with the local and parent failures as causes. Any
    /// other failure is returned unchanged.
    pub fn find(&self, ctx: &OperationContext, name: &str) -> Result<Arc<TemplateRecord>, ThemeError> {
        let local = match self.store.find(ctx, &self.name, name) {
            Ok(record) => return Ok(record),
            Err(err) if err.is_not_found() => err,
            Err(err) => return Err(err),
        };

        let mut causes = vec![local];
        if let Some(parent) = self.parent() {
            tracing::trace!("'{}' not in theme '{}', trying '{}'", name, self.name, parent.name);
            match parent.find(ctx, name) {
                Ok(record) => return Ok(record),
                Err(err) if err.is_not_found() => causes.push(err),
                Err(err) => return Err(err),
            }
        }

        Err(ThemeError::NotFound {
            theme: self.name.clone(),
            name: name.to_string(),
            causes,
        })
    }

    /// Every template `name` depends on, resolved through this theme.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find) for `name` and its declared layouts.
    pub fn dependencies(&self, ctx: &OperationContext, name: &str) -> Result<DependencySet, ThemeError> {
        resolve(ctx, self, name)
    }

    /// Template names visible from this theme, including the parent chain.
    ///
    /// # Errors
    ///
    /// Returns the first store failure encountered.
    pub fn template_names(&self, ctx: &OperationContext) -> Result<Vec<String>, ThemeError> {
        let mut names: BTreeSet<String> = self.store.list(ctx, &self.name)?.into_iter().collect();
        if let Some(parent) = self.parent() {
            names.extend(parent.template_names(ctx)?);
        }
        Ok(names.into_iter().collect())
    }

    /// Execute template `name` against `data`, streaming into `out`.
    ///
    /// Outside debug mode the compiled unit is cached under `name`, and later
    /// calls do not touch the store until the configuration changes.
    ///
    /// # Errors
    ///
    /// - Resolution failures ([`ThemeError::NotFound`], [`ThemeError::Store`])
    /// - Assembly failures ([`ThemeError::Parse`], [`ThemeError::LayoutCycle`])
    /// - [`ThemeError::Execute`]; output written before the failure stays in `out`
    pub fn write<T, W>(
        &self,
        ctx: &OperationContext,
        out: W,
        name: &str,
        data: &T,
    ) -> Result<(), ThemeError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let bypass = self.debug();
        let cached = if bypass {
            None
        } else {
            self.cache.get(name).map(|entry| Arc::clone(entry.value()))
        };

        let unit = match cached {
            Some(unit) => {
                tracing::debug!("Cache hit for '{}' in theme '{}'", name, self.name);
                unit
            }
            None => self.compile(ctx, name, bypass)?,
        };

        unit.execute(data, out)
    }

    fn compile(&self, ctx: &OperationContext, name: &str, bypass: bool) -> Result<Arc<CompiledUnit>, ThemeError> {
        tracing::debug!("Compiling '{}' in theme '{}'", name, self.name);

        let deps = resolve(ctx, self, name)?;
        let unit = Arc::new(CompiledUnit::assemble(&deps, name, &self.func_map())?);

        if !bypass {
            self.cache.insert(name.to_string(), Arc::clone(&unit));
        }
        Ok(unit)
    }
}

impl TemplateFinder for Theme {
    fn find(&self, ctx: &OperationContext, name: &str) -> Result<Arc<TemplateRecord>, ThemeError> {
        Theme::find(self, ctx, name)
    }
}
