//! themekit - themed template resolution, assembly and caching
//!
//! A theme is a named namespace of Tera templates backed by a store. Themes can
//! be linked to a parent theme; a template missing from a theme is looked up in
//! its parent, then the parent's parent, and so on. Rendering a template
//! resolves everything it needs (its layouts and the partials it includes),
//! compiles the lot into one unit, caches that unit and executes it.
//!
//! # Architecture Overview
//!
//! ```text
//!   Theme::write(name, data)
//!     ├─ cache hit? ──────────────────────────────┐
//!     ├─ resolve: Theme::find ─► Store::find       │
//!     │            (parent fallback on NotFound)   │
//!     ├─ assemble: CompiledUnit::assemble          │
//!     └─ cache ──────────────────────────► CompiledUnit::execute ─► io::Write
//! ```
//!
//! # Core Modules
//!
//! - [`core`] - Error taxonomy ([`ThemeError`](core::ThemeError)) and the
//!   per-operation cancellation context
//! - [`templating`] - Marker scanning, template records, dependency
//!   resolution, unit assembly and helper functions
//! - [`theme`] - The [`Theme`](theme::Theme) facade: lookup with fallback,
//!   caching and configuration cascade
//! - [`store`] - Template stores: memory, filesystem and chains of stores
//! - [`config`] - TOML themes configuration and linked theme sets
//! - [`cli`] - The `themekit` command-line interface
//! - [`constants`] - Shared names and tuning values
//!
//! # Template Layout
//!
//! ```markdown
//! <!-- layouts/base.html -->
//! {% define "title" %}About{% enddefine %}
//! {% define "body" %}{% include "partials/team.html" %}{% enddefine %}
//! ```
//!
//! The leading comment makes `layouts/base.html` the skeleton this page is
//! rendered with; the define blocks fill the slots the skeleton includes.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use themekit::core::OperationContext;
//! use themekit::store::MemoryStore;
//! use themekit::theme::Theme;
//!
//! let store = Arc::new(MemoryStore::new());
//! store.add("base", "layout", "[{% include \"body\" ignore missing %}]");
//! store.add("site", "page", "<!-- layout -->\n{% define \"body\" %}{{ msg }}{% enddefine %}");
//!
//! let base = Arc::new(Theme::new("base", store.clone()));
//! let site = Theme::new("site", store);
//! site.set_parent(Some(base))?;
//!
//! let mut out = Vec::new();
//! site.write(&OperationContext::new(), &mut out, "page", &serde_json::json!({"msg": "hi"}))?;
//! assert_eq!(out, b"[hi]");
//! # Ok::<(), themekit::core::ThemeError>(())
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! themekit render page.html --root themes --theme site --data page.json
//! themekit deps page.html --root themes --theme site
//! themekit list --root themes --theme site --config themekit.toml
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod store;
pub mod templating;
pub mod theme;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
