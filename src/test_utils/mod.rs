//! Test utilities for themekit
//!
//! Helpers shared by unit tests, the integration suite and the stress suite:
//!
//! - [`init_test_logging`] installs a test-friendly tracing subscriber once
//! - [`CountingStore`] wraps any store and records every lookup, so tests can
//!   assert cache hits ("the store was not consulted again") and inject
//!   non-absence failures
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use themekit::store::MemoryStore;
//! use themekit::test_utils::CountingStore;
//!
//! let memory = MemoryStore::new();
//! memory.add("t", "home", "hi");
//! let store = Arc::new(CountingStore::new(Arc::new(memory)));
//! assert_eq!(store.calls(), 0);
//! ```

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once, PoisonError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::{OperationContext, ThemeError};
use crate::store::Store;
use crate::templating::TemplateRecord;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. It uses the provided level, or
/// `RUST_LOG` when no level is given; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=themekit=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Store wrapper counting and recording every `find` call.
pub struct CountingStore {
    inner: Arc<dyn Store>,
    calls: AtomicUsize,
    lookups: Mutex<Vec<(String, String)>>,
    failures: DashMap<(String, String), String>,
}

impl CountingStore {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn Store>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            lookups: Mutex::new(Vec::new()),
            failures: DashMap::new(),
        }
    }

    /// Total `find` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `find` calls for one `theme/name`.
    pub fn calls_for(&self, theme: &str, name: &str) -> usize {
        self.lookups().iter().filter(|(t, n)| t == theme && n == name).count()
    }

    /// Every `(theme, name)` looked up, in call order.
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Forget recorded calls.
    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
        self.lookups.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Make lookups of `theme/name` fail with a store failure carrying `message`.
    pub fn fail_on(&self, theme: &str, name: &str, message: &str) {
        self.failures.insert((theme.to_string(), name.to_string()), message.to_string());
    }
}

impl Store for CountingStore {
    fn find(
        &self,
        ctx: &OperationContext,
        theme: &str,
        name: &str,
    ) -> Result<Arc<TemplateRecord>, ThemeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((theme.to_string(), name.to_string()));

        if let Some(message) = self.failures.get(&(theme.to_string(), name.to_string())) {
            return Err(ThemeError::store(theme, name, message.value().clone()));
        }
        self.inner.find(ctx, theme, name)
    }

    fn list(&self, ctx: &OperationContext, theme: &str) -> Result<Vec<String>, ThemeError> {
        self.inner.list(ctx, theme)
    }
}
