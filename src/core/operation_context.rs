//! Operation-scoped context carried through template lookups.
//!
//! Provides a context object that flows from [`Theme::write`] through the
//! dependency resolver down to every [`Store::find`] call, carrying a
//! cancellation flag.
//!
//! # Cancellation
//!
//! Cancellation is advisory. The theme engine never checks the flag itself; it
//! only forwards the context so that a store performing slow I/O can stop early.
//! The bundled stores ignore it.
//!
//! # Example
//!
//! ```rust
//! use themekit::core::OperationContext;
//!
//! let ctx = OperationContext::new();
//! let shared = ctx.clone();
//!
//! assert!(!shared.is_cancelled());
//! ctx.cancel();
//! assert!(shared.is_cancelled());
//! ```
//!
//! [`Theme::write`]: crate::theme::Theme::write
//! [`Store::find`]: crate::store::Store::find

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Context for a single theme operation (render, dependency listing, etc.)
///
/// Clones share the same cancellation flag, so a caller can keep one handle
/// and pass another down the call chain.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    cancelled: Arc<AtomicBool>,
}

impl OperationContext {
    /// Create a new, not-cancelled operation context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every operation sharing this context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
