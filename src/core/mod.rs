//! Core types shared by every themekit module.
//!
//! - [`error`] - The [`ThemeError`] taxonomy and user-facing [`ErrorContext`]
//! - [`operation_context`] - [`OperationContext`], the cancellation token passed
//!   from callers down to template stores

pub mod error;
pub mod operation_context;

pub use error::{ErrorContext, StoreFailure, ThemeError, theme_error_context, user_friendly_error};
pub use operation_context::OperationContext;
