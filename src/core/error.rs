//! Error handling for themekit
//!
//! This module provides the error taxonomy of the theme engine and the
//! user-facing error reporting used by the command-line interface.
//!
//! # Architecture
//!
//! - [`ThemeError`] - Strongly-typed failures returned by the library core
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! # Error Categories
//!
//! - **Absence**: [`ThemeError::NotFound`] is the only kind eligible for parent
//!   theme fallback. Stores report missing templates with it, and a theme
//!   re-wraps exhausted fallbacks into a `NotFound` naming the originally
//!   requested theme and template, chaining every underlying cause.
//! - **Store failures**: [`ThemeError::Store`] covers everything a store can fail
//!   with other than absence. Never triggers fallback.
//! - **Template failures**: [`ThemeError::Parse`] for invalid fragments and
//!   [`ThemeError::Execute`] for runtime evaluation errors.
//! - **Layout**: [`ThemeError::LayoutCycle`] when declaration markers loop.
//! - **Configuration**: [`ThemeError::ParentCycle`] for rejected parent links.
//!
//! # Examples
//!
//! ```rust,no_run
//! use themekit::core::ThemeError;
//!
//! let err = ThemeError::not_found("default", "home.html");
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "template default/home.html not found");
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Boxed error produced by a template store for failures other than absence.
pub type StoreFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for theme operations.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Template absent at the given theme and name.
    ///
    /// `causes` holds the failures that led to this conclusion: the local store
    /// error and, when a parent theme was consulted, the parent's own
    /// `NotFound`. Stores usually report an empty list.
    #[error("template {theme}/{name} not found")]
    NotFound {
        /// Theme the lookup was issued against
        theme: String,
        /// Logical template name
        name: String,
        /// Underlying failures, local first
        causes: Vec<ThemeError>,
    },

    /// A store failed for a reason other than absence.
    #[error("store failed to load template {theme}/{name}")]
    Store {
        /// Theme the lookup was issued against
        theme: String,
        /// Logical template name
        name: String,
        /// Store-specific failure
        #[source]
        source: StoreFailure,
    },

    /// A template fragment is syntactically invalid.
    #[error("failed to parse template '{template}'")]
    Parse {
        /// Name of the offending fragment (or the unit root for link failures)
        template: String,
        /// Tera parse or link failure
        #[source]
        source: tera::Error,
    },

    /// A compiled unit failed while executing against caller data.
    #[error("failed to execute template '{template}'")]
    Execute {
        /// Requested template name
        template: String,
        /// Tera runtime failure
        #[source]
        source: tera::Error,
    },

    /// Declaration markers form a loop, so no template tops the chain.
    #[error("declared layouts of '{template}' loop: {}", .chain.join(" -> "))]
    LayoutCycle {
        /// Requested template name
        template: String,
        /// Names visited while chasing declared paths, ending at the repeat
        chain: Vec<String>,
    },

    /// The requested root is absent from its own dependency set.
    #[error("template '{name}' missing from its dependency set")]
    RootMissing {
        /// Requested template name
        name: String,
    },

    /// Linking `parent` would make `theme` its own ancestor.
    #[error("theme '{parent}' cannot become the parent of '{theme}': parent chain would loop")]
    ParentCycle {
        /// Theme whose parent was being set
        theme: String,
        /// Rejected parent theme
        parent: String,
    },
}

impl ThemeError {
    /// Builds a `NotFound` without underlying causes.
    pub fn not_found(theme: impl Into<String>, name: impl Into<String>) -> Self {
        ThemeError::NotFound {
            theme: theme.into(),
            name: name.into(),
            causes: Vec::new(),
        }
    }

    /// Builds a `Store` failure from any boxed error.
    pub fn store(
        theme: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<StoreFailure>,
    ) -> Self {
        ThemeError::Store {
            theme: theme.into(),
            name: name.into(),
            source: source.into(),
        }
    }

    /// Check if this error is the distinguished "template absent" kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ThemeError::NotFound { .. })
    }

    /// Failures chained under a `NotFound`; empty for every other kind.
    #[must_use]
    pub fn causes(&self) -> &[ThemeError] {
        match self {
            ThemeError::NotFound {
                causes,
                ..
            } => causes,
            _ => &[],
        }
    }

    /// Renders the error and its whole cause tree, one cause per line.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        write_report(&mut out, self, 0);
        out
    }
}

fn write_report(out: &mut String, err: &ThemeError, depth: usize) {
    if depth > 0 {
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push_str(&err.to_string());

    match err {
        ThemeError::NotFound {
            causes,
            ..
        } => {
            for cause in causes {
                write_report(out, cause, depth + 1);
            }
        }
        _ => {
            let mut source = std::error::Error::source(err);
            let mut level = depth + 1;
            while let Some(inner) = source {
                out.push('\n');
                out.push_str(&"  ".repeat(level));
                out.push_str(&inner.to_string());
                source = inner.source();
                level += 1;
            }
        }
    }
}

/// Error wrapper with a user-facing message, details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// Primary message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// An [`ErrorContext`] is passed through as is. Theme errors get a full cause
/// report plus a suggestion tailored to their kind; anything else is reported
/// with its `anyhow` chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<ErrorContext>() {
        Ok(ctx) => return ctx,
        Err(error) => error,
    };

    if let Some(theme_error) = error.downcast_ref::<ThemeError>() {
        return theme_error_context(theme_error);
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(format!("invalid theme configuration: {toml_error}"))
            .with_suggestion("Check the TOML syntax of the themes file. Verify quotes, brackets, and [[theme]] tables");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

/// User-facing context for a theme error: its message, the cause report when
/// there is more than one line of it, and a suggestion for its kind.
#[must_use]
pub fn theme_error_context(error: &ThemeError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());
    let report = error.report();
    let ctx = if report.contains('\n') {
        ctx.with_details(report)
    } else {
        ctx
    };

    match error {
        ThemeError::NotFound {
            ..
        } => ctx.with_suggestion(
            "Check the template name and the theme directory; parent themes are searched after the requested one",
        ),
        ThemeError::Store {
            ..
        } => ctx.with_suggestion("Check that the template root exists and is readable"),
        ThemeError::Parse {
            ..
        } => ctx.with_suggestion(
            "Check template syntax: variables use {{ var }}, control flow uses {% %}, sub-templates use {% define \"name\" %}...{% enddefine %}",
        ),
        ThemeError::Execute {
            ..
        } => ctx.with_suggestion(
            "Ensure every variable referenced by the template exists in the data file",
        ),
        ThemeError::LayoutCycle {
            ..
        } => ctx.with_suggestion(
            "Make the top layout declare itself (or nothing) in its leading <!-- --> comment",
        ),
        ThemeError::RootMissing {
            ..
        } => ctx,
        ThemeError::ParentCycle {
            ..
        } => ctx.with_suggestion("Remove the parent link that closes the loop in the themes file"),
    }
}
