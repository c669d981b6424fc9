//! Integration test suite for themekit
//!
//! End-to-end tests through the public API and the `themekit` binary. They run
//! quickly and are executed on every commit.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **theme_write**: Rendering, caching and debug mode through `Theme::write`
//! - **fallback**: Parent-theme lookup and configuration cascade
//! - **fs_store**: Themes backed by a directory tree and store chains
//! - **configuration**: TOML configuration and theme sets
//! - **cli_commands**: The `render`, `deps` and `list` commands

mod helpers;

mod cli_commands;
mod fs_store;
mod theme_write;
