//! Shared fixtures for the integration suite.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use themekit::core::OperationContext;
use themekit::store::MemoryStore;
use themekit::theme::Theme;

/// Temporary template root with one subdirectory per theme.
pub struct ThemeDir {
    temp: TempDir,
}

impl ThemeDir {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `content` to `<root>/<theme>/<name>`, creating directories.
    pub fn template(&self, theme: &str, name: &str, content: &str) -> &Self {
        self.file(&format!("{theme}/{name}"), content);
        self
    }

    /// Write an arbitrary file relative to the root.
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// `themekit` command running inside the root, with a clean environment.
    pub fn themekit(&self) -> Command {
        let mut cmd = Command::cargo_bin("themekit").unwrap();
        cmd.current_dir(self.temp.path())
            .env_remove("RUST_LOG")
            .env_remove("THEMEKIT_CONFIG")
            .env_remove("THEMEKIT_DEBUG")
            .env_remove("THEMEKIT_ROOT")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// Memory store pre-filled with `(theme, name, content)` entries.
pub fn memory_store(entries: &[(&str, &str, &str)]) -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    for (theme, name, content) in entries {
        store.add(*theme, *name, *content);
    }
    Arc::new(store)
}

/// Render `name` through `theme`, returning the output as a string.
pub fn render(theme: &Theme, name: &str, data: serde_json::Value) -> Result<String, themekit::core::ThemeError> {
    let mut out = Vec::new();
    theme.write(&OperationContext::new(), &mut out, name, &data)?;
    Ok(String::from_utf8(out).unwrap())
}
