//! Directory-backed template store.
//!
//! Templates live at `<root>/<theme>/<name>`, where `name` may contain `/`
//! separated subdirectories. Files are read on every lookup; caching is the
//! theme's job.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::Store;
use crate::core::{OperationContext, ThemeError};
use crate::templating::TemplateRecord;

/// Reads templates from a directory tree with one subdirectory per theme.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is not checked here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn template_path(&self, theme: &str, name: &str) -> Result<PathBuf, ThemeError> {
        check_segment(theme, name, theme, "theme")?;
        check_segment(theme, name, name, "template name")?;
        Ok(self.root.join(theme).join(name))
    }
}

/// Reject empty, absolute or escaping path segments.
fn check_segment(theme: &str, name: &str, value: &str, what: &str) -> Result<(), ThemeError> {
    if value.is_empty() {
        return Err(ThemeError::store(theme, name, format!("{what} must not be empty")));
    }

    let escapes = Path::new(value).components().any(|c| {
        matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if escapes {
        return Err(ThemeError::store(
            theme,
            name,
            format!("{what} '{value}' must be relative and stay inside the store"),
        ));
    }
    Ok(())
}

impl Store for FsStore {
    fn find(
        &self,
        _ctx: &OperationContext,
        theme: &str,
        name: &str,
    ) -> Result<Arc<TemplateRecord>, ThemeError> {
        let path = self.template_path(theme, name)?;

        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                tracing::trace!("Read template {}/{} from {}", theme, name, path.display());
                Ok(Arc::new(TemplateRecord::new(theme, name, raw)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ThemeError::not_found(theme, name)),
            Err(e) => Err(ThemeError::store(
                theme,
                name,
                io::Error::new(e.kind(), format!("failed to read {}: {e}", path.display())),
            )),
        }
    }

    fn list(&self, _ctx: &OperationContext, theme: &str) -> Result<Vec<String>, ThemeError> {
        check_segment(theme, "", theme, "theme")?;
        let dir = self.root.join(theme);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true) {
            let entry = entry.map_err(|e| ThemeError::store(theme, "", e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            let name: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            names.push(name.join("/"));
        }

        names.sort();
        Ok(names)
    }
}
