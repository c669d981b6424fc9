//! Immutable template records returned by stores.

use super::markers::parse_declaration;

/// A template loaded from a store.
///
/// `path` equals `name` unless the raw content started with a declaration
/// marker, in which case it holds the marker payload and the marker is
/// stripped from `content`. A record whose `path` differs from its `name` is
/// layered onto the template identified by `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    theme: String,
    name: String,
    path: String,
    content: String,
}

impl TemplateRecord {
    /// Build a record, extracting the declaration marker once.
    pub fn new(theme: impl Into<String>, name: impl Into<String>, raw: impl Into<String>) -> Self {
        let name = name.into();
        let raw = raw.into();

        let (path, content) = match parse_declaration(&raw) {
            Some(decl) => (decl.path.to_string(), decl.body.to_string()),
            None => (name.clone(), raw),
        };

        Self {
            theme: theme.into(),
            name,
            path,
            content,
        }
    }

    /// Theme the record was loaded from.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Lookup key within the theme.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parent template, or the record's own name.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Body with any leading declaration marker removed.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this record is the top of its inheritance chain.
    pub fn is_root(&self) -> bool {
        self.path == self.name
    }
}
