//! Marker scanning for theme templates.
//!
//! Three pure scanners over raw template text drive dependency discovery and
//! unit assembly:
//!
//! - **Declaration marker**: a single-line HTML comment anchored at the start of
//!   the content naming the template whose body this one layers onto,
//!   e.g. `<!-- layouts/base -->`.
//! - **Reference markers**: Tera constructs naming another template by a quoted
//!   string: `{% include "x" %}`, `{% import "x" as m %}`, `{% extends "x" %}`.
//! - **Define blocks**: `{% define "name" %}...{% enddefine %}` sections that
//!   declare independently addressable sub-templates inside one file.
//!
//! # Examples
//!
//! ```rust
//! use themekit::templating::markers::{parse_declaration, scan_references};
//!
//! let decl = parse_declaration("<!-- layouts/base -->\n<p>hi</p>").unwrap();
//! assert_eq!(decl.path, "layouts/base");
//! assert_eq!(decl.body, "\n<p>hi</p>");
//!
//! let refs = scan_references(r#"{% include "header" %}{% include "footer" ignore missing %}"#);
//! assert_eq!(refs, vec!["header", "footer"]);
//! ```

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Leading single-line declaration comment. `.` never crosses a newline, so a
/// comment spanning lines does not match.
static DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<!--(.*?)-->").expect("declaration pattern is valid"));

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%-?\s*(?:include|import|extends)\s+(?:"([^"]+)"|'([^']+)')"#)
        .expect("reference pattern is valid")
});

static DEFINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\{%-?\s*define\s+(?:"([^"]+)"|'([^']+)')\s*-?%\}(.*?)\{%-?\s*enddefine\s*-?%\}"#,
    )
    .expect("define pattern is valid")
});

/// Result of a matched declaration marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Trimmed marker payload
    pub path: &'a str,
    /// Content following the marker (leading whitespace and marker removed)
    pub body: &'a str,
}

/// A `{% define %}` block found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefineBlock<'a> {
    /// Sub-template name declared by the block
    pub name: &'a str,
    /// Inner body of the block
    pub body: &'a str,
}

/// Match a declaration marker at the very start of `content`.
///
/// Only the leading occurrence is considered; the same comment syntax later in
/// the content is left untouched. Returns `None` when there is no marker or
/// when the marker spans more than one line.
#[must_use]
pub fn parse_declaration(content: &str) -> Option<Declaration<'_>> {
    let caps = DECLARATION_RE.captures(content)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;

    Some(Declaration {
        path: inner.as_str().trim(),
        body: &content[whole.end()..],
    })
}

/// Collect the distinct template names referenced by `content`, in order of
/// first appearance.
#[must_use]
pub fn scan_references(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for caps in REFERENCE_RE.captures_iter(content) {
        let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let name = name.as_str();
        if seen.insert(name) {
            tracing::trace!("Found template reference '{}'", name);
            names.push(name.to_string());
        }
    }

    names
}

/// Extract every `{% define "name" %}...{% enddefine %}` block of `content`.
///
/// Blocks do not nest; the first `enddefine` closes the open block.
#[must_use]
pub fn define_blocks(content: &str) -> Vec<DefineBlock<'_>> {
    DEFINE_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let name = caps.get(1).or_else(|| caps.get(2))?;
            let body = caps.get(3)?;
            Some(DefineBlock {
                name: name.as_str(),
                body: body.as_str(),
            })
        })
        .collect()
}

/// Remove every define block from `content`, leaving the surrounding text.
#[must_use]
pub fn strip_define_blocks(content: &str) -> Cow<'_, str> {
    DEFINE_RE.replace_all(content, "")
}
