//! Compiled template units backed by Tera.
//!
//! A [`CompiledUnit`] turns a resolved [`DependencySet`] into one executable
//! Tera instance:
//!
//! 1. Starting at the requested root, declared paths are chased until a record
//!    declares itself (or nothing). That record's body becomes the entry
//!    template, registered under the *root's* name.
//! 2. Every other record becomes a sub-template. A record without define
//!    blocks is registered whole under its own name; a record with
//!    `{% define "x" %}...{% enddefine %}` blocks registers each block as `x`.
//!    On a name clash, define blocks beat whole files, and blocks from the
//!    root's own layout chain beat everything, the root's own blocks last.
//! 3. The theme's function registry is bound to the Tera instance.
//! 4. Output is HTML-escaped whatever the template is called; use `| safe`
//!    for trusted markup.
//!
//! Units are immutable once built and are shared between threads by the theme
//! cache.

use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use tera::{Context as TeraContext, Tera};

use super::dependencies::DependencySet;
use super::functions::{FuncMap, SharedFunction};
use super::markers::{define_blocks, strip_define_blocks};
use crate::core::ThemeError;

/// An executable, function-bound, fully assembled template.
pub struct CompiledUnit {
    name: String,
    tera: Tera,
}

impl std::fmt::Debug for CompiledUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledUnit")
            .field("name", &self.name)
            .field("templates", &self.template_names())
            .finish()
    }
}

impl CompiledUnit {
    /// Assemble `deps` into a unit whose entry template is `root`.
    ///
    /// # Errors
    ///
    /// - [`ThemeError::RootMissing`] if `root` (or a declared path) is not in `deps`
    /// - [`ThemeError::LayoutCycle`] if declared paths loop
    /// - [`ThemeError::Parse`] naming the first fragment that fails to parse, or
    ///   naming `root` when the fragments cannot be linked together (an
    ///   `extends` or macro `import` of an unresolved template)
    pub fn assemble(deps: &DependencySet, root: &str, funcs: &FuncMap) -> Result<Self, ThemeError> {
        let chain = layout_chain(deps, root)?;
        let top_name = chain.last().cloned().unwrap_or_else(|| root.to_string());
        let Some(top) = deps.get(&top_name) else {
            return Err(ThemeError::RootMissing {
                name: top_name,
            });
        };

        let mut fragments: Vec<(String, String)> = Vec::with_capacity(deps.len());
        let entry = strip_define_blocks(top.content());
        validate(&top_name, &entry)?;
        fragments.push((root.to_string(), entry.into_owned()));

        // Later registrations win on a name clash: whole files first, then
        // define blocks, then the layout chain from its top down to the root.
        let mut block_records = Vec::new();
        for (name, record) in deps {
            if chain.contains(name) {
                continue;
            }
            if define_blocks(record.content()).is_empty() {
                push_fragment(&mut fragments, root, name, record.content())?;
            } else {
                block_records.push(record);
            }
        }
        for record in block_records {
            for block in define_blocks(record.content()) {
                push_fragment(&mut fragments, root, block.name, block.body)?;
            }
        }

        for name in chain.iter().rev() {
            let Some(record) = deps.get(name) else {
                continue;
            };
            let blocks = define_blocks(record.content());
            if blocks.is_empty() && *name != top_name {
                push_fragment(&mut fragments, root, name, record.content())?;
            }
            for block in blocks {
                push_fragment(&mut fragments, root, block.name, block.body)?;
            }
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![""]);
        for (fname, f) in funcs {
            tera.register_function(fname, SharedFunction(f.clone()));
        }

        tracing::debug!(
            "Assembling '{}' on layout '{}' with {} fragment(s) and {} function(s)",
            root,
            top_name,
            fragments.len(),
            funcs.len()
        );

        tera.add_raw_templates(fragments).map_err(|source| ThemeError::Parse {
            template: root.to_string(),
            source,
        })?;

        Ok(Self {
            name: root.to_string(),
            tera,
        })
    }

    /// Entry template name (the requested root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of every template registered in the unit, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Execute the entry template against `data`, streaming into `out`.
    ///
    /// `data` must serialize to an object or to `null` (empty context). Output
    /// already written before a failure is not rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Execute`] for data conversion and runtime failures.
    pub fn execute<T, W>(&self, data: &T, out: W) -> Result<(), ThemeError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let context = build_context(data).map_err(|source| self.execute_error(source))?;

        self.tera.render_to(&self.name, &context, out).map_err(|source| self.execute_error(source))
    }

    fn execute_error(&self, source: tera::Error) -> ThemeError {
        ThemeError::Execute {
            template: self.name.clone(),
            source,
        }
    }
}

/// Chase declared paths from `root`, returning every record on the way. The
/// last entry tops the chain.
fn layout_chain(deps: &DependencySet, root: &str) -> Result<Vec<String>, ThemeError> {
    let mut current = root;
    let mut seen = HashSet::new();
    let mut chain = Vec::new();

    loop {
        let Some(record) = deps.get(current) else {
            return Err(ThemeError::RootMissing {
                name: current.to_string(),
            });
        };
        chain.push(current.to_string());
        if record.is_root() {
            return Ok(chain);
        }
        if !seen.insert(current) {
            return Err(ThemeError::LayoutCycle {
                template: root.to_string(),
                chain,
            });
        }
        current = record.path();
    }
}

fn validate(name: &str, body: &str) -> Result<(), ThemeError> {
    tera::Template::new(name, None, body).map(|_| ()).map_err(|source| ThemeError::Parse {
        template: name.to_string(),
        source,
    })
}

fn push_fragment(
    fragments: &mut Vec<(String, String)>,
    root: &str,
    name: &str,
    body: &str,
) -> Result<(), ThemeError> {
    if name == root {
        tracing::debug!("Skipping fragment '{}': the entry template owns that name", name);
        return Ok(());
    }

    validate(name, body)?;
    tracing::trace!("Registering sub-template '{}' ({} bytes)", name, body.len());
    fragments.push((name.to_string(), body.to_string()));
    Ok(())
}

fn build_context<T>(data: &T) -> tera::Result<TeraContext>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(data)
        .map_err(|e| tera::Error::msg(format!("failed to serialize template data: {e}")))?;

    if value.is_null() {
        return Ok(TeraContext::new());
    }
    TeraContext::from_value(value)
}
