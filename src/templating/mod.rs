//! Tera-based template assembly for themes.
//!
//! This module turns raw template text into executable units. It knows nothing
//! about themes or stores; it only needs a [`TemplateFinder`] to look names up.
//!
//! # Overview
//!
//! 1. [`TemplateRecord::new`] extracts the optional declaration marker of a
//!    loaded template (`<!-- layouts/base -->`).
//! 2. [`resolve`] walks declaration and reference markers from a root name and
//!    returns the [`DependencySet`] the root needs.
//! 3. [`CompiledUnit::assemble`] builds one Tera instance from that set, with
//!    the layout body registered under the root's name and every other record
//!    (or each of its `{% define %}` blocks) registered as a sub-template.
//! 4. [`CompiledUnit::execute`] streams the result for any `Serialize` data.
//!
//! # Template Dialect
//!
//! Everything is plain Tera, plus two conventions:
//!
//! - A single-line comment at the very start of a template names the template
//!   it layers onto. A template whose marker names itself (or that has no
//!   marker) tops its chain.
//! - `{% define "name" %}...{% enddefine %}` declares a sub-template inside a
//!   file, addressable with `{% include "name" %}` from anywhere in the unit.
//!
//! # Examples
//!
//! ```markdown
//! <!-- layouts/base -->
//! {% define "title" %}About us{% enddefine %}
//! {% define "body" %}<p>{{ company }}</p>{% enddefine %}
//! ```
//!
//! with `layouts/base`:
//!
//! ```markdown
//! <title>{% include "title" %}</title>
//! <main>{% include "body" ignore missing %}</main>
//! ```

pub mod builtins;
pub mod dependencies;
pub mod functions;
pub mod markers;
pub mod record;
pub mod renderer;

pub use builtins::builtin_functions;
pub use dependencies::{DependencySet, TemplateFinder, resolve};
pub use functions::{FuncMap, TemplateFunction, function};
pub use record::TemplateRecord;
pub use renderer::CompiledUnit;
