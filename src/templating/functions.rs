//! Function registry types shared by themes and compiled units.
//!
//! Template functions are Tera [`Function`]s shared behind an [`Arc`], so a
//! theme's registry can be snapshotted, copied to parent themes and bound to
//! many compiled units without cloning the callables themselves.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use themekit::templating::{FuncMap, function};
//! use tera::Value;
//!
//! let mut funcs = FuncMap::new();
//! funcs.insert(
//!     "answer".to_string(),
//!     function(|_: &HashMap<String, Value>| -> tera::Result<Value> { Ok(Value::from(42)) }),
//! );
//! assert!(funcs.contains_key("answer"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use tera::{Function, Value};

/// A shareable template function.
pub type TemplateFunction = Arc<dyn Function>;

/// Name → function registry, as accepted and returned by themes.
pub type FuncMap = HashMap<String, TemplateFunction>;

/// Wrap any Tera function (including plain closures) for a [`FuncMap`].
pub fn function<F>(f: F) -> TemplateFunction
where
    F: Function + 'static,
{
    Arc::new(f)
}

/// Adapter registering a shared function with a `Tera` instance.
#[derive(Clone)]
pub(crate) struct SharedFunction(pub(crate) TemplateFunction);

impl Function for SharedFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.call(args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}
