//! JavaScript module interface for mixins and formatters.
//!
//! The core never evaluates JavaScript. It sees JS modules only through
//! [`JsModuleLoader`], which hands back [`JsModule`]s whose exports are plain
//! values or callable [`JsFunction`]s. Formatters return strings; mixins
//! return nested objects converted by [`object_to_nodes`].

mod mixin_object;

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde_json::Value;
use smol_str::SmolStr;
use thiserror::Error;

pub use mixin_object::{css_property_name, object_to_nodes};

/// Error thrown by a JS function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JsError {
    pub message: String,
}

impl JsError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A synchronously callable JS export. Arguments are already value-resolved.
pub trait JsFunction {
    fn invoke(&self, args: &[String]) -> Result<Value, JsError>;
}

impl<F> JsFunction for F
where
    F: Fn(&[String]) -> Result<Value, JsError>,
{
    fn invoke(&self, args: &[String]) -> Result<Value, JsError> {
        self(args)
    }
}

#[derive(Clone)]
pub enum JsExport {
    Function(Rc<dyn JsFunction>),
    Value(Value),
}

impl JsExport {
    pub fn function(f: impl Fn(&[String]) -> Result<Value, JsError> + 'static) -> Self {
        JsExport::Function(Rc::new(f))
    }

    pub fn as_function(&self) -> Option<&Rc<dyn JsFunction>> {
        match self {
            JsExport::Function(f) => Some(f),
            JsExport::Value(_) => None,
        }
    }

    /// Plain string or number exports usable as a value.
    pub fn as_text(&self) -> Option<String> {
        match self {
            JsExport::Value(Value::String(text)) => Some(text.clone()),
            JsExport::Value(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        }
    }
}

impl fmt::Debug for JsExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsExport::Function(_) => f.write_str("JsExport::Function"),
            JsExport::Value(value) => f.debug_tuple("JsExport::Value").field(value).finish(),
        }
    }
}

/// Exports of one JS module.
#[derive(Debug, Clone, Default)]
pub struct JsModule {
    pub default: Option<JsExport>,
    pub named: IndexMap<SmolStr, JsExport>,
}

impl JsModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, export: JsExport) -> Self {
        self.default = Some(export);
        self
    }

    pub fn with_named(mut self, name: impl Into<SmolStr>, export: JsExport) -> Self {
        self.named.insert(name.into(), export);
        self
    }

    pub fn with_function(
        self,
        name: impl Into<SmolStr>,
        f: impl Fn(&[String]) -> Result<Value, JsError> + 'static,
    ) -> Self {
        self.with_named(name, JsExport::function(f))
    }

    /// Look up an export; `default` selects the default export.
    pub fn get(&self, name: &str) -> Option<&JsExport> {
        if name == "default" {
            self.default.as_ref()
        } else {
            self.named.get(name)
        }
    }
}

/// Supplies JS modules by absolute path.
pub trait JsModuleLoader {
    fn load(&self, path: &Path) -> Option<Rc<JsModule>>;
}

/// Loader for projects without JS modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJsModules;

impl JsModuleLoader for NoJsModules {
    fn load(&self, _path: &Path) -> Option<Rc<JsModule>> {
        None
    }
}

/// Modules registered up front, keyed by path.
#[derive(Default)]
pub struct JsModuleRegistry {
    modules: RefCell<FxHashMap<PathBuf, Rc<JsModule>>>,
}

impl JsModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, path: impl Into<PathBuf>, module: JsModule) {
        self.modules.borrow_mut().insert(path.into(), Rc::new(module));
    }
}

impl JsModuleLoader for JsModuleRegistry {
    fn load(&self, path: &Path) -> Option<Rc<JsModule>> {
        self.modules.borrow().get(path).cloned()
    }
}
