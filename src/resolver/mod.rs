//! Resolver — cross-file symbol resolution.
//!
//! Follows import bindings, re-export aliases and `-st-extends` chains
//! between [`Meta`]s loaded through the [`FileProcessor`]. Every walk keeps a
//! visited set of `(source, name)` pairs, so import and extends cycles end
//! with a diagnostic instead of recursing forever.
//!
//! # Resolution results
//!
//! - [`CssResolve`] – a symbol together with the stylesheet defining it
//! - [`JsResolve`] – an export of a JS module (mixins and formatters)
//!
//! Resolution chains are computed per query and never cached: the file
//! processor caches metas, the chains built from them are cheap.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{trace, warn};

use crate::base::constants::CSS_EXT;
use crate::diagnostics::{Diagnostics, messages};
use crate::js::{JsExport, JsModuleLoader};
use crate::processor::{ImportKind, ImportSymbol, Meta, Symbol};
use crate::project::FileProcessor;

// ============================================================================
// RESULTS
// ============================================================================

/// A symbol and the stylesheet that defines it.
#[derive(Debug, Clone)]
pub struct CssResolve {
    pub meta: Rc<Meta>,
    pub symbol: Symbol,
}

impl CssResolve {
    pub fn new(meta: Rc<Meta>, symbol: Symbol) -> Self {
        Self { meta, symbol }
    }

    pub fn name(&self) -> &SmolStr {
        self.symbol.name()
    }

    /// Scoped class name of the symbol in its own stylesheet.
    pub fn scoped_name(&self) -> String {
        self.meta.scoped(self.symbol.name())
    }

    /// Whether the symbol only re-exports an imported name.
    pub fn is_alias(&self) -> bool {
        match &self.symbol {
            Symbol::Class(class) => class.alias.is_some() && class.extends.is_none(),
            Symbol::Element(element) => element.alias.is_some(),
            Symbol::Import(_) => true,
            _ => false,
        }
    }

    fn key(&self) -> (PathBuf, SmolStr) {
        (self.meta.source.clone(), self.symbol.name().clone())
    }

    fn describe(&self) -> String {
        format!("{} from {}", self.symbol.name(), self.meta.source.display())
    }
}

/// An export of a JS module.
#[derive(Debug, Clone)]
pub struct JsResolve {
    pub path: PathBuf,
    /// Export name; `default` for the default export.
    pub name: SmolStr,
    pub export: JsExport,
}

#[derive(Debug, Clone)]
pub enum Resolved {
    Css(CssResolve),
    Js(JsResolve),
}

impl Resolved {
    pub fn as_css(&self) -> Option<&CssResolve> {
        match self {
            Resolved::Css(css) => Some(css),
            Resolved::Js(_) => None,
        }
    }

    pub fn as_js(&self) -> Option<&JsResolve> {
        match self {
            Resolved::Js(js) => Some(js),
            Resolved::Css(_) => None,
        }
    }
}

/// Why an import could not be followed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{}", messages::unknown_imported_file(.0))]
    UnknownFile(String),

    #[error("{}", messages::unknown_imported_symbol(.name, .request))]
    UnknownSymbol { name: String, request: String },

    #[error("{}", messages::circular_alias(.0))]
    CircularAlias(Vec<String>),
}

/// Whether an import target is a stylesheet rather than a JS module.
pub fn is_stylesheet(path: &Path) -> bool {
    path.to_string_lossy().ends_with(CSS_EXT)
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves symbols across stylesheets and JS modules.
#[derive(Clone)]
pub struct Resolver {
    file_processor: Rc<FileProcessor>,
    js_loader: Rc<dyn JsModuleLoader>,
}

impl Resolver {
    pub fn new(file_processor: Rc<FileProcessor>, js_loader: Rc<dyn JsModuleLoader>) -> Self {
        Self {
            file_processor,
            js_loader,
        }
    }

    pub fn file_processor(&self) -> &Rc<FileProcessor> {
        &self.file_processor
    }

    /// Absolute path targeted by an import symbol of `meta`.
    pub fn import_path(&self, meta: &Meta, import: &ImportSymbol) -> Option<PathBuf> {
        match meta.imports.get(import.import) {
            Some(statement) if statement.is_package_request() => {
                self.file_processor.resolve_import(meta, statement)
            }
            Some(statement) => Some(statement.from.clone()),
            None => Some(import.from.clone()),
        }
    }

    /// Follow one import binding to the symbol or export it names.
    pub fn resolve_import(&self, meta: &Meta, import: &ImportSymbol) -> Result<Resolved, ResolveError> {
        let unknown_file = || ResolveError::UnknownFile(import.request.clone());
        let unknown_symbol = || ResolveError::UnknownSymbol {
            name: import.import_name.to_string(),
            request: import.request.clone(),
        };

        let path = self.import_path(meta, import).ok_or_else(unknown_file)?;
        trace!(name = %import.name, path = %path.display(), "resolve import");

        if !is_stylesheet(&path) {
            let module = self.js_loader.load(&path).ok_or_else(unknown_file)?;
            let export = module.get(&import.import_name).cloned().ok_or_else(unknown_symbol)?;
            return Ok(Resolved::Js(JsResolve {
                path,
                name: import.import_name.clone(),
                export,
            }));
        }

        let target = self.file_processor.process(&path).map_err(|_| unknown_file())?;
        let symbol = match import.kind {
            ImportKind::Default => target.root_class().cloned().map(Symbol::Class),
            ImportKind::Named => target.symbol(&import.import_name).cloned(),
        }
        .ok_or_else(unknown_symbol)?;
        Ok(Resolved::Css(CssResolve::new(target, symbol)))
    }

    /// One hop: imports and re-export aliases are followed once, any other
    /// symbol resolves to itself.
    pub fn resolve(&self, meta: &Rc<Meta>, symbol: &Symbol) -> Result<Resolved, ResolveError> {
        let import = match symbol {
            Symbol::Import(import) => Some(import),
            other => other.alias(),
        };
        match import {
            Some(import) => self.resolve_import(meta, import),
            None => Ok(Resolved::Css(CssResolve::new(meta.clone(), symbol.clone()))),
        }
    }

    /// Follow imports and aliases until a symbol that is defined in place.
    pub fn deep_resolve(&self, meta: &Rc<Meta>, symbol: &Symbol) -> Result<Resolved, ResolveError> {
        let mut visited = FxHashSet::default();
        let mut path = Vec::new();
        let mut current = CssResolve::new(meta.clone(), symbol.clone());
        loop {
            path.push(current.describe());
            if !visited.insert(current.key()) {
                warn!(chain = ?path, "circular import alias");
                return Err(ResolveError::CircularAlias(path));
            }
            let import = match &current.symbol {
                Symbol::Import(import) => import.clone(),
                other => match other.alias() {
                    Some(import) => import.clone(),
                    None => return Ok(Resolved::Css(current)),
                },
            };
            match self.resolve_import(&current.meta, &import)? {
                Resolved::Css(next) => {
                    trace!(from = %current.describe(), to = %next.describe(), "alias hop");
                    current = next;
                }
                js => return Ok(js),
            }
        }
    }

    /// [`deep_resolve`](Self::deep_resolve) a local name of `meta`.
    pub fn deep_resolve_name(
        &self,
        meta: &Rc<Meta>,
        name: &str,
    ) -> Option<Result<Resolved, ResolveError>> {
        meta.symbol(name).map(|symbol| self.deep_resolve(meta, symbol))
    }

    /// The inheritance chain of a class (or custom element), ordered from the
    /// symbol itself to its deepest ancestor.
    ///
    /// Aliases are followed and extends targets are pushed as classes; a
    /// resolution failure ends the chain with a diagnostic.
    pub fn resolve_extends(
        &self,
        meta: &Rc<Meta>,
        name: &str,
        is_element: bool,
        diagnostics: &mut Diagnostics,
    ) -> Vec<CssResolve> {
        let start = if is_element {
            meta.element(name).cloned().map(Symbol::Element)
        } else {
            meta.class(name).cloned().map(Symbol::Class)
        };
        let Some(start) = start else {
            return Vec::new();
        };
        let span = start.span();

        let mut chain = Vec::new();
        let mut visited = FxHashSet::default();
        let mut path = Vec::new();
        let mut current = CssResolve::new(meta.clone(), start);
        let mut first = true;

        loop {
            path.push(current.describe());
            if !visited.insert(current.key()) {
                warn!(chain = ?path, "circular extends");
                diagnostics.error(&meta.source, span, messages::circular_extends(&path));
                break;
            }
            let is_class = matches!(current.symbol, Symbol::Class(_));
            if is_class || (first && is_element) {
                chain.push(current.clone());
            }
            first = false;

            let (local_parent, import_parent) = match &current.symbol {
                Symbol::Class(class) => match &class.extends {
                    Some(parent) => (Some(parent.clone()), None),
                    None => (None, class.alias.clone()),
                },
                Symbol::Element(element) => (None, element.alias.clone()),
                Symbol::Import(import) => (None, Some(import.clone())),
                _ => (None, None),
            };

            if let Some(parent) = local_parent {
                let Some(symbol) = current.meta.symbol(&parent).cloned() else {
                    break;
                };
                trace!(from = %current.describe(), to = %parent, "extends hop");
                current = CssResolve::new(current.meta.clone(), symbol);
                continue;
            }
            let Some(import) = import_parent else {
                break;
            };
            match self.resolve_import(&current.meta, &import) {
                Ok(Resolved::Css(next))
                    if matches!(next.symbol, Symbol::Class(_) | Symbol::Element(_) | Symbol::Import(_)) =>
                {
                    trace!(from = %current.describe(), to = %next.describe(), "import hop");
                    current = next;
                }
                Ok(Resolved::Css(_)) => break,
                Ok(Resolved::Js(_)) => {
                    diagnostics.error(&meta.source, span, messages::cannot_extend_js());
                    break;
                }
                Err(err) => {
                    diagnostics.warning(&meta.source, span, err.to_string());
                    break;
                }
            }
        }
        chain
    }
}
