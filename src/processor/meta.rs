//! Per-stylesheet symbol table.
//!
//! A [`Meta`] is what the processor extracts from one stylesheet: its
//! namespace, import statements and every locally visible symbol. It holds no
//! cross-file knowledge; the resolver follows imports between metas.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::Span;
use crate::base::constants::ROOT_CLASS;
use crate::css::Root;
use crate::diagnostics::Diagnostics;

use super::states::StateDef;

// ============================================================================
// IMPORTS
// ============================================================================

/// One `:import` rule or `@st-import` at-rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The specifier as written, without quotes.
    pub request: String,
    /// Absolute path of relative and absolute requests. Package requests keep
    /// the bare request here and are resolved against `node_modules` later.
    pub from: PathBuf,
    /// Local name bound to the default export.
    pub default_export: Option<SmolStr>,
    /// Local name → exported name.
    pub named: IndexMap<SmolStr, SmolStr>,
    /// Plain declarations of the import block, overriding the imported `:vars`.
    pub overrides: IndexMap<SmolStr, String>,
    pub theme: bool,
    pub span: Option<Span>,
}

impl Import {
    pub fn new(request: impl Into<String>, from: PathBuf) -> Self {
        Self {
            request: request.into(),
            from,
            default_export: None,
            named: IndexMap::new(),
            overrides: IndexMap::new(),
            theme: false,
            span: None,
        }
    }

    /// Whether the request points into a package rather than a path.
    pub fn is_package_request(&self) -> bool {
        !(self.request.starts_with('.') || Path::new(&self.request).is_absolute())
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Default,
    Named,
}

/// A name bound by an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSymbol {
    /// Local name.
    pub name: SmolStr,
    /// Name exported by the target; `default` for default imports.
    pub import_name: SmolStr,
    pub kind: ImportKind,
    /// Index of the owning statement in [`Meta::imports`].
    pub import: usize,
    pub request: String,
    pub from: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    pub name: SmolStr,
    /// Local name (class or import) this class extends.
    pub extends: Option<SmolStr>,
    pub states: Option<IndexMap<SmolStr, StateDef>>,
    /// Set when the class re-exports an imported name.
    pub alias: Option<ImportSymbol>,
    /// Literal selector emitted instead of the scoped class.
    pub global: Option<String>,
    pub root: bool,
    pub span: Option<Span>,
}

impl ClassSymbol {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            states: None,
            alias: None,
            global: None,
            root: false,
            span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSymbol {
    pub name: SmolStr,
    pub alias: Option<ImportSymbol>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSymbol {
    pub name: SmolStr,
    /// Raw, unevaluated value text.
    pub text: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVarSymbol {
    /// Name including the leading `--`.
    pub name: SmolStr,
    pub global: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframesSymbol {
    pub name: SmolStr,
    pub global: bool,
    pub span: Option<Span>,
}

/// Any symbol a local name can be bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Class(ClassSymbol),
    Element(ElementSymbol),
    Var(VarSymbol),
    CssVar(CssVarSymbol),
    Import(ImportSymbol),
}

impl Symbol {
    pub fn name(&self) -> &SmolStr {
        match self {
            Symbol::Class(s) => &s.name,
            Symbol::Element(s) => &s.name,
            Symbol::Var(s) => &s.name,
            Symbol::CssVar(s) => &s.name,
            Symbol::Import(s) => &s.name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Class(_) => "class",
            Symbol::Element(_) => "element",
            Symbol::Var(_) => "var",
            Symbol::CssVar(_) => "cssVar",
            Symbol::Import(_) => "import",
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Symbol::Class(s) => s.span,
            Symbol::Element(s) => s.span,
            Symbol::Var(s) => s.span,
            Symbol::CssVar(s) => s.span,
            Symbol::Import(_) => None,
        }
    }

    /// Import a class or element re-exports, if any.
    pub fn alias(&self) -> Option<&ImportSymbol> {
        match self {
            Symbol::Class(s) => s.alias.as_ref(),
            Symbol::Element(s) => s.alias.as_ref(),
            _ => None,
        }
    }
}

// ============================================================================
// META
// ============================================================================

/// Everything the processor knows about one stylesheet.
#[derive(Debug, Clone)]
pub struct Meta {
    /// Absolute path; identity of the stylesheet.
    pub source: PathBuf,
    pub namespace: String,
    /// Name of the root class.
    pub root: SmolStr,
    /// The parsed source tree, never mutated after processing.
    pub ast: Root,
    pub imports: Vec<Import>,
    /// Every local name, in declaration order.
    pub mapped_symbols: IndexMap<SmolStr, Symbol>,
    pub keyframes: IndexMap<SmolStr, KeyframesSymbol>,
    /// `@custom-selector :--name` definitions keyed by `name`.
    pub custom_selectors: IndexMap<SmolStr, String>,
    pub diagnostics: Diagnostics,
}

impl Meta {
    pub fn new(source: PathBuf, namespace: String, ast: Root) -> Self {
        Self {
            source,
            namespace,
            root: SmolStr::new_static(ROOT_CLASS),
            ast,
            imports: Vec::new(),
            mapped_symbols: IndexMap::new(),
            keyframes: IndexMap::new(),
            custom_selectors: IndexMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.mapped_symbols.get(name)
    }

    pub fn class(&self, name: &str) -> Option<&ClassSymbol> {
        match self.mapped_symbols.get(name) {
            Some(Symbol::Class(class)) => Some(class),
            _ => None,
        }
    }

    pub fn element(&self, name: &str) -> Option<&ElementSymbol> {
        match self.mapped_symbols.get(name) {
            Some(Symbol::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn var(&self, name: &str) -> Option<&VarSymbol> {
        match self.mapped_symbols.get(name) {
            Some(Symbol::Var(var)) => Some(var),
            _ => None,
        }
    }

    pub fn css_var(&self, name: &str) -> Option<&CssVarSymbol> {
        match self.mapped_symbols.get(name) {
            Some(Symbol::CssVar(var)) => Some(var),
            _ => None,
        }
    }

    pub fn import_symbol(&self, name: &str) -> Option<&ImportSymbol> {
        match self.mapped_symbols.get(name) {
            Some(Symbol::Import(import)) => Some(import),
            _ => None,
        }
    }

    pub fn root_class(&self) -> Option<&ClassSymbol> {
        self.class(&self.root)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.mapped_symbols.values().filter_map(|s| match s {
            Symbol::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn elements(&self) -> impl Iterator<Item = &ElementSymbol> {
        self.mapped_symbols.values().filter_map(|s| match s {
            Symbol::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn vars(&self) -> impl Iterator<Item = &VarSymbol> {
        self.mapped_symbols.values().filter_map(|s| match s {
            Symbol::Var(var) => Some(var),
            _ => None,
        })
    }

    pub fn css_vars(&self) -> impl Iterator<Item = &CssVarSymbol> {
        self.mapped_symbols.values().filter_map(|s| match s {
            Symbol::CssVar(var) => Some(var),
            _ => None,
        })
    }

    pub fn import_symbols(&self) -> impl Iterator<Item = &ImportSymbol> {
        self.mapped_symbols.values().filter_map(|s| match s {
            Symbol::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Scoped form of a local name: `{namespace}--{name}`.
    pub fn scoped(&self, name: &str) -> String {
        format!("{}--{}", self.namespace, name)
    }

    /// Scoped form of a custom property: `--{namespace}-{name}`.
    pub fn scoped_css_var(&self, name: &str) -> String {
        format!("--{}-{}", self.namespace, name.trim_start_matches("--"))
    }
}
