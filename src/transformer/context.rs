//! Transform context: the state shared by every rewriting step of one
//! transform call.

use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::base::Span;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::processor::Meta;
use crate::resolver::Resolver;

/// Mutable state of one transform call.
pub(super) struct TransformContext<'a> {
    pub resolver: &'a Resolver,
    pub diagnostics: Diagnostics,
    /// Selectors emitted through `:global()` and `-st-global`.
    pub globals: IndexSet<String>,
    /// Suppresses cycle reports while exports re-evaluate `:vars`.
    pub quiet_cycles: bool,
}

impl<'a> TransformContext<'a> {
    pub fn new(resolver: &'a Resolver) -> Self {
        Self {
            resolver,
            diagnostics: Diagnostics::new(),
            globals: IndexSet::new(),
            quiet_cycles: false,
        }
    }

    pub fn warn(&mut self, scope: &Scope, span: Option<Span>, message: String) {
        self.diagnostics.warning(&scope.meta.source, span, message);
    }

    /// Warning about one word of the node, such as an unknown name.
    pub fn warn_word(&mut self, scope: &Scope, span: Option<Span>, message: String, word: &str) {
        self.diagnostics
            .add(Diagnostic::warning(&scope.meta.source, span, message).with_word(word));
    }

    pub fn error(&mut self, scope: &Scope, span: Option<Span>, message: String) {
        self.diagnostics.error(&scope.meta.source, span, message);
    }
}

/// Stylesheet a piece of content is transformed in.
///
/// Content mixed in from another stylesheet is transformed in that
/// stylesheet's scope, with the mixin arguments as variable overrides.
#[derive(Clone)]
pub(super) struct Scope {
    pub meta: Rc<Meta>,
    /// `:vars` overrides, already evaluated in the consuming scope.
    pub overrides: Option<Rc<IndexMap<SmolStr, String>>>,
    /// Keep only declarations that use an override.
    pub partial: bool,
    /// `{name} from {source}` of every mixin being expanded.
    pub mixin_path: Vec<String>,
    /// Class `&` stands for inside mixed-in content.
    pub nesting: Option<SmolStr>,
}

impl Scope {
    pub fn new(meta: Rc<Meta>) -> Self {
        Self {
            meta,
            overrides: None,
            partial: false,
            mixin_path: Vec::new(),
            nesting: None,
        }
    }
}
