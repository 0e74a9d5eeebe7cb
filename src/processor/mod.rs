//! Processor — single-file symbol extraction.
//!
//! Turns one parsed stylesheet into a [`Meta`]:
//! - pass 1 collects `:import` / `@st-import` statements so later rules can
//!   alias imported names regardless of source order;
//! - pass 2 walks rules and at-rules, registering classes, elements, vars,
//!   custom properties, keyframes and custom selectors, and reading the
//!   `-st-*` directives of simple class rules.
//!
//! Processing does no I/O and never fails: invalid directives become
//! diagnostics on the meta and the offending construct is ignored.

mod imports;
mod meta;
mod namespace;
mod states;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::rc::Rc;

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::Span;
use crate::base::constants::*;
use crate::css::{self, AtRule, Node, Root, Rule};
use crate::diagnostics::{Diagnostic, messages};
use crate::selector::{Selector, SimpleSelector, parse_selector_list};
use crate::value::{ValueNode, parse_value, strip_quotes};

pub use imports::{normalize, resolve_from};
pub use meta::{
    ClassSymbol, CssVarSymbol, ElementSymbol, Import, ImportKind, ImportSymbol, KeyframesSymbol,
    Meta, Symbol, VarSymbol,
};
pub use namespace::{
    HashedNamespace, IdentityNamespace, NamespaceResolver, default_namespace, is_valid_namespace,
};
pub use states::{StateDef, StateParseIssue, StateType, StateValidator, TypedState, parse_states};

/// Extracts [`Meta`]s from stylesheets.
#[derive(Clone)]
pub struct Processor {
    namespace_resolver: Rc<dyn NamespaceResolver>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(Rc::new(HashedNamespace))
    }
}

impl Processor {
    pub fn new(namespace_resolver: Rc<dyn NamespaceResolver>) -> Self {
        Self { namespace_resolver }
    }

    /// Parse and process stylesheet source. Parse errors become error
    /// diagnostics on the meta.
    pub fn process_source(&self, text: &str, source: &Path) -> Meta {
        let parsed = css::parse(text);
        let mut meta = self.process(parsed.content, source);
        for error in parsed.errors {
            meta.diagnostics
                .add(Diagnostic::error(source, Some(error.span), error.message));
        }
        meta
    }

    /// Process a parsed stylesheet.
    pub fn process(&self, ast: Root, source: &Path) -> Meta {
        debug!(source = %source.display(), "processing stylesheet");
        let mut extractor = Extractor {
            meta: Meta::new(source.to_path_buf(), String::new(), Root::default()),
            declared_namespace: None,
            extends_refs: Vec::new(),
        };
        extractor.collect_imports(&ast);
        extractor.add_root_class();
        extractor.collect_symbols(&ast);
        extractor.check_extends();

        let namespace = extractor
            .declared_namespace
            .take()
            .unwrap_or_else(|| default_namespace(source));
        let mut meta = extractor.meta;
        meta.namespace = self.namespace_resolver.resolve(&namespace, source);
        meta.ast = ast;
        meta
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

struct Extractor {
    meta: Meta,
    declared_namespace: Option<String>,
    /// `-st-extends` targets, validated once every local symbol is known.
    extends_refs: Vec<(SmolStr, Option<Span>)>,
}

impl Extractor {
    fn warn(&mut self, span: Option<Span>, message: String) {
        let source = self.meta.source.clone();
        self.meta.diagnostics.warning(&source, span, message);
    }

    fn error(&mut self, span: Option<Span>, message: String) {
        let source = self.meta.source.clone();
        self.meta.diagnostics.error(&source, span, message);
    }

    // =========================================================================
    // Pass 1: imports
    // =========================================================================

    fn collect_imports(&mut self, ast: &Root) {
        let source = self.meta.source.clone();
        for node in &ast.nodes {
            let import = match node {
                Node::Rule(rule) if rule.selector == IMPORT_RULE => {
                    imports::parse_import_rule(rule, &source, &mut self.meta.diagnostics)
                }
                Node::AtRule(at_rule) if at_rule.name == ST_IMPORT_AT_RULE => {
                    imports::parse_st_import(at_rule, &source, &mut self.meta.diagnostics)
                }
                _ => None,
            };
            if let Some(import) = import {
                self.add_import(import);
            }
        }
    }

    fn add_import(&mut self, import: Import) {
        let index = self.meta.imports.len();
        trace!(request = %import.request, "import");
        if let Some(local) = &import.default_export {
            self.add_symbol(Symbol::Import(ImportSymbol {
                name: local.clone(),
                import_name: SmolStr::new_static("default"),
                kind: ImportKind::Default,
                import: index,
                request: import.request.clone(),
                from: import.from.clone(),
            }), import.span);
        }
        for (local, name) in &import.named {
            self.add_symbol(Symbol::Import(ImportSymbol {
                name: local.clone(),
                import_name: name.clone(),
                kind: ImportKind::Named,
                import: index,
                request: import.request.clone(),
                from: import.from.clone(),
            }), import.span);
        }
        self.meta.imports.push(import);
    }

    // =========================================================================
    // Symbol table
    // =========================================================================

    /// Insert a symbol, warning when the name is already taken.
    fn add_symbol(&mut self, symbol: Symbol, span: Option<Span>) {
        let name = symbol.name().clone();
        if self.meta.mapped_symbols.contains_key(&name) {
            self.warn(span, messages::redeclare_symbol(&name));
        }
        self.meta.mapped_symbols.insert(name, symbol);
    }

    fn add_root_class(&mut self) {
        let mut root = ClassSymbol::new(self.meta.root.clone());
        root.root = true;
        if let Some(Symbol::Import(import)) = self.meta.mapped_symbols.get(&self.meta.root) {
            root.alias = Some(import.clone());
        }
        self.meta.mapped_symbols.insert(root.name.clone(), Symbol::Class(root));
    }

    fn add_class(&mut self, name: &str, span: Option<Span>) {
        match self.meta.mapped_symbols.get_mut(name) {
            Some(Symbol::Class(class)) => {
                if class.span.is_none() {
                    class.span = span;
                }
            }
            Some(Symbol::Import(import)) => {
                let mut class = ClassSymbol::new(name);
                class.alias = Some(import.clone());
                class.span = span;
                self.meta.mapped_symbols.insert(class.name.clone(), Symbol::Class(class));
            }
            _ => {
                let mut class = ClassSymbol::new(name);
                class.span = span;
                self.add_symbol(Symbol::Class(class), span);
            }
        }
    }

    fn add_element(&mut self, name: &str, span: Option<Span>) {
        match self.meta.mapped_symbols.get(name) {
            Some(Symbol::Element(_)) => {}
            Some(Symbol::Import(import)) => {
                let element = ElementSymbol {
                    name: SmolStr::new(name),
                    alias: Some(import.clone()),
                    span,
                };
                self.meta
                    .mapped_symbols
                    .insert(element.name.clone(), Symbol::Element(element));
            }
            _ => {
                let element = ElementSymbol {
                    name: SmolStr::new(name),
                    alias: None,
                    span,
                };
                self.add_symbol(Symbol::Element(element), span);
            }
        }
    }

    fn add_css_var(&mut self, name: &str, global: bool, span: Option<Span>) {
        match self.meta.mapped_symbols.get_mut(name) {
            Some(Symbol::CssVar(var)) => var.global |= global,
            Some(Symbol::Import(_)) => {}
            _ => self.add_symbol(
                Symbol::CssVar(CssVarSymbol {
                    name: SmolStr::new(name),
                    global,
                    span,
                }),
                span,
            ),
        }
    }

    fn class_mut(&mut self, name: &str) -> Option<&mut ClassSymbol> {
        match self.meta.mapped_symbols.get_mut(name) {
            Some(Symbol::Class(class)) => Some(class),
            _ => None,
        }
    }

    // =========================================================================
    // Pass 2: rules and at-rules
    // =========================================================================

    fn collect_symbols(&mut self, ast: &Root) {
        for node in &ast.nodes {
            match node {
                Node::Rule(rule) if rule.selector == IMPORT_RULE => {}
                Node::Rule(rule) if rule.selector == VARS_RULE => self.handle_vars(rule),
                Node::Rule(rule) => self.handle_rule(rule),
                Node::AtRule(at_rule) => self.handle_at_rule(at_rule, true),
                Node::Decl(_) | Node::Comment(_) => {}
            }
        }
    }

    fn collect_nested(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Rule(rule) if rule.selector == IMPORT_RULE || rule.selector == VARS_RULE => {
                    self.error(rule.span, messages::directive_rule_not_top_level(&rule.selector));
                }
                Node::Rule(rule) => self.handle_rule(rule),
                Node::AtRule(at_rule) => self.handle_at_rule(at_rule, false),
                Node::Decl(_) | Node::Comment(_) => {}
            }
        }
    }

    fn handle_at_rule(&mut self, at_rule: &AtRule, top_level: bool) {
        match at_rule.name.as_str() {
            NAMESPACE_AT_RULE | ST_NAMESPACE_AT_RULE if top_level => {
                let namespace = strip_quotes(&at_rule.params).trim();
                if is_valid_namespace(namespace) {
                    self.declared_namespace = Some(namespace.to_string());
                } else {
                    self.error(at_rule.span, messages::invalid_namespace(namespace));
                }
            }
            ST_IMPORT_AT_RULE => {}
            CUSTOM_SELECTOR_AT_RULE => self.handle_custom_selector(at_rule),
            GLOBAL_CUSTOM_PROPERTY_AT_RULE => {
                for name in at_rule.params.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                    if name.starts_with("--") {
                        self.add_css_var(name, true, at_rule.span);
                    } else {
                        self.error(at_rule.span, messages::invalid_custom_property_name(name));
                    }
                }
            }
            KEYFRAMES_AT_RULE => self.handle_keyframes(at_rule),
            ST_SCOPE_AT_RULE => {
                for selector in parse_selector_list(&at_rule.params) {
                    self.register_selector(&selector, at_rule.span);
                }
                if let Some(nodes) = &at_rule.nodes {
                    self.collect_nested(nodes);
                }
            }
            _ => {
                if let Some(nodes) = &at_rule.nodes {
                    self.collect_nested(nodes);
                }
            }
        }
    }

    fn handle_custom_selector(&mut self, at_rule: &AtRule) {
        let params = at_rule.params.trim();
        let (name, selector) = params.split_once(char::is_whitespace).unwrap_or((params, ""));
        let Some(name) = name.strip_prefix(":--") else {
            return;
        };
        let selector = selector.trim().to_string();
        for parsed in parse_selector_list(&selector) {
            self.register_selector(&parsed, at_rule.span);
        }
        self.meta.custom_selectors.insert(SmolStr::new(name), selector);
    }

    fn handle_keyframes(&mut self, at_rule: &AtRule) {
        let params = at_rule.params.trim();
        let (name, global) = match params
            .strip_prefix(":global(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => (inner.trim(), true),
            None => (params, false),
        };
        if name.is_empty() {
            return;
        }
        self.meta
            .keyframes
            .entry(SmolStr::new(name))
            .or_insert(KeyframesSymbol {
                name: SmolStr::new(name),
                global,
                span: at_rule.span,
            });
    }

    fn handle_vars(&mut self, rule: &Rule) {
        for decl in rule.decls() {
            self.add_symbol(
                Symbol::Var(VarSymbol {
                    name: SmolStr::new(&decl.prop),
                    text: decl.value.clone(),
                    span: decl.span,
                }),
                decl.span,
            );
        }
    }

    fn handle_rule(&mut self, rule: &Rule) {
        let list = parse_selector_list(&rule.selector);
        for selector in &list {
            self.register_selector(selector, rule.span);
        }
        let single = match list.as_slice() {
            [selector] => selector.as_single().cloned(),
            _ => None,
        };

        for decl in rule.decls() {
            if decl.prop.starts_with("--") {
                self.add_css_var(&decl.prop, false, decl.span);
            }
            self.register_var_usages(&parse_value(&decl.value), decl.span);

            match decl.prop.as_str() {
                STATES => match &single {
                    Some(SimpleSelector::Class(name)) => self.set_states(name, &decl.value, decl.span),
                    Some(SimpleSelector::Type(_)) => {
                        self.error(decl.span, messages::state_definition_in_element());
                    }
                    _ => self.error(decl.span, messages::state_definition_in_complex()),
                },
                EXTENDS => match &single {
                    Some(SimpleSelector::Class(name)) => {
                        let value = decl.value.trim();
                        if strip_quotes(value).len() != value.len() {
                            self.error(decl.span, messages::value_cannot_be_string());
                        } else if let Some(class) = self.class_mut(name) {
                            class.extends = Some(SmolStr::new(value));
                            self.extends_refs.push((SmolStr::new(value), decl.span));
                        }
                    }
                    _ => self.error(decl.span, messages::directive_in_complex_selector(EXTENDS)),
                },
                GLOBAL => match &single {
                    Some(SimpleSelector::Class(name)) => {
                        let global = strip_quotes(&decl.value).trim().to_string();
                        if let Some(class) = self.class_mut(name) {
                            class.global = Some(global);
                        }
                    }
                    _ => self.error(decl.span, messages::directive_in_complex_selector(GLOBAL)),
                },
                ROOT => {
                    if let Some(SimpleSelector::Class(name)) = &single {
                        let is_root = decl.value.trim() != "false";
                        if let Some(class) = self.class_mut(name) {
                            class.root = is_root;
                        }
                    }
                }
                MIXIN | PARTIAL_MIXIN => {
                    let nodes = parse_value(&decl.value);
                    if nodes.iter().any(|n| matches!(n, ValueNode::String { .. })) {
                        self.error(decl.span, messages::value_cannot_be_string());
                    }
                }
                _ => {}
            }
        }

        // Nested rules (`&:hover {}` inside a rule) carry their own symbols.
        let nested: Vec<&Node> = rule.nodes.iter().filter(|n| !n.is_decl()).collect();
        for node in nested {
            match node {
                Node::Rule(child) => self.handle_rule(child),
                Node::AtRule(at_rule) => self.handle_at_rule(at_rule, false),
                _ => {}
            }
        }
    }

    fn set_states(&mut self, class_name: &str, value: &str, span: Option<Span>) {
        let already_typed = self
            .meta
            .class(class_name)
            .is_some_and(|class| class.states.is_some());
        if already_typed {
            self.warn(span, messages::override_typed_rule(STATES, class_name));
            return;
        }
        let (states, issues) = parse_states(value);
        for issue in issues {
            let message = match issue {
                StateParseIssue::StartsWithHyphen(name) => messages::state_starts_with_hyphen(&name),
                StateParseIssue::UnknownType { state, ty } => messages::unknown_state_type(&state, &ty),
                StateParseIssue::NoType(state) => messages::no_state_type_given(&state),
                StateParseIssue::TooManyTypes { state, types } => {
                    messages::too_many_state_types(&state, &types)
                }
            };
            self.error(span, message);
        }
        if let Some(class) = self.class_mut(class_name) {
            class.states = Some(states);
        }
    }

    /// Register classes and custom elements used anywhere in a selector,
    /// including inside `:not()`-like arguments but not inside `:global()`.
    fn register_selector(&mut self, selector: &Selector, span: Option<Span>) {
        for chunk in &selector.chunks {
            for node in &chunk.nodes {
                match node {
                    SimpleSelector::Class(name) => self.add_class(name, span),
                    SimpleSelector::Type(name) if name.starts_with(|c: char| c.is_ascii_uppercase()) => {
                        self.add_element(name, span)
                    }
                    SimpleSelector::PseudoClass {
                        name,
                        argument: Some(argument),
                    } if SELECTOR_ARGUMENT_PSEUDO_CLASSES.contains(&name.as_str()) => {
                        for inner in parse_selector_list(argument) {
                            self.register_selector(&inner, span);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn register_var_usages(&mut self, nodes: &[ValueNode], span: Option<Span>) {
        for node in nodes {
            if let ValueNode::Function { name, nodes } = node {
                if name == VAR_FUNCTION {
                    let first = nodes.iter().find(|n| !n.is_space());
                    if let Some(ValueNode::Word(var)) = first {
                        if var.starts_with("--") {
                            self.add_css_var(var, false, span);
                        }
                    }
                }
                self.register_var_usages(nodes, span);
            }
        }
    }

    fn check_extends(&mut self) {
        for (name, span) in std::mem::take(&mut self.extends_refs) {
            let known = matches!(
                self.meta.mapped_symbols.get(&name),
                Some(Symbol::Class(_) | Symbol::Element(_) | Symbol::Import(_))
            );
            if !known {
                self.error(span, messages::cannot_extend_unknown_symbol(&name));
            }
        }
    }
}
