//! Transformer — compiles a processed stylesheet to plain CSS.
//!
//! Works on a copy of the meta's source tree; the meta itself is shared
//! through the file processor cache and never changes. One [`transform`]
//! call:
//! 1. checks every import binding and reports the ones that do not resolve;
//! 2. walks the tree, dropping Stylable-only constructs, scoping selectors,
//!    inlining values and applying mixins;
//! 3. collects the [`StylableExports`] of the stylesheet.
//!
//! [`transform`]: Transformer::transform

mod context;
mod exports;
mod mixins;
mod selector;
mod states;
mod values;


use std::rc::Rc;

use indexmap::IndexSet;
use tracing::debug;

use crate::base::constants::*;
use crate::css::{AtRule, Declaration, Node, Root, Rule};
use crate::diagnostics::Diagnostics;
use crate::processor::{Meta, Symbol};
use crate::resolver::Resolver;

use context::{Scope, TransformContext};
use mixins::nest_selector_list;
use values::scoped_keyframes;

pub use exports::StylableExports;
pub use states::{state_attribute, validate_state_value};

/// Output of one transform.
#[derive(Debug, Clone)]
pub struct StylableResults {
    pub meta: Rc<Meta>,
    /// The compiled tree; print with [`Root::to_css`].
    pub output_ast: Root,
    pub exports: StylableExports,
    /// Diagnostics of processing followed by those of the transform.
    pub diagnostics: Diagnostics,
    /// Selectors emitted unscoped through `:global()` or `-st-global`.
    pub globals: IndexSet<String>,
}

impl StylableResults {
    pub fn css(&self) -> String {
        self.output_ast.to_css()
    }
}

/// Compiles metas against a shared [`Resolver`].
#[derive(Clone)]
pub struct Transformer {
    resolver: Resolver,
}

impl Transformer {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn transform(&self, meta: &Rc<Meta>) -> StylableResults {
        debug!(source = %meta.source.display(), namespace = %meta.namespace, "transform");
        let mut ctx = TransformContext::new(&self.resolver);
        let scope = Scope::new(meta.clone());

        ctx.check_imports(&scope);
        let nodes = ctx.transform_nodes(&scope, &meta.ast.nodes);
        let exports = ctx.collect_exports(&scope);

        let mut diagnostics = meta.diagnostics.clone();
        diagnostics.extend(ctx.diagnostics);
        debug!(diagnostics = diagnostics.len(), globals = ctx.globals.len(), "transform done");
        StylableResults {
            meta: meta.clone(),
            output_ast: Root::new(nodes),
            exports,
            diagnostics,
            globals: ctx.globals,
        }
    }
}

// ============================================================================
// TREE WALK
// ============================================================================

impl TransformContext<'_> {
    /// Report import bindings that point at missing files or symbols.
    fn check_imports(&mut self, scope: &Scope) {
        for symbol in scope.meta.mapped_symbols.values() {
            let import = match symbol {
                Symbol::Import(import) => import,
                other => match other.alias() {
                    Some(import) => import,
                    None => continue,
                },
            };
            if let Err(err) = self.resolver.deep_resolve(&scope.meta, symbol) {
                let span = scope.meta.imports.get(import.import).and_then(|i| i.span);
                self.warn(scope, span, err.to_string());
            }
        }
    }

    pub fn transform_nodes(&mut self, scope: &Scope, nodes: &[Node]) -> Vec<Node> {
        let mut out = Vec::new();
        for node in nodes {
            match node {
                Node::Rule(rule) if rule.selector == IMPORT_RULE || rule.selector == VARS_RULE => {}
                Node::Rule(rule) => out.extend(self.transform_rule(scope, rule, None)),
                Node::AtRule(at_rule) => out.extend(self.transform_at_rule(scope, at_rule)),
                Node::Decl(decl) => {
                    if let Some(decl) = self.transform_decl(scope, decl) {
                        out.push(decl.into());
                    }
                }
                Node::Comment(_) if scope.partial => {}
                Node::Comment(comment) => out.push(Node::Comment(comment.clone())),
            }
        }
        out
    }

    /// A rule followed by the rules its mixins emit. `prefix` is the scoped
    /// selector of an enclosing `@st-scope`.
    fn transform_rule(&mut self, scope: &Scope, rule: &Rule, prefix: Option<&str>) -> Vec<Node> {
        let mut selector = self.scope_selector(scope, &rule.selector, rule.span);
        if let Some(prefix) = prefix {
            selector = nest_selector_list(prefix, &selector);
        }
        let winners = self.winning_mixin_decls(scope, rule);

        let mut body = Vec::new();
        let mut siblings = Vec::new();
        for (index, node) in rule.nodes.iter().enumerate() {
            match node {
                Node::Decl(decl) if decl.prop == MIXIN || decl.prop == PARTIAL_MIXIN => {
                    if winners.contains(&index) {
                        let output = self.apply_mixin_decl(scope, decl, &selector);
                        body.extend(output.nodes);
                        siblings.extend(output.rules);
                    }
                }
                Node::Decl(decl) if decl.prop.starts_with(ST_DIRECTIVE_PREFIX) => {}
                other => body.extend(self.transform_nodes(scope, std::slice::from_ref(other))),
            }
        }

        let mut out = Vec::new();
        if !(scope.partial && body.is_empty()) {
            out.push(
                Rule {
                    selector,
                    nodes: body,
                    span: rule.span,
                }
                .into(),
            );
        }
        out.extend(siblings);
        out
    }

    /// Rewrite one declaration; in a partial scope only declarations using an
    /// override survive.
    fn transform_decl(&mut self, scope: &Scope, decl: &Declaration) -> Option<Declaration> {
        let evaluated = self.transform_value(scope, &decl.value, decl.span, Some(&decl.prop));
        if scope.partial && !evaluated.touched {
            return None;
        }
        let prop = if decl.prop.starts_with("--") {
            self.scope_css_var(scope, &decl.prop, decl.span)
        } else {
            decl.prop.clone()
        };
        Some(Declaration {
            prop,
            value: evaluated.text,
            important: decl.important,
            span: decl.span,
        })
    }

    fn transform_at_rule(&mut self, scope: &Scope, at_rule: &AtRule) -> Vec<Node> {
        match at_rule.name.as_str() {
            NAMESPACE_AT_RULE
            | ST_NAMESPACE_AT_RULE
            | ST_IMPORT_AT_RULE
            | CUSTOM_SELECTOR_AT_RULE
            | GLOBAL_CUSTOM_PROPERTY_AT_RULE => Vec::new(),
            KEYFRAMES_AT_RULE => vec![self.transform_keyframes(scope, at_rule).into()],
            ST_SCOPE_AT_RULE => {
                let prefix = self.scope_selector(scope, &at_rule.params, at_rule.span);
                let mut out = Vec::new();
                for child in at_rule.nodes.iter().flatten() {
                    match child {
                        Node::Rule(rule) if rule.selector != IMPORT_RULE && rule.selector != VARS_RULE => {
                            out.extend(self.transform_rule(scope, rule, Some(&prefix)));
                        }
                        other => out.extend(self.transform_nodes(scope, std::slice::from_ref(other))),
                    }
                }
                out
            }
            _ => {
                let params = self.transform_value(scope, &at_rule.params, at_rule.span, None).text;
                let nodes = at_rule
                    .nodes
                    .as_ref()
                    .map(|children| self.transform_nodes(scope, children));
                if scope.partial && nodes.as_ref().is_none_or(Vec::is_empty) {
                    return Vec::new();
                }
                vec![
                    AtRule {
                        name: at_rule.name.clone(),
                        params,
                        nodes,
                        span: at_rule.span,
                    }
                    .into(),
                ]
            }
        }
    }

    /// Keyframes keep their frame selectors; only the name and the values
    /// change.
    fn transform_keyframes(&mut self, scope: &Scope, at_rule: &AtRule) -> AtRule {
        let params = at_rule.params.trim();
        let name = params
            .strip_prefix(":global(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map_or(params, str::trim);
        let scoped = scoped_keyframes(&scope.meta, name).unwrap_or_else(|| name.to_string());

        let mut frames = Vec::new();
        for child in at_rule.nodes.iter().flatten() {
            match child {
                Node::Rule(frame) => {
                    let mut nodes = Vec::new();
                    for node in &frame.nodes {
                        match node {
                            Node::Decl(decl) => {
                                if let Some(decl) = self.transform_decl(scope, decl) {
                                    nodes.push(decl.into());
                                }
                            }
                            other => nodes.push(other.clone()),
                        }
                    }
                    frames.push(
                        Rule {
                            selector: frame.selector.clone(),
                            nodes,
                            span: frame.span,
                        }
                        .into(),
                    );
                }
                other => frames.push(other.clone()),
            }
        }
        AtRule {
            name: at_rule.name.clone(),
            params: scoped,
            nodes: Some(frames),
            span: at_rule.span,
        }
    }
}
