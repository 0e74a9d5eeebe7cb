//! Mixin application.
//!
//! `-st-mixin: a, b(x 1px)` copies the content of other rules into the
//! consuming rule. A CSS mixin contributes the subset of its stylesheet that
//! targets the mixed-in class, transformed in that stylesheet's scope with the
//! arguments as `:vars` overrides. A JS mixin contributes the rules of the
//! object its function returns.
//!
//! Mixed-in rules whose selector is exactly `&` are merged into the consuming
//! rule at the position of the mixin declaration; every other mixed-in rule is
//! emitted after it, with `&` replaced by the consuming selector.

use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde_json::Value;
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::base::Span;
use crate::base::constants::{IMPORT_RULE, MIXIN, PARTIAL_MIXIN, VARS_RULE};
use crate::css::{AtRule, Declaration, Node, Rule};
use crate::diagnostics::messages;
use crate::js::object_to_nodes;
use crate::processor::Symbol;
use crate::resolver::{CssResolve, JsResolve, Resolved};
use crate::selector::{Selector, SimpleSelector, parse_selector_list, stringify_selector_list};
use crate::value::{ValueNode, function_args, parse_value, split_by_comma, stringify, trim_spaces};

use super::context::{Scope, TransformContext};

/// Nodes produced by the mixins of one declaration.
#[derive(Debug, Default)]
pub(super) struct MixinOutput {
    /// Inserted in place of the mixin declaration.
    pub nodes: Vec<Node>,
    /// Emitted after the consuming rule.
    pub rules: Vec<Node>,
}

/// One entry of a mixin declaration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MixinCall {
    pub name: String,
    /// Raw argument nodes of `name(...)`, `None` for a bare name.
    pub args: Option<Vec<ValueNode>>,
}

/// Split a mixin declaration value into calls. Entries that are neither a
/// name nor a call are returned as text.
pub(super) fn parse_mixin_calls(value: &str) -> (Vec<MixinCall>, Vec<String>) {
    let nodes = parse_value(value);
    let mut calls = Vec::new();
    let mut invalid = Vec::new();
    for part in split_by_comma(&nodes) {
        match trim_spaces(part) {
            [] => {}
            [ValueNode::Word(name)] => calls.push(MixinCall {
                name: name.clone(),
                args: None,
            }),
            [ValueNode::Function { name, nodes }] if !name.is_empty() => calls.push(MixinCall {
                name: name.clone(),
                args: Some(nodes.clone()),
            }),
            other => invalid.push(stringify(other)),
        }
    }
    (calls, invalid)
}

impl TransformContext<'_> {
    /// Indices of the mixin declarations of `rule` that take effect: the last
    /// one per property.
    pub fn winning_mixin_decls(&mut self, scope: &Scope, rule: &Rule) -> FxHashSet<usize> {
        let mut winners = FxHashSet::default();
        for prop in [MIXIN, PARTIAL_MIXIN] {
            let decls: Vec<(usize, &Declaration)> = rule
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| node.as_decl().filter(|d| d.prop == prop).map(|d| (index, d)))
                .collect();
            let Some(&(index, last)) = decls.last() else {
                continue;
            };
            if decls.iter().any(|(_, decl)| decl.value.trim() != last.value.trim()) {
                self.warn(scope, last.span, messages::override_mixin(prop));
            }
            winners.insert(index);
        }
        winners
    }

    /// Apply every mixin named by `decl` to the rule printed as `target`.
    pub fn apply_mixin_decl(&mut self, scope: &Scope, decl: &Declaration, target: &str) -> MixinOutput {
        let partial = decl.prop == PARTIAL_MIXIN;
        let mut output = MixinOutput::default();
        let (calls, invalid) = parse_mixin_calls(&decl.value);
        for text in invalid {
            self.warn_word(scope, decl.span, messages::unknown_mixin(&text), &text);
        }

        for call in calls {
            match self.resolver.deep_resolve_name(&scope.meta, &call.name) {
                None => self.warn_word(scope, decl.span, messages::unknown_mixin(&call.name), &call.name),
                Some(Err(err)) => self.warn(scope, decl.span, err.to_string()),
                Some(Ok(Resolved::Js(js))) => {
                    self.apply_js_mixin(scope, decl.span, &call, &js, target, &mut output);
                }
                Some(Ok(Resolved::Css(css))) if matches!(css.symbol, Symbol::Class(_) | Symbol::Element(_)) => {
                    self.apply_css_mixin(scope, decl.span, &call, &css, partial, target, &mut output);
                }
                Some(Ok(Resolved::Css(_))) => {
                    self.warn_word(scope, decl.span, messages::unknown_mixin(&call.name), &call.name);
                }
            }
        }
        output
    }

    /// Push `entry` on the mixin path, or report the cycle it closes.
    fn enter_mixin(&mut self, scope: &Scope, span: Option<Span>, entry: String) -> Option<Vec<String>> {
        let mut path = scope.mixin_path.clone();
        let circular = path.contains(&entry);
        path.push(entry);
        if circular {
            warn!(chain = ?path, "circular mixin");
            self.warn(scope, span, messages::circular_mixin(&path));
            return None;
        }
        Some(path)
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_css_mixin(
        &mut self,
        scope: &Scope,
        span: Option<Span>,
        call: &MixinCall,
        css: &CssResolve,
        partial: bool,
        target: &str,
        output: &mut MixinOutput,
    ) {
        let entry = format!("{} from {}", css.name(), css.meta.source.display());
        let Some(path) = self.enter_mixin(scope, span, entry) else {
            return;
        };

        let (overrides, touched) = self.mixin_overrides(scope, span, call);
        if partial && overrides.is_empty() {
            self.warn(scope, span, messages::partial_mixin_missing_arguments(&call.name));
            return;
        }
        if scope.partial && !touched {
            return;
        }

        let (prefix, is_root) = match &css.symbol {
            Symbol::Element(element) => (SimpleSelector::Type(element.name.to_string()), false),
            _ => (
                SimpleSelector::Class(css.name().to_string()),
                css.name() == &css.meta.root,
            ),
        };
        let subset = mixin_subset(&css.meta.ast.nodes, &prefix, is_root);
        debug!(mixin = %call.name, source = %css.meta.source.display(), partial, "apply css mixin");

        let child = Scope {
            meta: css.meta.clone(),
            overrides: (!overrides.is_empty()).then(|| Rc::new(overrides)),
            partial,
            mixin_path: path,
            nesting: matches!(css.symbol, Symbol::Class(_)).then(|| css.name().clone()),
        };
        let nodes = self.transform_nodes(&child, &subset);
        merge_mixin_nodes(nodes, target, output);
    }

    /// Evaluate `var value` arguments in the consuming scope. Returns the
    /// overrides and whether any of them used an override of `scope`.
    fn mixin_overrides(
        &mut self,
        scope: &Scope,
        span: Option<Span>,
        call: &MixinCall,
    ) -> (IndexMap<SmolStr, String>, bool) {
        let mut overrides = IndexMap::new();
        let mut touched = false;
        let Some(args) = &call.args else {
            return (overrides, touched);
        };
        for arg in split_by_comma(args) {
            let arg = trim_spaces(arg);
            if arg.is_empty() {
                continue;
            }
            match arg.split_first() {
                Some((ValueNode::Word(name), rest)) if rest.first().is_some_and(ValueNode::is_space) => {
                    let evaluated = self.transform_value(scope, &stringify(trim_spaces(rest)), span, None);
                    touched |= evaluated.touched;
                    overrides.insert(SmolStr::new(name), evaluated.text);
                }
                _ => self.warn(
                    scope,
                    span,
                    messages::invalid_mixin_argument(&call.name, &stringify(arg)),
                ),
            }
        }
        (overrides, touched)
    }

    fn apply_js_mixin(
        &mut self,
        scope: &Scope,
        span: Option<Span>,
        call: &MixinCall,
        js: &JsResolve,
        target: &str,
        output: &mut MixinOutput,
    ) {
        let Some(function) = js.export.as_function().cloned() else {
            self.error(scope, span, messages::js_mixin_not_a_func(&call.name));
            return;
        };
        let entry = format!("{} from {}", call.name, js.path.display());
        let Some(path) = self.enter_mixin(scope, span, entry) else {
            return;
        };

        let raw_args = call
            .args
            .as_deref()
            .map(function_args)
            .unwrap_or_default();
        let mut args = Vec::with_capacity(raw_args.len());
        for arg in &raw_args {
            args.push(self.transform_value(scope, arg, span, None).text);
        }
        debug!(mixin = %call.name, ?args, "apply js mixin");

        match function.invoke(&args) {
            Ok(Value::Object(object)) => {
                let mut nodes = object_to_nodes(&object);
                let rules = nodes.split_off(nodes.iter().take_while(|node| node.is_decl()).count());
                let mut content: Vec<Node> = vec![Rule::new("&", nodes).into()];
                content.extend(rules);

                let child = Scope {
                    meta: scope.meta.clone(),
                    overrides: scope.overrides.clone(),
                    partial: false,
                    mixin_path: path,
                    nesting: None,
                };
                let nodes = self.transform_nodes(&child, &content);
                merge_mixin_nodes(nodes, target, output);
            }
            Ok(_) => self.error(scope, span, messages::js_mixin_not_an_object(&call.name)),
            Err(err) => self.error(scope, span, messages::failed_js_mixin(&call.name, &err.message)),
        }
    }
}

// ============================================================================
// SUBSET & MERGE
// ============================================================================

fn starts_with(selector: &Selector, prefix: &SimpleSelector) -> bool {
    selector
        .chunks
        .first()
        .is_some_and(|chunk| chunk.combinator.is_none() && chunk.nodes.first() == Some(prefix))
}

/// Rules of a stylesheet that target `prefix`, rewritten to start with `&`.
///
/// For the root class every other rule is kept as a descendant of `&`.
/// `@media` and `@supports` blocks are searched recursively.
pub(super) fn mixin_subset(nodes: &[Node], prefix: &SimpleSelector, is_root: bool) -> Vec<Node> {
    let mut subset = Vec::new();
    for node in nodes {
        match node {
            Node::Rule(rule) if rule.selector == IMPORT_RULE || rule.selector == VARS_RULE => {}
            Node::Rule(rule) => {
                let list = parse_selector_list(&rule.selector);
                let selector = if !list.is_empty() && list.iter().all(|s| starts_with(s, prefix)) {
                    let nested: Vec<Selector> = list
                        .into_iter()
                        .map(|mut selector| {
                            selector.chunks[0].nodes[0] = SimpleSelector::Nesting;
                            selector
                        })
                        .collect();
                    stringify_selector_list(&nested)
                } else if is_root {
                    list.iter()
                        .map(|selector| format!("& {selector}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                } else {
                    continue;
                };
                subset.push(
                    Rule {
                        selector,
                        nodes: rule.nodes.clone(),
                        span: rule.span,
                    }
                    .into(),
                );
            }
            Node::AtRule(at_rule) if matches!(at_rule.name.as_str(), "media" | "supports") => {
                let Some(children) = &at_rule.nodes else {
                    continue;
                };
                let inner = mixin_subset(children, prefix, is_root);
                if !inner.is_empty() {
                    subset.push(
                        AtRule {
                            name: at_rule.name.clone(),
                            params: at_rule.params.clone(),
                            nodes: Some(inner),
                            span: at_rule.span,
                        }
                        .into(),
                    );
                }
            }
            _ => {}
        }
    }
    subset
}

/// Combine a parent and a child selector list. `&` in the child stands for
/// the parent; a child without `&` becomes a descendant of it.
pub(super) fn nest_selector_list(parent: &str, child: &str) -> String {
    let parents: Vec<String> = parse_selector_list(parent).iter().map(ToString::to_string).collect();
    let mut nested = Vec::new();
    for selector in parse_selector_list(child) {
        let text = selector.to_string();
        for parent in &parents {
            if selector.has_nesting() {
                nested.push(text.replace('&', parent));
            } else {
                nested.push(format!("{parent} {text}"));
            }
        }
    }
    nested.join(", ")
}

fn retarget(nodes: &mut [Node], target: &str) {
    for node in nodes {
        match node {
            Node::Rule(rule) => rule.selector = nest_selector_list(target, &rule.selector),
            Node::AtRule(at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    retarget(children, target);
                }
            }
            _ => {}
        }
    }
}

fn merge_mixin_nodes(nodes: Vec<Node>, target: &str, output: &mut MixinOutput) {
    for node in nodes {
        match node {
            Node::Rule(rule) if rule.selector.trim() == "&" => output.nodes.extend(rule.nodes),
            Node::Rule(mut rule) => {
                rule.selector = nest_selector_list(target, &rule.selector);
                output.rules.push(rule.into());
            }
            Node::AtRule(mut at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    retarget(children, target);
                }
                output.rules.push(at_rule.into());
            }
            Node::Decl(decl) => output.nodes.push(decl.into()),
            Node::Comment(_) => {}
        }
    }
}
