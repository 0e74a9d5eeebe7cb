//! Value inlining: `value()` references, JS formatters, custom properties and
//! keyframes names inside declaration values and at-rule params.
//!
//! Variables are evaluated lazily. Every evaluation carries the chain of
//! `(source, name)` pairs it is nested in; meeting a pair twice leaves the
//! reference as literal `value(name)` text and reports the cycle.

use std::path::PathBuf;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;
use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::base::Span;
use crate::base::constants::{VALUE_FUNCTION, VAR_FUNCTION};
use crate::diagnostics::messages;
use crate::processor::{Meta, Symbol};
use crate::resolver::Resolved;
use crate::value::{ValueNode, function_args, parse_value, split_by_comma, stringify, trim_spaces};

use super::context::{Scope, TransformContext};

/// Evaluated value text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Evaluated {
    pub text: String,
    /// A variable override of the scope took part in the result.
    pub touched: bool,
}

type Visited = Vec<(PathBuf, SmolStr)>;

fn is_animation_prop(prop: &str) -> bool {
    matches!(prop, "animation" | "animation-name")
}

/// Final name of a keyframes declared in `meta`.
pub(super) fn scoped_keyframes(meta: &Meta, name: &str) -> Option<String> {
    meta.keyframes.get(name).map(|keyframes| {
        if keyframes.global {
            keyframes.name.to_string()
        } else {
            meta.scoped(&keyframes.name)
        }
    })
}

impl TransformContext<'_> {
    /// Rewrite a declaration value (or at-rule params) in `scope`.
    pub fn transform_value(
        &mut self,
        scope: &Scope,
        text: &str,
        span: Option<Span>,
        prop: Option<&str>,
    ) -> Evaluated {
        let mut nodes = parse_value(text);
        if prop.is_some_and(is_animation_prop) {
            for node in &mut nodes {
                if let ValueNode::Word(word) = node {
                    if let Some(scoped) = scoped_keyframes(&scope.meta, word) {
                        *word = scoped;
                    }
                }
            }
        }
        let mut touched = false;
        let mut visited = Visited::new();
        let text = self.evaluate_nodes(scope, &nodes, &mut visited, span, &mut touched);
        Evaluated { text, touched }
    }

    fn evaluate_nodes(
        &mut self,
        scope: &Scope,
        nodes: &[ValueNode],
        visited: &mut Visited,
        span: Option<Span>,
        touched: &mut bool,
    ) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                ValueNode::Function { name, nodes: args } if name == VALUE_FUNCTION => {
                    let Some(var_name) = function_args(args).into_iter().next() else {
                        out.push_str(&node.to_string());
                        continue;
                    };
                    let evaluated = self.evaluate_var(scope, &var_name, visited, span);
                    *touched |= evaluated.touched;
                    out.push_str(&evaluated.text);
                }
                ValueNode::Function { name, nodes: args } if name == VAR_FUNCTION => {
                    out.push_str("var(");
                    let first = args.iter().position(|n| !n.is_space());
                    for (i, arg) in args.iter().enumerate() {
                        match arg {
                            ValueNode::Word(var) if Some(i) == first && var.starts_with("--") => {
                                out.push_str(&self.scope_css_var(scope, var, span));
                            }
                            other => out.push_str(&self.evaluate_nodes(
                                scope,
                                std::slice::from_ref(other),
                                visited,
                                span,
                                touched,
                            )),
                        }
                    }
                    out.push(')');
                }
                ValueNode::Function { name, nodes: args } => {
                    if let Some(formatted) = self.apply_formatter(scope, node, name, args, visited, span, touched) {
                        out.push_str(&formatted);
                        continue;
                    }
                    out.push_str(name);
                    out.push('(');
                    out.push_str(&self.evaluate_nodes(scope, args, visited, span, touched));
                    out.push(')');
                }
                other => out.push_str(&other.to_string()),
            }
        }
        out
    }

    /// Call a JS formatter imported under `name`, if that is what it is.
    #[allow(clippy::too_many_arguments)]
    fn apply_formatter(
        &mut self,
        scope: &Scope,
        node: &ValueNode,
        name: &str,
        args: &[ValueNode],
        visited: &mut Visited,
        span: Option<Span>,
        touched: &mut bool,
    ) -> Option<String> {
        if !matches!(scope.meta.symbol(name), Some(Symbol::Import(_))) {
            return None;
        }
        let Ok(Resolved::Js(js)) = self.resolver.deep_resolve_name(&scope.meta, name)? else {
            return None;
        };
        let function = js.export.as_function()?.clone();

        let mut evaluated_args = Vec::new();
        if !args.iter().all(ValueNode::is_space) {
            for arg in split_by_comma(args) {
                let text = self.evaluate_nodes(scope, trim_spaces(arg), visited, span, touched);
                evaluated_args.push(text.trim().to_string());
            }
        }
        trace!(formatter = name, args = ?evaluated_args, "call formatter");
        match function.invoke(&evaluated_args) {
            Ok(Value::String(text)) => Some(text),
            Ok(value) => Some(value.to_string()),
            Err(err) => {
                self.warn(scope, span, messages::failed_formatter(name, &err.message));
                Some(node.to_string())
            }
        }
    }

    /// Evaluate `value(name)` in `scope`.
    pub fn evaluate_var(
        &mut self,
        scope: &Scope,
        name: &str,
        visited: &mut Visited,
        span: Option<Span>,
    ) -> Evaluated {
        let literal = || Evaluated {
            text: format!("{VALUE_FUNCTION}({name})"),
            touched: false,
        };
        if let Some(text) = scope.overrides.as_ref().and_then(|o| o.get(name)) {
            return Evaluated {
                text: text.clone(),
                touched: true,
            };
        }

        let key = (scope.meta.source.clone(), SmolStr::new(name));
        if visited.contains(&key) {
            let mut chain: Vec<String> = visited.iter().map(|(_, var)| var.to_string()).collect();
            chain.push(name.to_string());
            if !self.quiet_cycles {
                warn!(chain = ?chain, "cyclic value");
                self.warn(scope, span, messages::cyclic_value(&chain));
            }
            return literal();
        }

        match scope.meta.symbol(name).cloned() {
            Some(Symbol::Var(var)) => {
                visited.push(key);
                let mut touched = false;
                let text = self.evaluate_nodes(scope, &parse_value(&var.text), visited, span, &mut touched);
                visited.pop();
                Evaluated { text, touched }
            }
            Some(symbol @ Symbol::Import(_)) => {
                visited.push(key);
                let evaluated = self.evaluate_imported_var(scope, &symbol, name, visited, span);
                visited.pop();
                evaluated.unwrap_or_else(literal)
            }
            Some(other) => {
                self.warn(scope, span, messages::cannot_use_as_value(other.kind_name(), name));
                literal()
            }
            None => {
                self.warn_word(scope, span, messages::unknown_var(name), name);
                literal()
            }
        }
    }

    fn evaluate_imported_var(
        &mut self,
        scope: &Scope,
        symbol: &Symbol,
        name: &str,
        visited: &mut Visited,
        span: Option<Span>,
    ) -> Option<Evaluated> {
        let Symbol::Import(import) = symbol else {
            return None;
        };
        let statement_overrides = scope
            .meta
            .imports
            .get(import.import)
            .map(|statement| statement.overrides.clone())
            .unwrap_or_default();

        if let Some(text) = statement_overrides.get(import.import_name.as_str()) {
            let mut touched = false;
            let text = self.evaluate_nodes(scope, &parse_value(text), visited, span, &mut touched);
            return Some(Evaluated { text, touched });
        }

        match self.resolver.deep_resolve(&scope.meta, symbol) {
            Ok(Resolved::Css(css)) => match &css.symbol {
                Symbol::Var(var) => {
                    let mut target = Scope::new(css.meta.clone());
                    if !statement_overrides.is_empty() {
                        let mut evaluated = IndexMap::new();
                        for (key, text) in &statement_overrides {
                            let mut touched = false;
                            let text = self.evaluate_nodes(scope, &parse_value(text), visited, span, &mut touched);
                            evaluated.insert(key.clone(), text);
                        }
                        target.overrides = Some(Rc::new(evaluated));
                    }
                    let evaluated = self.evaluate_var(&target, &var.name, visited, span);
                    Some(Evaluated {
                        text: evaluated.text,
                        touched: false,
                    })
                }
                other => {
                    self.warn(scope, span, messages::cannot_use_as_value(other.kind_name(), name));
                    None
                }
            },
            Ok(Resolved::Js(js)) => match js.export.as_text() {
                Some(text) => Some(Evaluated { text, touched: false }),
                None => {
                    self.warn(scope, span, messages::cannot_use_as_value("JS export", name));
                    None
                }
            },
            Err(err) => {
                self.warn(scope, span, err.to_string());
                None
            }
        }
    }

    /// Final name of a custom property referenced in `scope`.
    pub fn scope_css_var(&mut self, scope: &Scope, name: &str, span: Option<Span>) -> String {
        match scope.meta.symbol(name) {
            Some(Symbol::CssVar(var)) if var.global => name.to_string(),
            Some(Symbol::Import(_)) => match self.resolver.deep_resolve_name(&scope.meta, name) {
                Some(Ok(Resolved::Css(css))) => match &css.symbol {
                    Symbol::CssVar(var) if var.global => var.name.to_string(),
                    Symbol::CssVar(var) => css.meta.scoped_css_var(&var.name),
                    _ => scope.meta.scoped_css_var(name),
                },
                Some(Err(err)) => {
                    self.warn(scope, span, err.to_string());
                    scope.meta.scoped_css_var(name)
                }
                _ => scope.meta.scoped_css_var(name),
            },
            _ => scope.meta.scoped_css_var(name),
        }
    }
}
