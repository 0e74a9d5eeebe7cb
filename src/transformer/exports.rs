//! Name mapping handed to the runtime.

use indexmap::IndexMap;
use serde::Serialize;

use crate::processor::Symbol;
use crate::resolver::Resolved;
use crate::selector::{SimpleSelector, parse_selector_list};

use super::context::{Scope, TransformContext};
use super::values::scoped_keyframes;

/// Local names of a stylesheet mapped to their final output names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylableExports {
    /// Class name to the space separated classes an element needs.
    pub classes: IndexMap<String, String>,
    /// Custom property to its scoped name.
    pub vars: IndexMap<String, String>,
    /// `:vars` entries to their evaluated values.
    pub st_vars: IndexMap<String, String>,
    pub keyframes: IndexMap<String, String>,
}

impl StylableExports {
    /// Serialized form, in declaration order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Class names written by a `-st-global` selector.
fn global_class_names(global: &str) -> Vec<String> {
    parse_selector_list(global)
        .iter()
        .flat_map(|selector| selector.chunks.iter())
        .flat_map(|chunk| chunk.nodes.iter())
        .filter_map(|node| match node {
            SimpleSelector::Class(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

impl TransformContext<'_> {
    pub fn collect_exports(&mut self, scope: &Scope) -> StylableExports {
        let meta = scope.meta.clone();
        let mut exports = StylableExports::default();

        for class in meta.classes() {
            let chain = self
                .resolver
                .resolve_extends(&meta, &class.name, false, &mut self.diagnostics);
            let mut names = Vec::new();
            for entry in chain.iter().filter(|entry| !entry.is_alias()) {
                let Symbol::Class(resolved) = &entry.symbol else {
                    continue;
                };
                if let Some(global) = &resolved.global {
                    names.extend(global_class_names(global));
                    break;
                }
                names.push(entry.scoped_name());
            }
            if names.is_empty() && class.name == meta.root {
                names.push(meta.scoped(&meta.root));
            }
            if !names.is_empty() {
                exports.classes.insert(class.name.to_string(), names.join(" "));
            }
        }
        if !exports.classes.contains_key(meta.root.as_str()) {
            exports
                .classes
                .insert(meta.root.to_string(), meta.scoped(&meta.root));
        }

        for var in meta.css_vars() {
            let scoped = self.scope_css_var(scope, &var.name, var.span);
            exports.vars.insert(var.name.to_string(), scoped);
        }
        for import in meta.import_symbols().filter(|import| import.name.starts_with("--")) {
            if let Some(Ok(Resolved::Css(_))) = self.resolver.deep_resolve_name(&meta, &import.name) {
                let scoped = self.scope_css_var(scope, &import.name, None);
                exports.vars.insert(import.name.to_string(), scoped);
            }
        }

        self.quiet_cycles = true;
        for var in meta.vars() {
            let evaluated = self.evaluate_var(scope, &var.name, &mut Vec::new(), var.span);
            exports.st_vars.insert(var.name.to_string(), evaluated.text);
        }
        self.quiet_cycles = false;

        for name in meta.keyframes.keys() {
            if let Some(scoped) = scoped_keyframes(&meta, name) {
                exports.keyframes.insert(name.to_string(), scoped);
            }
        }
        exports
    }
}
