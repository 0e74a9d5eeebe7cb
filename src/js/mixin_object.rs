//! Conversion of JS mixin results into stylesheet nodes.
//!
//! ```text
//! { color: "red", "&:hover": { color: "blue" }, "@media (x)": { zIndex: 1 } }
//! ```
//! becomes, relative to the mixing rule `&`:
//! ```text
//! color: red;
//! &:hover { color: blue; }
//! @media (x) { & { z-index: 1; } }
//! ```

use serde_json::{Map, Value};

use crate::css::{AtRule, Declaration, Node, Rule};

/// Property name for an object key: camelCase is kebab-cased, custom
/// properties are kept.
pub fn css_property_name(key: &str) -> String {
    if key.starts_with("--") {
        return key.to_string();
    }
    let mut result = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    if result.starts_with("ms-") {
        result.insert(0, '-');
    }
    result
}

/// Convert a mixin result object into top-level declarations followed by
/// flattened rules and at-rules, all relative to `&`.
pub fn object_to_nodes(object: &Map<String, Value>) -> Vec<Node> {
    let mut decls = Vec::new();
    let mut rules = Vec::new();
    collect(object, "&", &mut decls, &mut rules);
    decls.extend(rules);
    decls
}

fn collect(object: &Map<String, Value>, selector: &str, decls: &mut Vec<Node>, rules: &mut Vec<Node>) {
    for (key, value) in object {
        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Object(inner) => {
                if let Some(at_rule) = key.strip_prefix('@') {
                    let (name, params) = at_rule.split_once(' ').unwrap_or((at_rule, ""));
                    let mut inner_decls = Vec::new();
                    let mut inner_rules = Vec::new();
                    collect(inner, selector, &mut inner_decls, &mut inner_rules);
                    let mut children = Vec::new();
                    if !inner_decls.is_empty() {
                        children.push(Rule::new(selector, inner_decls).into());
                    }
                    children.extend(inner_rules);
                    rules.push(AtRule::new(name, params.trim(), Some(children)).into());
                } else {
                    let nested = nest_selector(selector, key);
                    let mut inner_decls = Vec::new();
                    let mut inner_rules = Vec::new();
                    collect(inner, &nested, &mut inner_decls, &mut inner_rules);
                    rules.push(Rule::new(nested, inner_decls).into());
                    rules.extend(inner_rules);
                }
            }
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        decls.push(Declaration::new(css_property_name(key), text).into());
                    }
                }
            }
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    decls.push(Declaration::new(css_property_name(key), text).into());
                }
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Nest each selector of `key` under every selector of `parent`.
fn nest_selector(parent: &str, key: &str) -> String {
    let mut nested = Vec::new();
    for parent in parent.split(',').map(str::trim) {
        for child in key.split(',').map(str::trim) {
            if child.contains('&') {
                nested.push(child.replace('&', parent));
            } else {
                nested.push(format!("{parent} {child}"));
            }
        }
    }
    nested.join(", ")
}
