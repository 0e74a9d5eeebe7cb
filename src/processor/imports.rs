//! `:import` rules and `@st-import` at-rules.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use smol_str::SmolStr;

use crate::base::constants::{DEFAULT, FROM, NAMED, THEME};
use crate::css::{AtRule, Rule};
use crate::diagnostics::{Diagnostics, messages};
use crate::value::strip_quotes;

use super::meta::Import;

static ST_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:(?P<default>[^\s,\[\]"']+)\s*,?\s*)?(?:\[(?P<named>[^\]]*)\]\s*)?(?:from\s*)?(?P<from>"[^"]*"|'[^']*')\s*$"#,
    )
    .unwrap_or_else(|_| unreachable!("static pattern"))
});

static NAMED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\s]+)(?:\s+as\s+(?P<local>[^\s]+))?$")
        .unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Resolve a request lexically against the importing stylesheet's directory.
pub fn resolve_from(context: &Path, request: &str) -> PathBuf {
    let path = Path::new(request);
    if path.is_absolute() {
        normalize(path)
    } else if request.starts_with('.') {
        normalize(&context.join(path))
    } else {
        PathBuf::from(request)
    }
}

/// Remove `.` and `..` components without touching the file system.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Parse `a, b as c, --x` into local → exported pairs.
pub fn parse_named(
    text: &str,
    file: &Path,
    rule: &Rule,
    diagnostics: &mut Diagnostics,
) -> IndexMap<SmolStr, SmolStr> {
    parse_named_entries(text, |entry| {
        diagnostics.warning(file, rule.span, messages::invalid_named_import_as(entry));
    })
}

fn parse_named_entries(text: &str, mut on_invalid: impl FnMut(&str)) -> IndexMap<SmolStr, SmolStr> {
    let mut named = IndexMap::new();
    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match NAMED_ENTRY.captures(entry) {
            Some(captures) => {
                let name = &captures["name"];
                let local = captures.name("local").map_or(name, |m| m.as_str());
                named.insert(SmolStr::new(local), SmolStr::new(name));
            }
            None => on_invalid(entry),
        }
    }
    named
}

/// Read an `:import { ... }` block. Returns `None` when it has no usable
/// `-st-from`.
pub fn parse_import_rule(rule: &Rule, file: &Path, diagnostics: &mut Diagnostics) -> Option<Import> {
    let context = file.parent().unwrap_or(Path::new("/"));
    let mut request: Option<String> = None;
    let mut default_export = None;
    let mut named = IndexMap::new();
    let mut overrides = IndexMap::new();
    let mut theme = false;

    for decl in rule.decls() {
        match decl.prop.as_str() {
            FROM => {
                if request.is_some() {
                    diagnostics.error(file, decl.span, messages::multiple_from_in_import());
                }
                let value = decl.value.trim();
                if strip_quotes(value).len() == value.len() {
                    diagnostics.error(file, decl.span, messages::from_must_be_string());
                }
                request = Some(strip_quotes(value).trim().to_string());
            }
            DEFAULT => default_export = Some(SmolStr::new(decl.value.trim())),
            NAMED => named.extend(parse_named(&decl.value, file, rule, diagnostics)),
            THEME => theme = decl.value.trim() != "false",
            prop if prop.starts_with("-st-") => {
                diagnostics.warning(file, decl.span, messages::illegal_prop_in_import(prop));
            }
            prop => {
                overrides.insert(SmolStr::new(prop), decl.value.clone());
            }
        }
    }

    let Some(request) = request else {
        diagnostics.error(file, rule.span, messages::from_prop_missing_in_import());
        return None;
    };
    if request.is_empty() {
        diagnostics.error(file, rule.span, messages::empty_import_from());
        return None;
    }

    let mut import = Import::new(&request, resolve_from(context, &request));
    import.default_export = default_export;
    import.named = named;
    import.overrides = overrides;
    import.theme = theme;
    import.span = rule.span;
    Some(import)
}

/// Read `@st-import Default, [a, b as c] from "./x.st.css";`.
pub fn parse_st_import(at_rule: &AtRule, file: &Path, diagnostics: &mut Diagnostics) -> Option<Import> {
    let context = file.parent().unwrap_or(Path::new("/"));
    let Some(captures) = ST_IMPORT.captures(&at_rule.params) else {
        diagnostics.error(file, at_rule.span, messages::invalid_st_import(&at_rule.params));
        return None;
    };
    let request = strip_quotes(&captures["from"]).trim().to_string();
    if request.is_empty() {
        diagnostics.error(file, at_rule.span, messages::empty_import_from());
        return None;
    }

    let mut import = Import::new(&request, resolve_from(context, &request));
    import.default_export = captures.name("default").map(|m| SmolStr::new(m.as_str()));
    if let Some(named) = captures.name("named") {
        import.named = parse_named_entries(named.as_str(), |entry| {
            diagnostics.warning(file, at_rule.span, messages::invalid_named_import_as(entry));
        });
    }
    import.span = at_rule.span;
    Some(import)
}
