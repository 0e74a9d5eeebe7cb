//! Namespace resolution.
//!
//! The processor hands the declared namespace (or the file stem) to a
//! [`NamespaceResolver`] which produces the final prefix used for scoping.

use std::hash::{Hash, Hasher};
use std::path::Path;

use rustc_hash::FxHasher;

use crate::base::constants::{CSS_EXT, STYLABLE_EXT};

/// Maps a declared namespace and its stylesheet to the final namespace.
pub trait NamespaceResolver {
    fn resolve(&self, namespace: &str, source: &Path) -> String;
}

/// Appends a short stable hash of the source path, keeping namespaces of
/// same-named stylesheets apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedNamespace;

impl NamespaceResolver for HashedNamespace {
    fn resolve(&self, namespace: &str, source: &Path) -> String {
        let mut hasher = FxHasher::default();
        source.to_string_lossy().hash(&mut hasher);
        format!("{namespace}{}", to_base36(hasher.finish() as u32))
    }
}

/// Uses the declared namespace verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNamespace;

impl NamespaceResolver for IdentityNamespace {
    fn resolve(&self, namespace: &str, _source: &Path) -> String {
        namespace.to_string()
    }
}

/// Namespace used when a stylesheet declares none: its file name without
/// the stylesheet extension.
pub fn default_namespace(source: &Path) -> String {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(STYLABLE_EXT)
        .or_else(|| file_name.strip_suffix(CSS_EXT))
        .unwrap_or(&file_name);
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    match cleaned.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '-' => format!("s{cleaned}"),
        Some(_) => cleaned,
        None => "s".to_string(),
    }
}

/// Whether a declared namespace can be used as a CSS identifier prefix.
pub fn is_valid_namespace(namespace: &str) -> bool {
    let mut chars = namespace.chars();
    match chars.next() {
        Some(first) if unicode_ident::is_xid_start(first) || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| unicode_ident::is_xid_continue(c) || c == '-')
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
