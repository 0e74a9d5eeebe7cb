//! Domain constants: file extensions and directive names.

/// Extension of Stylable stylesheets.
pub const STYLABLE_EXT: &str = ".st.css";
/// Extension of plain stylesheets (also processed, without a declared namespace).
pub const CSS_EXT: &str = ".css";

/// Name of the implicit root class of every stylesheet.
pub const ROOT_CLASS: &str = "root";

// ============================================================================
// RULE DIRECTIVES
// ============================================================================

pub const IMPORT_RULE: &str = ":import";
pub const VARS_RULE: &str = ":vars";

// ============================================================================
// DECLARATION DIRECTIVES
// ============================================================================

pub const ST_DIRECTIVE_PREFIX: &str = "-st-";
pub const FROM: &str = "-st-from";
pub const DEFAULT: &str = "-st-default";
pub const NAMED: &str = "-st-named";
pub const THEME: &str = "-st-theme";
pub const EXTENDS: &str = "-st-extends";
pub const STATES: &str = "-st-states";
pub const MIXIN: &str = "-st-mixin";
pub const PARTIAL_MIXIN: &str = "-st-partial-mixin";
pub const GLOBAL: &str = "-st-global";
pub const ROOT: &str = "-st-root";

// ============================================================================
// AT-RULE DIRECTIVES
// ============================================================================

pub const NAMESPACE_AT_RULE: &str = "namespace";
pub const ST_NAMESPACE_AT_RULE: &str = "st-namespace";
pub const ST_IMPORT_AT_RULE: &str = "st-import";
pub const ST_SCOPE_AT_RULE: &str = "st-scope";
pub const CUSTOM_SELECTOR_AT_RULE: &str = "custom-selector";
pub const GLOBAL_CUSTOM_PROPERTY_AT_RULE: &str = "st-global-custom-property";
pub const KEYFRAMES_AT_RULE: &str = "keyframes";

// ============================================================================
// FUNCTIONS
// ============================================================================

pub const VALUE_FUNCTION: &str = "value";
pub const VAR_FUNCTION: &str = "var";
pub const GLOBAL_PSEUDO: &str = "global";

/// Native pseudo-classes that pass through the transformer untouched.
pub const NATIVE_PSEUDO_CLASSES: &[&str] = &[
    "active",
    "any-link",
    "blank",
    "checked",
    "current",
    "default",
    "defined",
    "dir",
    "disabled",
    "drop",
    "empty",
    "enabled",
    "first",
    "first-child",
    "first-of-type",
    "focus",
    "focus-visible",
    "focus-within",
    "fullscreen",
    "future",
    "has",
    "host",
    "host-context",
    "hover",
    "in-range",
    "indeterminate",
    "invalid",
    "is",
    "lang",
    "last-child",
    "last-of-type",
    "left",
    "link",
    "local-link",
    "matches",
    "not",
    "nth-child",
    "nth-col",
    "nth-last-child",
    "nth-last-col",
    "nth-last-of-type",
    "nth-of-type",
    "only-child",
    "only-of-type",
    "optional",
    "out-of-range",
    "past",
    "placeholder-shown",
    "read-only",
    "read-write",
    "required",
    "right",
    "root",
    "scope",
    "target",
    "target-within",
    "user-invalid",
    "valid",
    "visited",
    "where",
];

/// Native pseudo-classes whose argument is itself a selector list.
pub const SELECTOR_ARGUMENT_PSEUDO_CLASSES: &[&str] = &["not", "is", "where", "has", "matches"];

/// Native pseudo-elements that pass through the transformer untouched.
pub const NATIVE_PSEUDO_ELEMENTS: &[&str] = &[
    "after",
    "backdrop",
    "before",
    "cue",
    "file-selector-button",
    "first-letter",
    "first-line",
    "grammar-error",
    "marker",
    "part",
    "placeholder",
    "selection",
    "slotted",
    "spelling-error",
];

pub fn is_native_pseudo_class(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    NATIVE_PSEUDO_CLASSES.contains(&name.as_str())
        || name.starts_with("-webkit-")
        || name.starts_with("-moz-")
}

pub fn is_native_pseudo_element(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    NATIVE_PSEUDO_ELEMENTS.contains(&name.as_str())
        || name.starts_with("-webkit-")
        || name.starts_with("-moz-")
        || name.starts_with("-ms-")
}
