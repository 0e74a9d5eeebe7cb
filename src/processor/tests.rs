#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::*;

fn process(source: &str) -> Meta {
    Processor::new(Rc::new(IdentityNamespace)).process_source(source, Path::new("/src/entry.st.css"))
}

fn messages_of(meta: &Meta) -> Vec<String> {
    meta.diagnostics.iter().map(|d| d.message.to_string()).collect()
}

// ============================================================================
// NAMESPACE
// ============================================================================

#[test]
fn test_namespace_defaults_to_file_stem() {
    assert_eq!(process(".a {}").namespace, "entry");
}

#[test]
fn test_namespace_declared() {
    assert_eq!(process("@namespace \"Comp\";").namespace, "Comp");
    assert_eq!(process("@st-namespace \"Other\";").namespace, "Other");
}

#[test]
fn test_namespace_invalid() {
    let meta = process("@namespace \"1 x\";");
    assert_eq!(meta.namespace, "entry");
    assert_eq!(messages_of(&meta), vec![r#"invalid namespace "1 x""#]);
}

#[test]
fn test_hashed_namespace_by_default() {
    let meta = Processor::default().process_source(".a {}", Path::new("/src/entry.st.css"));
    assert!(meta.namespace.starts_with("entry"));
    assert_ne!(meta.namespace, "entry");
}

// ============================================================================
// CLASSES AND ELEMENTS
// ============================================================================

#[test]
fn test_root_class_always_present() {
    let meta = process("");
    let root = meta.root_class().unwrap();
    assert!(root.root);
    assert_eq!(meta.root, "root");
}

#[test]
fn test_classes_collected_from_all_selectors() {
    let meta = process(".a .b:hover, .c {} .d:not(.e) {} :global(.g) {}");
    let names: Vec<_> = meta.classes().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["root", "a", "b", "c", "d", "e"]);
}

#[test]
fn test_capitalized_types_are_elements() {
    let meta = process("Button div {}");
    assert!(meta.element("Button").is_some());
    assert!(meta.element("div").is_none());
}

#[test]
fn test_class_directives() {
    let meta = process(
        r#"
.base {}
.a {
    -st-extends: base;
    -st-states: on, size(enum(s, l)) s;
    -st-global: ".x .y";
}
"#,
    );
    let a = meta.class("a").unwrap();
    assert_eq!(a.extends.as_deref(), Some("base"));
    let states = a.states.as_ref().unwrap();
    assert_eq!(states["on"], StateDef::Boolean);
    assert!(matches!(&states["size"], StateDef::Typed(t) if t.default_value.as_deref() == Some("s")));
    assert_eq!(a.global.as_deref(), Some(".x .y"));
    assert!(meta.diagnostics.is_empty());
}

#[test]
fn test_states_on_element_selector() {
    let meta = process("Button { -st-states: on; }");
    assert_eq!(
        messages_of(&meta),
        vec!["cannot define pseudo states inside element selectors"]
    );
}

#[test]
fn test_states_on_complex_selector() {
    let meta = process(".a .b { -st-states: on; }");
    assert_eq!(
        messages_of(&meta),
        vec!["cannot define pseudo states inside complex selectors"]
    );
}

#[test]
fn test_states_redefined_keeps_first() {
    let meta = process(".a { -st-states: first; } .a { -st-states: second; }");
    let states = meta.class("a").unwrap().states.as_ref().unwrap();
    assert!(states.contains_key("first"));
    assert!(!states.contains_key("second"));
    assert_eq!(
        messages_of(&meta),
        vec![r#"override "-st-states" on typed rule "a""#]
    );
}

#[test]
fn test_extends_unknown_symbol() {
    let meta = process(".a { -st-extends: Missing; }");
    assert_eq!(
        messages_of(&meta),
        vec![r#"cannot extend unknown symbol "Missing""#]
    );
}

#[test]
fn test_extends_string_value() {
    let meta = process(".a { -st-extends: \"b\"; }");
    assert_eq!(
        messages_of(&meta),
        vec!["value can not be a string (remove quotes?)"]
    );
    assert!(meta.class("a").unwrap().extends.is_none());
}

#[test]
fn test_mixin_string_value() {
    let meta = process(".a { -st-mixin: \"b\"; }");
    assert_eq!(
        messages_of(&meta),
        vec!["value can not be a string (remove quotes?)"]
    );
}

// ============================================================================
// IMPORTS
// ============================================================================

#[test]
fn test_import_symbols_and_aliases() {
    let meta = process(
        r#"
:import {
    -st-from: "./comp.st.css";
    -st-default: Comp;
    -st-named: part, color1 as c1;
}
.part {}
Comp {}
"#,
    );
    assert_eq!(meta.imports.len(), 1);
    assert_eq!(meta.imports[0].from, PathBuf::from("/src/comp.st.css"));

    let c1 = meta.import_symbol("c1").unwrap();
    assert_eq!(c1.import_name, "color1");
    assert_eq!(c1.kind, ImportKind::Named);

    let part = meta.class("part").unwrap();
    assert_eq!(part.alias.as_ref().unwrap().import_name, "part");

    let element = meta.element("Comp").unwrap();
    assert_eq!(element.alias.as_ref().unwrap().kind, ImportKind::Default);
}

#[test]
fn test_st_import_at_rule() {
    let meta = process(r#"@st-import Comp, [a as b] from "../lib/comp.st.css";"#);
    assert_eq!(meta.imports[0].from, PathBuf::from("/lib/comp.st.css"));
    assert!(meta.import_symbol("Comp").is_some());
    assert_eq!(meta.import_symbol("b").unwrap().import_name, "a");
}

#[test]
fn test_import_theme_and_overrides() {
    let meta = process(
        r#":import { -st-from: "./theme.st.css"; -st-theme: true; -st-named: color1; color1: red; }"#,
    );
    let import = &meta.imports[0];
    assert!(import.theme);
    assert_eq!(import.overrides["color1"], "red");
}

#[test]
fn test_import_nested_is_error() {
    let meta = process(r#"@media print { :import { -st-from: "./a.st.css"; } }"#);
    assert!(meta.imports.is_empty());
    assert_eq!(
        messages_of(&meta),
        vec![r#"":import" must be a top-level rule"#]
    );
}

// ============================================================================
// VARS, CUSTOM PROPERTIES, KEYFRAMES, CUSTOM SELECTORS
// ============================================================================

#[test]
fn test_vars_kept_unevaluated() {
    let meta = process(":vars { a: value(b); b: red; }");
    assert_eq!(meta.var("a").unwrap().text, "value(b)");
    assert_eq!(meta.vars().count(), 2);
}

#[test]
fn test_redeclare_symbol() {
    let meta = process(":vars { a: red; a: blue; }");
    assert_eq!(meta.var("a").unwrap().text, "blue");
    assert_eq!(messages_of(&meta), vec![r#"redeclare symbol "a""#]);
}

#[test]
fn test_css_vars() {
    let meta = process(
        "@st-global-custom-property --g; .a { --x: 1; color: var(--y, var(--z)); } .b { --g: 2; }",
    );
    let names: Vec<_> = meta.css_vars().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["--g", "--x", "--y", "--z"]);
    assert!(meta.css_var("--g").unwrap().global);
    assert!(!meta.css_var("--x").unwrap().global);
}

#[test]
fn test_invalid_global_custom_property() {
    let meta = process("@st-global-custom-property x;");
    assert_eq!(
        messages_of(&meta),
        vec![r#"custom property "x" must start with "--""#]
    );
}

#[test]
fn test_keyframes() {
    let meta = process("@keyframes slide {} @keyframes :global(fade) {}");
    assert!(!meta.keyframes["slide"].global);
    assert!(meta.keyframes["fade"].global);
}

#[test]
fn test_custom_selector() {
    let meta = process("@custom-selector :--icon .root > .icon;");
    assert_eq!(meta.custom_selectors["icon"], ".root > .icon");
    assert!(meta.class("icon").is_some());
}

#[test]
fn test_st_scope_registers_classes() {
    let meta = process("@st-scope .scope { .inner {} }");
    assert!(meta.class("scope").is_some());
    assert!(meta.class("inner").is_some());
}

#[test]
fn test_parse_errors_become_diagnostics() {
    let meta = process(".a { color: red;");
    assert_eq!(meta.diagnostics.error_count(), 1);
    assert!(meta.class("a").is_some());
}
