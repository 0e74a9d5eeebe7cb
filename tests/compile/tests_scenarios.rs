//! Composition scenarios across stylesheets.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use stylable::diagnostics::messages;
use stylable::Diagnostics;

use crate::helpers::project_helpers::*;
use crate::helpers::stylesheet_fixtures::*;

// =============================================================================
// EXTENDS
// =============================================================================

#[test]
fn test_extends_chain_has_n_plus_one_entries() {
    let project = TestProject::new(&[
        (
            "/entry.st.css",
            r#":import { -st-from: "./one.st.css"; -st-default: One; }
               .a { -st-extends: One; }"#,
        ),
        (
            "/one.st.css",
            r#":import { -st-from: "./two.st.css"; -st-default: Two; }
               .root { -st-extends: Two; }"#,
        ),
        (
            "/two.st.css",
            r#":import { -st-from: "./three.st.css"; -st-default: Three; }
               .root { -st-extends: Three; }"#,
        ),
        ("/three.st.css", ".root {}"),
    ]);
    let meta = project.stylable.process("/entry.st.css").unwrap();
    let mut diagnostics = Diagnostics::new();
    let chain = project
        .stylable
        .resolver()
        .resolve_extends(&meta, "a", false, &mut diagnostics);
    let namespaces: Vec<_> = chain.iter().map(|entry| entry.meta.namespace.as_str()).collect();
    assert_eq!(namespaces, ["entry", "one", "two", "three"]);
    assert!(diagnostics.is_empty());

    let results = project.transform("/entry.st.css");
    assert_eq!(selectors(&results), [".entry--a.one--root.two--root.three--root"]);
}

#[test]
fn test_component_page() {
    let project = TestProject::new(&[("/page.st.css", PAGE), ("/button.st.css", BUTTON)]);
    let results = project.transform("/page.st.css");
    assert_eq!(
        selectors(&results),
        [
            ".page--root",
            ".page--cta.button--root",
            ".page--cta.button--root[data-button-disabled]",
            ".page--cta.button--root .button--label",
            r#".button--root[data-button-size="large"]"#,
        ]
    );
    assert_eq!(
        decls(&results, ".page--cta.button--root"),
        pairs(&[("background", "red")])
    );
    assert!(results.diagnostics.is_empty(), "{:?}", messages(&results));
}

#[test]
fn test_state_uses_namespace_of_declaring_stylesheet() {
    let project = TestProject::new(&[
        (
            "/entry.st.css",
            r#":import { -st-from: "./inner.st.css"; -st-default: Inner; }
               .my-class { -st-extends: Inner; }
               .my-class:my-state {}"#,
        ),
        ("/inner.st.css", ".root { -st-states: my-state; }"),
    ]);
    let results = project.transform("/entry.st.css");
    assert!(
        selectors(&results).contains(&".entry--my-class.inner--root[data-inner-my-state]".to_string()),
        "{:?}",
        selectors(&results)
    );
}

// =============================================================================
// MIXINS & VARIABLES
// =============================================================================

#[test]
fn test_partial_mixin_without_arguments_emits_nothing() {
    let results = compile(":vars { v1: red; }\n.mix { propA: value(v1); }\n.a { -st-partial-mixin: mix(); }");
    assert!(decls(&results, ".entry--a").is_empty());
    assert!(messages(&results).contains(&messages::partial_mixin_missing_arguments("mix")));
}

#[test]
fn test_cyclic_vars_keep_literal() {
    let results = compile(CYCLIC_VARS);
    assert_eq!(decls(&results, ".entry--c"), pairs(&[("x", "value(a)")]));
}

#[test]
fn test_circular_mixins_emit_non_cyclic_content() {
    let results = compile(CIRCULAR_MIXINS);
    assert_eq!(
        decls(&results, ".entry--a"),
        pairs(&[("prop", "green"), ("prop", "green")])
    );
    assert_eq!(decls(&results, ".entry--b"), pairs(&[("prop", "green")]));

    let circular: Vec<_> = results
        .diagnostics
        .iter()
        .filter(|d| d.message.starts_with("circular mixin found"))
        .collect();
    assert_eq!(circular.len(), 2);
    assert_ne!(circular[0].span, circular[1].span);
}

#[test]
fn test_mixin_from_package() {
    let project = TestProject::new(&[
        (
            "/src/entry.st.css",
            r#":import { -st-from: "theme/mixins.st.css"; -st-named: spacing; }
               .a { -st-mixin: spacing(gap 4px); }"#,
        ),
        (
            "/node_modules/theme/mixins.st.css",
            ":vars { gap: 8px; }\n.spacing { margin: value(gap); }\n.spacing:hover { padding: value(gap); }",
        ),
    ]);
    let results = project.transform("/src/entry.st.css");
    assert_eq!(decls(&results, ".entry--a"), pairs(&[("margin", "4px")]));
    assert_eq!(decls(&results, ".entry--a:hover"), pairs(&[("padding", "4px")]));
}

#[test]
fn test_theme_import_overrides() {
    let project = TestProject::new(&[
        (
            "/entry.st.css",
            r#":import {
                   -st-from: "./theme.st.css";
                   -st-theme: true;
                   -st-named: accent;
                   base: green;
               }
               .a { color: value(accent); }"#,
        ),
        ("/theme.st.css", ":vars { base: red; accent: value(base); }"),
    ]);
    let results = project.transform("/entry.st.css");
    assert_eq!(decls(&results, ".entry--a"), pairs(&[("color", "green")]));
}

// =============================================================================
// GLOBALS
// =============================================================================

#[test]
fn test_globals_are_unscoped_and_collected_once() {
    let results = compile(":global(.x) .a {}\n:global(.x) .b {}\n.c :global(.y) {}");
    assert_eq!(
        selectors(&results),
        [".x .entry--a", ".x .entry--b", ".entry--c .y"]
    );
    assert_eq!(results.globals.iter().collect::<Vec<_>>(), [".x", ".y"]);
}

#[test]
fn test_process_is_cached() {
    let project = TestProject::new(&[("/entry.st.css", ".a {}")]);
    let first = project.stylable.process("/entry.st.css").unwrap();
    let second = project.stylable.process(Path::new("/entry.st.css")).unwrap();
    assert!(std::rc::Rc::ptr_eq(&first, &second));

    project.fs.write("/entry.st.css", ".b {}");
    let third = project.stylable.process("/entry.st.css").unwrap();
    assert!(third.class("b").is_some());
}
