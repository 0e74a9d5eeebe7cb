//! The output is plain CSS.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rstest::rstest;
use stylable::css::{Node, parse};

use crate::helpers::project_helpers::*;
use crate::helpers::stylesheet_fixtures::*;

fn assert_plain_css(css: &str) {
    let reparsed = parse(css);
    assert!(reparsed.errors.is_empty(), "{:?}\n{css}", reparsed.errors);
    for rule in reparsed.content.rules() {
        assert!(!rule.selector.starts_with(":import") && !rule.selector.starts_with(":vars"));
    }
    reparsed.content.walk_decls(&mut |decl| {
        assert!(!decl.prop.starts_with("-st-"), "directive left: {}", decl.prop);
        assert!(!decl.value.contains("value("), "value() left: {}", decl.value);
    });
    for node in &reparsed.content.nodes {
        if let Node::AtRule(at_rule) = node {
            assert!(!at_rule.name.starts_with("st-"), "at-rule left: @{}", at_rule.name);
        }
    }
}

#[rstest]
#[case(BUTTON)]
#[case(":vars { a: 1px; }\n@media (min-width: value(a)) { .x { width: value(a); } }")]
#[case(".mix { color: red; }\n.a { -st-mixin: mix; -st-states: on; }\n.a:on {}")]
#[case("@st-scope .root { .part { -st-global: \".g\"; } }")]
#[case("@st-global-custom-property --x;\n@custom-selector :--h .a;\n:--h { color: var(--x); }")]
fn test_output_has_no_directives(#[case] source: &str) {
    let results = compile(source);
    assert_plain_css(&results.css());
}

#[test]
fn test_page_output_is_plain_css() {
    let project = TestProject::new(&[("/page.st.css", PAGE), ("/button.st.css", BUTTON)]);
    let results = project.transform("/page.st.css");
    assert_plain_css(&results.css());

    let again = project.stylable.transform_source(&results.css(), "/compiled.st.css").unwrap();
    assert_plain_css(&again.css());
}

#[test]
fn test_printed_output() {
    let results = compile(":vars { c: red; }\n.root { color: value(c); }\n.a:hover { color: blue !important; }");
    assert_eq!(
        results.css(),
        ".entry--root {\n    color: red;\n}\n.entry--a:hover {\n    color: blue !important;\n}"
    );
}
