//! Exports of compiled stylesheets.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use stylable::css::Root;

use crate::helpers::project_helpers::*;
use crate::helpers::stylesheet_fixtures::*;

fn output_classes(root: &Root) -> String {
    root.rules()
        .iter()
        .map(|rule| rule.selector.clone())
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_exported_classes_appear_in_output() {
    let project = TestProject::new(&[("/page.st.css", PAGE), ("/button.st.css", BUTTON)]);
    let results = project.transform("/page.st.css");
    let output = output_classes(&results.output_ast);
    for (name, classes) in &results.exports.classes {
        for class in classes.split(' ') {
            assert!(
                output.contains(&format!(".{class}")),
                "{name} exported as {class} which is not in {output}"
            );
        }
    }
}

#[test]
fn test_exported_vars_are_resolved() {
    let project = TestProject::new(&[("/button.st.css", BUTTON)]);
    let results = project.transform("/button.st.css");
    assert_eq!(results.exports.st_vars["size"], "12px");
    assert_eq!(decls(&results, ".button--root"), pairs(&[("color", "red")]));
    assert_eq!(decls(&results, ".button--label"), pairs(&[("font-size", "12px")]));
}

#[test]
fn test_exports_serialize() {
    let results = compile(
        ":vars { gap: 2px; }\n.root { --accent: red; }\n.item { animation: pop 1s; }\n@keyframes pop {}",
    );
    assert_eq!(
        results.exports.to_json(),
        json!({
            "classes": { "root": "entry--root", "item": "entry--item" },
            "vars": { "--accent": "--entry-accent" },
            "stVars": { "gap": "2px" },
            "keyframes": { "pop": "entry--pop" },
        })
    );
    assert_eq!(decls(&results, ".entry--item"), pairs(&[("animation", "entry--pop 1s")]));
}
