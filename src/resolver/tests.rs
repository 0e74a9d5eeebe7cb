#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::js::{JsModule, JsModuleRegistry};
use crate::processor::{IdentityNamespace, Processor};
use crate::project::{DefaultRequestResolver, FileSystem, MemoryFileSystem};

fn resolver(files: &[(&str, &str)]) -> (Resolver, Rc<JsModuleRegistry>) {
    let fs: Rc<dyn FileSystem> = Rc::new(MemoryFileSystem::with_files(files.iter().copied()));
    let file_processor = FileProcessor::new(
        fs.clone(),
        Processor::new(Rc::new(IdentityNamespace)),
        Rc::new(DefaultRequestResolver::new(fs)),
    );
    let registry = Rc::new(JsModuleRegistry::new());
    (Resolver::new(Rc::new(file_processor), registry.clone()), registry)
}

fn meta(resolver: &Resolver, path: &str) -> Rc<Meta> {
    resolver.file_processor().process(Path::new(path)).unwrap()
}

fn chain_names(chain: &[CssResolve]) -> Vec<String> {
    chain
        .iter()
        .map(|entry| format!("{}:{}", entry.meta.namespace, entry.name()))
        .collect()
}

#[test]
fn test_resolve_default_import_to_root() {
    let (resolver, _) = resolver(&[
        ("/entry.st.css", r#":import { -st-from: "./button.st.css"; -st-default: Button; } Button {}"#),
        ("/button.st.css", ".root {}"),
    ]);
    let entry = meta(&resolver, "/entry.st.css");
    let resolved = resolver.deep_resolve_name(&entry, "Button").unwrap().unwrap();
    let css = resolved.as_css().unwrap();
    assert_eq!(css.meta.namespace, "button");
    assert_eq!(css.name(), "root");
}

#[test]
fn test_deep_resolve_follows_reexports() {
    let (resolver, _) = resolver(&[
        ("/entry.st.css", r#":import { -st-from: "./index.st.css"; -st-named: Label; } .Label {}"#),
        ("/index.st.css", r#":import { -st-from: "./label.st.css"; -st-default: Label; } .Label {}"#),
        ("/label.st.css", ".root { color: red; }"),
    ]);
    let entry = meta(&resolver, "/entry.st.css");
    let symbol = entry.symbol("Label").unwrap();

    let one_hop = resolver.resolve(&entry, symbol).unwrap();
    assert_eq!(one_hop.as_css().unwrap().meta.namespace, "index");

    let deep = resolver.deep_resolve(&entry, symbol).unwrap();
    let css = deep.as_css().unwrap();
    assert_eq!(css.meta.namespace, "label");
    assert_eq!(css.scoped_name(), "label--root");
}

#[test]
fn test_unknown_file_and_symbol() {
    let (resolver, _) = resolver(&[
        (
            "/entry.st.css",
            r#":import { -st-from: "./missing.st.css"; -st-named: a; }
               :import { -st-from: "./other.st.css"; -st-named: b; }"#,
        ),
        ("/other.st.css", ".c {}"),
    ]);
    let entry = meta(&resolver, "/entry.st.css");
    let missing = resolver.deep_resolve_name(&entry, "a").unwrap().unwrap_err();
    assert_eq!(missing, ResolveError::UnknownFile("./missing.st.css".into()));
    assert_eq!(
        missing.to_string(),
        r#"cannot resolve imported file: "./missing.st.css""#
    );
    let unknown = resolver.deep_resolve_name(&entry, "b").unwrap().unwrap_err();
    assert!(matches!(unknown, ResolveError::UnknownSymbol { ref name, .. } if name == "b"));
}

#[test]
fn test_circular_alias_is_reported() {
    let (resolver, _) = resolver(&[
        ("/a.st.css", r#":import { -st-from: "./b.st.css"; -st-named: x; }"#),
        ("/b.st.css", r#":import { -st-from: "./a.st.css"; -st-named: x; }"#),
    ]);
    let a = meta(&resolver, "/a.st.css");
    let err = resolver.deep_resolve_name(&a, "x").unwrap().unwrap_err();
    let ResolveError::CircularAlias(chain) = err else {
        panic!("expected circular alias");
    };
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0], chain[2]);
}

#[test]
fn test_js_import_resolves_export() {
    let (resolver, registry) = resolver(&[(
        "/entry.st.css",
        r#":import { -st-from: "./mixins.js"; -st-default: mix; -st-named: other; }"#,
    )]);
    registry.register(
        "/mixins.js",
        JsModule::new().with_default(crate::js::JsExport::function(|_| Ok(json!({})))),
    );
    let entry = meta(&resolver, "/entry.st.css");
    let resolved = resolver.deep_resolve_name(&entry, "mix").unwrap().unwrap();
    let js = resolved.as_js().unwrap();
    assert_eq!(js.name, "default");
    assert!(js.export.as_function().is_some());
    assert!(resolver.deep_resolve_name(&entry, "other").unwrap().is_err());
}

#[test]
fn test_extends_chain_has_one_entry_per_level() {
    let (resolver, _) = resolver(&[
        (
            "/entry.st.css",
            r#":import { -st-from: "./mid.st.css"; -st-default: Mid; }
               .a { -st-extends: Mid; }"#,
        ),
        (
            "/mid.st.css",
            r#":import { -st-from: "./base.st.css"; -st-default: Base; }
               .root { -st-extends: Base; }"#,
        ),
        ("/base.st.css", ".root {}"),
    ]);
    let entry = meta(&resolver, "/entry.st.css");
    let mut diagnostics = Diagnostics::new();
    let chain = resolver.resolve_extends(&entry, "a", false, &mut diagnostics);
    assert_eq!(chain_names(&chain), ["entry:a", "mid:root", "base:root"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_local_extends_chain() {
    let (resolver, _) = resolver(&[(
        "/entry.st.css",
        ".base {} .mid { -st-extends: base; } .top { -st-extends: mid; }",
    )]);
    let entry = meta(&resolver, "/entry.st.css");
    let mut diagnostics = Diagnostics::new();
    let chain = resolver.resolve_extends(&entry, "top", false, &mut diagnostics);
    assert_eq!(chain_names(&chain), ["entry:top", "entry:mid", "entry:base"]);
}

#[test]
fn test_element_chain_starts_with_element() {
    let (resolver, _) = resolver(&[
        ("/entry.st.css", r#":import { -st-from: "./comp.st.css"; -st-default: Comp; } Comp {}"#),
        ("/comp.st.css", ".root {}"),
    ]);
    let entry = meta(&resolver, "/entry.st.css");
    let mut diagnostics = Diagnostics::new();
    let chain = resolver.resolve_extends(&entry, "Comp", true, &mut diagnostics);
    assert_eq!(chain_names(&chain), ["entry:Comp", "comp:root"]);
    assert!(chain[0].is_alias());
    assert!(!chain[1].is_alias());
}

#[test]
fn test_circular_extends_terminates() {
    let (resolver, _) = resolver(&[(
        "/entry.st.css",
        ".a { -st-extends: b; } .b { -st-extends: a; }",
    )]);
    let entry = meta(&resolver, "/entry.st.css");
    let mut diagnostics = Diagnostics::new();
    let chain = resolver.resolve_extends(&entry, "a", false, &mut diagnostics);
    assert_eq!(chain_names(&chain), ["entry:a", "entry:b"]);
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn test_extends_js_is_rejected() {
    let (resolver, registry) = resolver(&[(
        "/entry.st.css",
        r#":import { -st-from: "./x.js"; -st-default: X; } .a { -st-extends: X; }"#,
    )]);
    registry.register("/x.js", JsModule::new().with_default(crate::js::JsExport::Value(json!(1))));
    let entry = meta(&resolver, "/entry.st.css");
    let mut diagnostics = Diagnostics::new();
    let chain = resolver.resolve_extends(&entry, "a", false, &mut diagnostics);
    assert_eq!(chain.len(), 1);
    assert!(diagnostics.contains_message(&messages::cannot_extend_js()));
}

#[test]
fn test_package_import() {
    let (resolver, _) = resolver(&[
        ("/src/entry.st.css", r#":import { -st-from: "lib/index.st.css"; -st-named: btn; } .btn {}"#),
        ("/node_modules/lib/index.st.css", ".btn {}"),
    ]);
    let entry = meta(&resolver, "/src/entry.st.css");
    let resolved = resolver.deep_resolve_name(&entry, "btn").unwrap().unwrap();
    assert_eq!(resolved.as_css().unwrap().meta.source, Path::new("/node_modules/lib/index.st.css"));
}
