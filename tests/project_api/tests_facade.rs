#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::rc::Rc;

use stylable::js::NoJsModules;
use stylable::processor::IdentityNamespace;
use stylable::project::{MemoryFileSystem, RequestResolver};
use stylable::{Stylable, StylableConfig, StylableError};

use crate::helpers::project_helpers::*;

#[test]
fn test_relative_entry_is_rejected() {
    let project = TestProject::new(&[("/entry.st.css", ".a {}")]);
    let err = project.stylable.transform("entry.st.css").unwrap_err();
    assert!(matches!(err, StylableError::RelativePath(ref path) if path == Path::new("entry.st.css")));
    assert_eq!(err.to_string(), "entry path must be absolute: entry.st.css");
}

#[test]
fn test_missing_entry_is_not_found() {
    let project = TestProject::new(&[]);
    let err = project.stylable.transform("/missing.st.css").unwrap_err();
    assert!(matches!(err, StylableError::NotFound(_)));
}

#[test]
fn test_transform_source_sees_project_files() {
    let project = TestProject::new(&[("/lib/base.st.css", ":vars { c: teal; }")]);
    let results = project
        .stylable
        .transform_source(
            r#":import { -st-from: "./lib/base.st.css"; -st-named: c; } .a { color: value(c); }"#,
            "/virtual.st.css",
        )
        .unwrap();
    assert_eq!(decls(&results, ".virtual--a"), pairs(&[("color", "teal")]));
}

struct AliasResolver;

impl RequestResolver for AliasResolver {
    fn resolve(&self, _context: &Path, request: &str) -> Option<PathBuf> {
        request
            .strip_prefix("@ui/")
            .map(|rest| PathBuf::from("/packages/ui").join(rest))
    }
}

#[test]
fn test_custom_request_resolver() {
    let fs = Rc::new(MemoryFileSystem::with_files([
        (
            "/app/entry.st.css",
            r#":import { -st-from: "@ui/button.st.css"; -st-default: Button; } Button {}"#,
        ),
        ("/packages/ui/button.st.css", ".root {}"),
    ]));
    let config = StylableConfig::new("/app")
        .with_namespace_resolver(Rc::new(IdentityNamespace))
        .with_request_resolver(Rc::new(AliasResolver));
    let stylable = Stylable::new(config, fs, Rc::new(NoJsModules));
    let results = stylable.transform("/app/entry.st.css").unwrap();
    assert_eq!(selectors(&results), [".button--root"]);
    assert_eq!(stylable.config().root_dir(), Path::new("/app"));
}

#[test]
fn test_hashed_namespaces_differ_per_path() {
    let fs = Rc::new(MemoryFileSystem::with_files([
        ("/a/button.st.css", ".root {}"),
        ("/b/button.st.css", ".root {}"),
    ]));
    let stylable = Stylable::new(StylableConfig::default(), fs, Rc::new(NoJsModules));
    let a = stylable.process("/a/button.st.css").unwrap();
    let b = stylable.process("/b/button.st.css").unwrap();
    assert!(a.namespace.starts_with("button"));
    assert_ne!(a.namespace, b.namespace);
}
