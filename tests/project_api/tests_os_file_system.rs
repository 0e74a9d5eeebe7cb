#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::rc::Rc;

use stylable::js::NoJsModules;
use stylable::project::OsFileSystem;
use stylable::{Stylable, StylableConfig};

#[test]
fn test_compile_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("base.st.css"), ":vars { gap: 3px; }\n.root {}").unwrap();
    fs::write(
        dir.path().join("entry.st.css"),
        r#":import { -st-from: "./base.st.css"; -st-default: Base; -st-named: gap; }
           .a { -st-extends: Base; margin: value(gap); }"#,
    )
    .unwrap();

    let stylable = Stylable::new(StylableConfig::new(dir.path()), Rc::new(OsFileSystem), Rc::new(NoJsModules));
    let results = stylable.transform(dir.path().join("entry.st.css")).unwrap();
    assert!(results.diagnostics.is_empty(), "{:?}", results.diagnostics);

    let classes: Vec<_> = results.exports.classes["a"].split(' ').map(str::to_string).collect();
    assert_eq!(classes.len(), 2);
    assert!(classes[0].starts_with("entry") && classes[0].ends_with("--a"));
    assert!(classes[1].starts_with("base") && classes[1].ends_with("--root"));
    assert!(results.css().contains("margin: 3px;"));
}

#[test]
fn test_invalidate_reprocesses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entry.st.css");
    fs::write(&path, ".a {}").unwrap();

    let stylable = Stylable::new(StylableConfig::default(), Rc::new(OsFileSystem), Rc::new(NoJsModules));
    let first = stylable.process(&path).unwrap();
    assert!(first.class("a").is_some());

    fs::write(&path, ".b {}").unwrap();
    assert!(stylable.invalidate(&path));
    let second = stylable.process(&path).unwrap();
    assert!(second.class("b").is_some());
}
