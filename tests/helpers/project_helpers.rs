//! In-memory projects for compiling stylesheets end to end.

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::rc::Rc;

use stylable::js::JsModuleRegistry;
use stylable::processor::IdentityNamespace;
use stylable::project::MemoryFileSystem;
use stylable::{Stylable, StylableConfig, StylableResults};

/// A project whose files live in memory. Namespaces are the file stems.
pub struct TestProject {
    pub fs: Rc<MemoryFileSystem>,
    pub js: Rc<JsModuleRegistry>,
    pub stylable: Stylable,
}

impl TestProject {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let fs = Rc::new(MemoryFileSystem::with_files(files.iter().copied()));
        let js = Rc::new(JsModuleRegistry::new());
        let config = StylableConfig::new("/").with_namespace_resolver(Rc::new(IdentityNamespace));
        let stylable = Stylable::new(config, fs.clone(), js.clone());
        Self { fs, js, stylable }
    }

    pub fn transform(&self, path: &str) -> StylableResults {
        self.stylable.transform(path).unwrap()
    }
}

/// Compile a single `/entry.st.css`.
pub fn compile(source: &str) -> StylableResults {
    TestProject::new(&[("/entry.st.css", source)]).transform("/entry.st.css")
}

pub fn selectors(results: &StylableResults) -> Vec<String> {
    results
        .output_ast
        .rules()
        .iter()
        .map(|rule| rule.selector.clone())
        .collect()
}

pub fn decls(results: &StylableResults, selector: &str) -> Vec<(String, String)> {
    let rules = results.output_ast.rules();
    let rule = rules
        .iter()
        .find(|rule| rule.selector == selector)
        .unwrap_or_else(|| panic!("no rule {selector:?} in {:?}", selectors(results)));
    rule.decls()
        .map(|decl| (decl.prop.clone(), decl.value.clone()))
        .collect()
}

pub fn messages(results: &StylableResults) -> Vec<String> {
    results
        .diagnostics
        .iter()
        .map(|d| d.message.to_string())
        .collect()
}

pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}
