//! Mutable stylesheet tree.
//!
//! `Root → Rule | AtRule → Declaration | Comment`, each node optionally carrying
//! its source span. The processor reads the tree, the transformer clones and
//! rewrites it, and [`Root::to_css`] prints it back out.

use crate::base::Span;

const INDENT: &str = "    ";

// ============================================================================
// NODES
// ============================================================================

/// Top-level node of a parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Decl(Declaration),
    Comment(Comment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the leading `@`.
    pub name: String,
    pub params: String,
    /// `None` for statement at-rules such as `@namespace "x";`.
    pub nodes: Option<Vec<Node>>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub important: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Option<Span>,
}

// ============================================================================
// CONSTRUCTORS & ACCESSORS
// ============================================================================

impl Root {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Print the tree as normalized CSS.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        write_nodes(&mut out, &self.nodes, 0);
        out
    }

    /// Every rule in the tree, depth first, including rules nested in at-rules.
    pub fn rules(&self) -> Vec<&Rule> {
        let mut rules = Vec::new();
        collect_rules(&self.nodes, &mut rules);
        rules
    }

    /// Visit every declaration in the tree.
    pub fn walk_decls(&self, f: &mut impl FnMut(&Declaration)) {
        walk_decls(&self.nodes, f);
    }
}

impl Node {
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Rule(rule) => rule.span,
            Node::AtRule(at_rule) => at_rule.span,
            Node::Decl(decl) => decl.span,
            Node::Comment(comment) => comment.span,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Node::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&Declaration> {
        match self {
            Node::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn is_decl(&self) -> bool {
        matches!(self, Node::Decl(_))
    }
}

impl Rule {
    pub fn new(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            selector: selector.into(),
            nodes,
            span: None,
        }
    }

    pub fn decls(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(Node::as_decl)
    }

    /// Value of the last declaration with this property.
    pub fn decl_value(&self, prop: &str) -> Option<&str> {
        self.decls()
            .filter(|d| d.prop == prop)
            .last()
            .map(|d| d.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>, nodes: Option<Vec<Node>>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes,
            span: None,
        }
    }
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<AtRule> for Node {
    fn from(at_rule: AtRule) -> Self {
        Node::AtRule(at_rule)
    }
}

impl From<Declaration> for Node {
    fn from(decl: Declaration) -> Self {
        Node::Decl(decl)
    }
}

fn collect_rules<'a>(nodes: &'a [Node], rules: &mut Vec<&'a Rule>) {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                rules.push(rule);
                collect_rules(&rule.nodes, rules);
            }
            Node::AtRule(AtRule {
                nodes: Some(children),
                ..
            }) => collect_rules(children, rules),
            _ => {}
        }
    }
}

fn walk_decls(nodes: &[Node], f: &mut impl FnMut(&Declaration)) {
    for node in nodes {
        match node {
            Node::Decl(decl) => f(decl),
            Node::Rule(rule) => walk_decls(&rule.nodes, f),
            Node::AtRule(AtRule {
                nodes: Some(children),
                ..
            }) => walk_decls(children, f),
            _ => {}
        }
    }
}

// ============================================================================
// PRINTER
// ============================================================================

fn write_nodes(out: &mut String, nodes: &[Node], depth: usize) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_node(out, node, depth);
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Rule(rule) => {
            out.push_str(&indent);
            out.push_str(&rule.selector);
            write_block(out, &rule.nodes, depth);
        }
        Node::AtRule(at_rule) => {
            out.push_str(&indent);
            out.push('@');
            out.push_str(&at_rule.name);
            if !at_rule.params.is_empty() {
                out.push(' ');
                out.push_str(&at_rule.params);
            }
            match &at_rule.nodes {
                Some(children) => write_block(out, children, depth),
                None => out.push(';'),
            }
        }
        Node::Decl(decl) => {
            out.push_str(&indent);
            out.push_str(&decl.prop);
            out.push_str(": ");
            out.push_str(&decl.value);
            if decl.important {
                out.push_str(" !important");
            }
            out.push(';');
        }
        Node::Comment(comment) => {
            out.push_str(&indent);
            out.push_str("/*");
            out.push_str(&comment.text);
            out.push_str("*/");
        }
    }
}

fn write_block(out: &mut String, nodes: &[Node], depth: usize) {
    if nodes.is_empty() {
        out.push_str(" {}");
        return;
    }
    out.push_str(" {\n");
    write_nodes(out, nodes, depth + 1);
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_empty_rule() {
        let root = Root::new(vec![Rule::new(".a", vec![]).into()]);
        assert_eq!(root.to_css(), ".a {}");
    }

    #[test]
    fn test_print_nested_at_rule() {
        let root = Root::new(vec![
            AtRule::new(
                "media",
                "screen",
                Some(vec![
                    Rule::new(".a", vec![Declaration::new("color", "red").into()]).into(),
                ]),
            )
            .into(),
            AtRule::new("namespace", "\"x\"", None).into(),
        ]);
        assert_eq!(
            root.to_css(),
            "@media screen {\n    .a {\n        color: red;\n    }\n}\n@namespace \"x\";"
        );
    }

    #[test]
    fn test_print_important() {
        let mut decl = Declaration::new("color", "red");
        decl.important = true;
        let root = Root::new(vec![Rule::new(".a", vec![decl.into()]).into()]);
        assert_eq!(root.to_css(), ".a {\n    color: red !important;\n}");
    }

    #[test]
    fn test_rules_includes_nested() {
        let root = Root::new(vec![
            Rule::new(".a", vec![]).into(),
            AtRule::new("media", "print", Some(vec![Rule::new(".b", vec![]).into()])).into(),
        ]);
        let selectors: Vec<_> = root.rules().iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec![".a", ".b"]);
    }
}
