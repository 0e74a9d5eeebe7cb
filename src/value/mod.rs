//! Declaration value syntax.
//!
//! A small value tokenizer in the spirit of `postcss-value-parser`: words,
//! quoted strings, nested functions, dividers, spaces and comments. Printing
//! with [`stringify`] reproduces the input exactly.

mod parser;


pub use parser::parse_value;

use std::fmt;

/// One node of a parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueNode {
    Word(String),
    String {
        quote: char,
        value: String,
    },
    Function {
        name: String,
        nodes: Vec<ValueNode>,
    },
    /// `,` `/` or `:` with the whitespace around it.
    Div {
        value: char,
        before: String,
        after: String,
    },
    Space(String),
    Comment(String),
}

impl ValueNode {
    pub fn is_function(&self, function: &str) -> bool {
        matches!(self, ValueNode::Function { name, .. } if name == function)
    }

    pub fn is_comma(&self) -> bool {
        matches!(self, ValueNode::Div { value: ',', .. })
    }

    pub fn is_space(&self) -> bool {
        matches!(self, ValueNode::Space(_) | ValueNode::Comment(_))
    }

    /// Word text or unquoted string content.
    pub fn text(&self) -> Option<&str> {
        match self {
            ValueNode::Word(text) => Some(text),
            ValueNode::String { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueNode::Word(text) | ValueNode::Space(text) => f.write_str(text),
            ValueNode::String { quote, value } => write!(f, "{quote}{value}{quote}"),
            ValueNode::Function { name, nodes } => write!(f, "{name}({})", stringify(nodes)),
            ValueNode::Div {
                value,
                before,
                after,
            } => write!(f, "{before}{value}{after}"),
            ValueNode::Comment(text) => write!(f, "/*{text}*/"),
        }
    }
}

/// Print nodes back to text.
pub fn stringify(nodes: &[ValueNode]) -> String {
    nodes.iter().map(ToString::to_string).collect()
}

/// Split nodes on top-level commas.
pub fn split_by_comma(nodes: &[ValueNode]) -> Vec<&[ValueNode]> {
    nodes.split(ValueNode::is_comma).collect()
}

/// Comma separated arguments of a function node, each trimmed.
///
/// An empty argument list (`fn()`) yields no arguments.
pub fn function_args(nodes: &[ValueNode]) -> Vec<String> {
    if nodes.iter().all(ValueNode::is_space) {
        return Vec::new();
    }
    split_by_comma(nodes)
        .into_iter()
        .map(|arg| stringify(arg).trim().to_string())
        .collect()
}

/// Drop leading and trailing space nodes.
pub fn trim_spaces(nodes: &[ValueNode]) -> &[ValueNode] {
    let start = nodes.iter().position(|n| !n.is_space()).unwrap_or(nodes.len());
    let end = nodes
        .iter()
        .rposition(|n| !n.is_space())
        .map_or(start, |i| i + 1);
    &nodes[start..end.max(start)]
}

/// Strip one pair of matching quotes.
pub fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}
