//! `-st-states` definitions.
//!
//! ```text
//! -st-states: toggled, size(enum(small, large)) small, mapped(".x:hover"),
//!             label(string(minLength(2), contains(a)));
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::value::{self, ValueNode, function_args, parse_value, stringify, trim_spaces};

/// Definition of one custom pseudo-class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateDef {
    /// Compiles to `[data-{ns}-{name}]`.
    Boolean,
    /// Literal selector emitted in place of the state.
    Mapped(String),
    Typed(TypedState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateType {
    String,
    Number,
    Enum,
    Tag,
}

impl StateType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(StateType::String),
            "number" => Some(StateType::Number),
            "enum" => Some(StateType::Enum),
            "tag" => Some(StateType::Tag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StateType::String => "string",
            StateType::Number => "number",
            StateType::Enum => "enum",
            StateType::Tag => "tag",
        }
    }
}

/// A validator call inside a type, e.g. `minLength(2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateValidator {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedState {
    pub ty: StateType,
    pub validators: Vec<StateValidator>,
    /// Allowed values of an `enum` state.
    pub options: Vec<String>,
    /// Raw default parameter, may contain `value()`.
    pub default_value: Option<String>,
}

/// Problems found while reading a `-st-states` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateParseIssue {
    StartsWithHyphen(String),
    UnknownType { state: String, ty: String },
    NoType(String),
    TooManyTypes { state: String, types: Vec<String> },
}

/// Parse a `-st-states` value into definitions, in declaration order.
pub fn parse_states(text: &str) -> (IndexMap<SmolStr, StateDef>, Vec<StateParseIssue>) {
    let nodes = parse_value(text);
    let mut states = IndexMap::new();
    let mut issues = Vec::new();

    for part in value::split_by_comma(&nodes) {
        let part = trim_spaces(part);
        let Some((first, rest)) = part.split_first() else {
            continue;
        };
        let (name, definition) = match first {
            ValueNode::Word(name) => (name.clone(), StateDef::Boolean),
            ValueNode::Function { name, nodes } => {
                let definition = parse_definition(name, nodes, rest, &mut issues);
                (name.clone(), definition)
            }
            _ => continue,
        };
        if name.starts_with('-') {
            issues.push(StateParseIssue::StartsWithHyphen(name));
            continue;
        }
        states.insert(SmolStr::new(&name), definition);
    }

    (states, issues)
}

fn parse_definition(
    state: &str,
    nodes: &[ValueNode],
    rest: &[ValueNode],
    issues: &mut Vec<StateParseIssue>,
) -> StateDef {
    let content: Vec<&ValueNode> = nodes.iter().filter(|n| !n.is_space()).collect();
    match content.as_slice() {
        [] => {
            issues.push(StateParseIssue::NoType(state.to_string()));
            StateDef::Boolean
        }
        [ValueNode::String { value, .. }] => StateDef::Mapped(value.trim().to_string()),
        [type_node] => {
            let (type_name, args) = match type_node {
                ValueNode::Word(name) => (name.as_str(), &[][..]),
                ValueNode::Function { name, nodes } => (name.as_str(), nodes.as_slice()),
                _ => {
                    issues.push(StateParseIssue::NoType(state.to_string()));
                    return StateDef::Boolean;
                }
            };
            let Some(ty) = StateType::from_name(type_name) else {
                issues.push(StateParseIssue::UnknownType {
                    state: state.to_string(),
                    ty: type_name.to_string(),
                });
                return StateDef::Boolean;
            };
            let default = stringify(trim_spaces(rest));
            let mut typed = TypedState {
                ty,
                validators: Vec::new(),
                options: Vec::new(),
                default_value: (!default.is_empty()).then_some(default),
            };
            for arg in value::split_by_comma(args) {
                match trim_spaces(arg) {
                    [ValueNode::Function { name, nodes }] => typed.validators.push(StateValidator {
                        name: name.clone(),
                        args: function_args(nodes),
                    }),
                    [] => {}
                    other => typed.options.push(value::strip_quotes(&stringify(other)).to_string()),
                }
            }
            StateDef::Typed(typed)
        }
        types => {
            issues.push(StateParseIssue::TooManyTypes {
                state: state.to_string(),
                types: types
                    .iter()
                    .filter(|n| !n.is_comma())
                    .map(|n| n.to_string())
                    .collect(),
            });
            StateDef::Boolean
        }
    }
}
