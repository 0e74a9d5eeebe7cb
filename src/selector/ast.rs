//! Selector model and printer.

use std::fmt;

/// A comma separated list of complex selectors.
pub type SelectorList = Vec<Selector>;

/// One complex selector: compound chunks joined by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub chunks: Vec<Compound>,
}

/// A compound selector together with the combinator that precedes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub combinator: Option<Combinator>,
    pub nodes: Vec<SimpleSelector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Class(String),
    Type(String),
    Universal,
    Id(String),
    /// Attribute selector, stored with its brackets.
    Attribute(String),
    PseudoClass {
        name: String,
        argument: Option<String>,
    },
    PseudoElement {
        name: String,
        argument: Option<String>,
    },
    Nesting,
    /// Text kept verbatim: unparseable input or already-scoped output.
    Raw(String),
}

// ============================================================================
// QUERIES
// ============================================================================

impl Selector {
    pub fn new(chunks: Vec<Compound>) -> Self {
        Self { chunks }
    }

    /// The single simple selector of `.a` or `Button`, if that is all there is.
    pub fn as_single(&self) -> Option<&SimpleSelector> {
        match self.chunks.as_slice() {
            [chunk] if chunk.combinator.is_none() => match chunk.nodes.as_slice() {
                [node] => Some(node),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.nodes.is_empty())
    }

    pub fn has_nesting(&self) -> bool {
        self.chunks
            .iter()
            .any(|c| c.nodes.iter().any(|n| matches!(n, SimpleSelector::Nesting)))
    }
}

impl Compound {
    pub fn new(combinator: Option<Combinator>, nodes: Vec<SimpleSelector>) -> Self {
        Self { combinator, nodes }
    }
}

impl SimpleSelector {
    pub fn pseudo_class(name: impl Into<String>) -> Self {
        SimpleSelector::PseudoClass {
            name: name.into(),
            argument: None,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        SimpleSelector::Raw(text.into())
    }
}

// ============================================================================
// PRINTER
// ============================================================================

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::NextSibling => " + ",
            Combinator::SubsequentSibling => " ~ ",
        })
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Class(name) => write!(f, ".{name}"),
            SimpleSelector::Type(name) => f.write_str(name),
            SimpleSelector::Universal => f.write_str("*"),
            SimpleSelector::Id(name) => write!(f, "#{name}"),
            SimpleSelector::Attribute(text) | SimpleSelector::Raw(text) => f.write_str(text),
            SimpleSelector::PseudoClass { name, argument } => {
                write!(f, ":{name}")?;
                match argument {
                    Some(argument) => write!(f, "({argument})"),
                    None => Ok(()),
                }
            }
            SimpleSelector::PseudoElement { name, argument } => {
                write!(f, "::{name}")?;
                match argument {
                    Some(argument) => write!(f, "({argument})"),
                    None => Ok(()),
                }
            }
            SimpleSelector::Nesting => f.write_str("&"),
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk.combinator {
                Some(combinator) if i > 0 => write!(f, "{combinator}")?,
                Some(Combinator::Descendant) | None => {}
                Some(combinator) => write!(f, "{} ", combinator.to_string().trim())?,
            }
            write!(f, "{chunk}")?;
        }
        Ok(())
    }
}

/// Print a selector list joined with `", "`.
pub fn stringify_selector_list(list: &[Selector]) -> String {
    list.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
