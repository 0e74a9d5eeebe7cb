use std::iter::Peekable;
use std::str::CharIndices;

use super::ValueNode;

/// Parse a declaration value. Never fails: unclosed strings, comments and
/// functions run to the end of input.
pub fn parse_value(input: &str) -> Vec<ValueNode> {
    let mut parser = ValueParser {
        input,
        chars: input.char_indices().peekable(),
    };
    parser.parse_nodes(false)
}

struct ValueParser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

fn is_word_end(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '/' | ':' | '(' | ')')
}

impl<'a> ValueParser<'a> {
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset();
        while let Some(&(_, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            self.chars.next();
        }
        &self.input[start..self.offset()]
    }

    fn parse_nodes(&mut self, nested: bool) -> Vec<ValueNode> {
        let mut nodes = Vec::new();
        while let Some(&(start, c)) = self.chars.peek() {
            match c {
                ')' if nested => {
                    self.chars.next();
                    return nodes;
                }
                c if c.is_whitespace() => {
                    let space = self.take_while(char::is_whitespace);
                    nodes.push(ValueNode::Space(space.to_string()));
                }
                '"' | '\'' => nodes.push(self.parse_string(c)),
                '/' if self.input[start..].starts_with("/*") => nodes.push(self.parse_comment()),
                ',' | '/' | ':' => {
                    self.chars.next();
                    let before = match nodes.last() {
                        Some(ValueNode::Space(_)) => match nodes.pop() {
                            Some(ValueNode::Space(space)) => space,
                            _ => String::new(),
                        },
                        _ => String::new(),
                    };
                    let after = self.take_while(char::is_whitespace).to_string();
                    nodes.push(ValueNode::Div {
                        value: c,
                        before,
                        after,
                    });
                }
                '(' => {
                    self.chars.next();
                    nodes.push(self.parse_function(String::new()));
                }
                ')' => {
                    // Unbalanced close paren at the top level stays a word.
                    self.chars.next();
                    nodes.push(ValueNode::Word(")".to_string()));
                }
                _ => {
                    let word = self.take_while(|c| !is_word_end(c));
                    if self.chars.peek().map(|&(_, c)| c) == Some('(') {
                        self.chars.next();
                        nodes.push(self.parse_function(word.to_string()));
                    } else {
                        nodes.push(ValueNode::Word(word.to_string()));
                    }
                }
            }
        }
        nodes
    }

    fn parse_function(&mut self, name: String) -> ValueNode {
        if name.eq_ignore_ascii_case("url") {
            let rest = &self.input[self.offset()..];
            let trimmed = rest.trim_start();
            if !trimmed.starts_with('"') && !trimmed.starts_with('\'') {
                let body = self.take_while(|c| c != ')');
                self.chars.next();
                let nodes = if body.is_empty() {
                    Vec::new()
                } else {
                    vec![ValueNode::Word(body.to_string())]
                };
                return ValueNode::Function { name, nodes };
            }
        }
        let nodes = self.parse_nodes(true);
        ValueNode::Function { name, nodes }
    }

    fn parse_string(&mut self, quote: char) -> ValueNode {
        self.chars.next();
        let start = self.offset();
        let mut escaped = false;
        while let Some(&(i, c)) = self.chars.peek() {
            self.chars.next();
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return ValueNode::String {
                    quote,
                    value: self.input[start..i].to_string(),
                };
            }
        }
        ValueNode::String {
            quote,
            value: self.input[start..].to_string(),
        }
    }

    fn parse_comment(&mut self) -> ValueNode {
        let start = self.offset() + 2;
        self.chars.next();
        self.chars.next();
        match self.input[start..].find("*/") {
            Some(len) => {
                let text = &self.input[start..start + len];
                let end = start + len + 2;
                while self.offset() < end {
                    self.chars.next();
                }
                ValueNode::Comment(text.to_string())
            }
            None => {
                while self.chars.next().is_some() {}
                ValueNode::Comment(self.input[start..].to_string())
            }
        }
    }
}
