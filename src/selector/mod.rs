//! Selector syntax: compound chunks, combinators and simple selectors.

mod ast;
mod lexer;
mod parser;


pub use ast::{Combinator, Compound, Selector, SelectorList, SimpleSelector, stringify_selector_list};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{parse_selector, parse_selector_list};
