//! Stylesheet syntax: lexer, parser and the mutable node tree.
//!
//! The parser accepts the full `-st-*` superset since it never interprets
//! declarations; it only splits the source into rules, at-rules and
//! declarations.

mod ast;
mod lexer;
mod parser;


pub use ast::{AtRule, Comment, Declaration, Node, Root, Rule};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{ParseError, ParseResult, parse};
