//! Selector parser
//!
//! Pseudo-class and pseudo-element arguments are kept as raw text; callers
//! that need to look inside `:not(...)` or `:global(...)` parse the argument
//! again with [`parse_selector_list`].

use text_size::{TextRange, TextSize};

use super::ast::{Combinator, Compound, Selector, SelectorList, SimpleSelector};
use super::lexer::{Token, TokenKind, tokenize};

/// Parse a selector list. Never fails; unknown input becomes
/// [`SimpleSelector::Raw`].
pub fn parse_selector_list(input: &str) -> SelectorList {
    let tokens = tokenize(input);
    let mut parser = SelectorParser::new(input, &tokens);
    parser.parse_list()
}

/// Parse a single complex selector, ignoring anything after a top-level comma.
pub fn parse_selector(input: &str) -> Selector {
    parse_selector_list(input).into_iter().next().unwrap_or_default()
}

struct SelectorParser<'a> {
    input: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
}

/// Compound being built, with its pending combinator.
#[derive(Default)]
struct SelectorBuilder {
    chunks: Vec<Compound>,
    current: Compound,
    pending: Option<Combinator>,
}

impl SelectorBuilder {
    fn push(&mut self, node: SimpleSelector) {
        if let Some(combinator) = self.pending.take() {
            if !self.current.nodes.is_empty() || self.current.combinator.is_some() {
                self.chunks.push(std::mem::take(&mut self.current));
            }
            if !self.chunks.is_empty() || combinator != Combinator::Descendant {
                self.current.combinator = Some(combinator);
            }
        }
        self.current.nodes.push(node);
    }

    fn whitespace(&mut self) {
        if self.pending.is_none() && (!self.current.nodes.is_empty() || !self.chunks.is_empty()) {
            self.pending = Some(Combinator::Descendant);
        }
    }

    fn combinator(&mut self, combinator: Combinator) {
        self.pending = Some(combinator);
    }

    fn finish(mut self) -> Selector {
        if !self.current.nodes.is_empty() || self.current.combinator.is_some() {
            self.chunks.push(self.current);
        }
        Selector::new(self.chunks)
    }
}

impl<'a> SelectorParser<'a> {
    fn new(input: &'a str, tokens: &'a [Token<'a>]) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn parse_list(&mut self) -> SelectorList {
        let mut list = Vec::new();
        let mut builder = SelectorBuilder::default();
        while let Some(token) = self.current().cloned() {
            match token.kind {
                TokenKind::Whitespace | TokenKind::Comment => {
                    builder.whitespace();
                    self.pos += 1;
                }
                TokenKind::Comma => {
                    list.push(std::mem::take(&mut builder).finish());
                    self.pos += 1;
                }
                TokenKind::Gt => {
                    builder.combinator(Combinator::Child);
                    self.pos += 1;
                }
                TokenKind::Plus => {
                    builder.combinator(Combinator::NextSibling);
                    self.pos += 1;
                }
                TokenKind::Tilde => {
                    builder.combinator(Combinator::SubsequentSibling);
                    self.pos += 1;
                }
                _ => {
                    let node = self.parse_simple(&token);
                    builder.push(node);
                }
            }
        }
        let last = builder.finish();
        if !last.chunks.is_empty() || !list.is_empty() {
            list.push(last);
        }
        list
    }

    fn parse_simple(&mut self, token: &Token<'a>) -> SimpleSelector {
        self.pos += 1;
        match token.kind {
            TokenKind::Dot if self.peek_kind(0) == Some(TokenKind::Ident) => {
                let name = self.tokens[self.pos].text.to_string();
                self.pos += 1;
                SimpleSelector::Class(name)
            }
            TokenKind::Ident => SimpleSelector::Type(token.text.to_string()),
            TokenKind::Id => SimpleSelector::Id(token.text[1..].to_string()),
            TokenKind::Star => SimpleSelector::Universal,
            TokenKind::Amp => SimpleSelector::Nesting,
            TokenKind::Attribute => SimpleSelector::Attribute(token.text.to_string()),
            TokenKind::Colon | TokenKind::DoubleColon
                if self.peek_kind(0) == Some(TokenKind::Ident) =>
            {
                let name = self.tokens[self.pos].text.to_string();
                self.pos += 1;
                let argument = self.parse_argument();
                if token.kind == TokenKind::Colon {
                    SimpleSelector::PseudoClass { name, argument }
                } else {
                    SimpleSelector::PseudoElement { name, argument }
                }
            }
            TokenKind::LParen => {
                // Parenthesized text that does not belong to a pseudo: keep it whole.
                self.pos -= 1;
                let argument = self.parse_argument().unwrap_or_default();
                SimpleSelector::Raw(format!("({argument})"))
            }
            _ => SimpleSelector::Raw(token.text.to_string()),
        }
    }

    /// Consume `( ... )` with nesting and return the raw text between.
    fn parse_argument(&mut self) -> Option<String> {
        if self.peek_kind(0) != Some(TokenKind::LParen) {
            return None;
        }
        let open = &self.tokens[self.pos];
        let start = open.end();
        let mut depth = 0usize;
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        let end = token.offset;
                        self.pos += 1;
                        return Some(self.slice(start, end).trim().to_string());
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        // Unclosed: everything to the end of input.
        Some(self.slice(start, TextSize::of(self.input)).trim().to_string())
    }

    fn slice(&self, start: TextSize, end: TextSize) -> &'a str {
        &self.input[TextRange::new(start, end)]
    }
}
