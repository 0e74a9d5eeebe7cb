//! Recursive descent stylesheet parser
//!
//! Builds a [`Root`] from the token stream. Parsing never fails: unclosed
//! blocks, stray `}` and declarations without `:` are recorded as
//! [`ParseError`]s and skipped, and the best-effort tree is returned.

use text_size::{TextRange, TextSize};

use super::ast::{AtRule, Comment, Declaration, Node, Root, Rule};
use super::lexer::{Lexer, Token, TokenKind};
use crate::base::{LineIndex, Span};
use crate::diagnostics::messages;

/// Parse error with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.span.start, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse result containing content and any errors
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    pub content: T,
    pub errors: Vec<ParseError>,
}

impl<T> ParseResult<T> {
    /// Check if parsing succeeded without errors
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any parse errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse stylesheet source into a tree.
pub fn parse(input: &str) -> ParseResult<Root> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(input, &tokens);
    let nodes = parser.parse_nodes(None);
    ParseResult {
        content: Root::new(nodes),
        errors: parser.errors,
    }
}

/// What ends a run of tokens scanned at nesting depth zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Block,
    Semicolon,
    Close,
    Eof,
}

/// The parser state
struct Parser<'a> {
    input: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
    index: LineIndex,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, tokens: &'a [Token<'a>]) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
            index: LineIndex::new(input),
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn skip_whitespace(&mut self) {
        while self.current_kind() == Some(TokenKind::Whitespace) {
            self.pos += 1;
        }
    }

    fn offset_at(&self, pos: usize) -> TextSize {
        match self.tokens.get(pos) {
            Some(token) => token.offset,
            None => TextSize::of(self.input),
        }
    }

    fn slice(&self, start: TextSize, end: TextSize) -> &'a str {
        &self.input[TextRange::new(start, end)]
    }

    fn span(&self, start: TextSize, end: TextSize) -> Span {
        self.index.span(TextRange::new(start, end))
    }

    fn error(&mut self, message: String, start: TextSize, end: TextSize) {
        let span = self.span(start, end);
        self.errors.push(ParseError { message, span });
    }

    /// Find the next `{`, `;` or `}` outside of parentheses and brackets,
    /// starting at the current position. Returns its token index.
    fn scan_to_terminator(&self) -> (usize, Terminator) {
        let mut depth = 0usize;
        let mut pos = self.pos;
        while let Some(token) = self.tokens.get(pos) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::LBrace if depth == 0 => return (pos, Terminator::Block),
                TokenKind::Semicolon if depth == 0 => return (pos, Terminator::Semicolon),
                TokenKind::RBrace => return (pos, Terminator::Close),
                _ => {}
            }
            pos += 1;
        }
        (pos, Terminator::Eof)
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Parse child nodes until the block opened at `opener` closes, or until
    /// the end of input for the root.
    fn parse_nodes(&mut self, opener: Option<TextRange>) -> Vec<Node> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(token) = self.current().cloned() else {
                if let Some(opener) = opener {
                    self.error(messages::unclosed_block(), opener.start(), opener.end());
                }
                return nodes;
            };
            match token.kind {
                TokenKind::RBrace => {
                    self.pos += 1;
                    if opener.is_some() {
                        return nodes;
                    }
                    self.error(messages::unexpected_close_brace(), token.offset, token.end());
                }
                TokenKind::Comment => {
                    self.pos += 1;
                    let text = &token.text[2..token.text.len() - 2];
                    nodes.push(Node::Comment(Comment {
                        text: text.to_string(),
                        span: Some(self.span(token.offset, token.end())),
                    }));
                }
                TokenKind::Semicolon => self.pos += 1,
                TokenKind::AtKeyword => nodes.push(self.parse_at_rule()),
                _ => match self.scan_to_terminator() {
                    (_, Terminator::Block) => nodes.push(self.parse_rule()),
                    _ => {
                        if let Some(decl) = self.parse_declaration() {
                            nodes.push(decl);
                        }
                    }
                },
            }
        }
    }

    fn parse_rule(&mut self) -> Node {
        let start = self.offset_at(self.pos);
        let (brace, _) = self.scan_to_terminator();
        let selector = self.slice(start, self.offset_at(brace)).trim().to_string();
        let opener = self.tokens[brace].range();
        self.pos = brace + 1;
        let nodes = self.parse_nodes(Some(opener));
        let end = self.end_of_previous();
        Node::Rule(Rule {
            selector,
            nodes,
            span: Some(self.span(start, end)),
        })
    }

    fn parse_at_rule(&mut self) -> Node {
        let start = self.offset_at(self.pos);
        let name = self.tokens[self.pos].text[1..].to_string();
        self.pos += 1;
        let params_start = self.offset_at(self.pos);
        let (terminator_pos, terminator) = self.scan_to_terminator();
        let params = self
            .slice(params_start, self.offset_at(terminator_pos))
            .trim()
            .to_string();
        self.pos = terminator_pos;

        let nodes = match terminator {
            Terminator::Block => {
                let opener = self.tokens[terminator_pos].range();
                self.pos += 1;
                Some(self.parse_nodes(Some(opener)))
            }
            Terminator::Semicolon => {
                self.pos += 1;
                None
            }
            Terminator::Close | Terminator::Eof => None,
        };
        let end = self.end_of_previous();
        Node::AtRule(AtRule {
            name,
            params,
            nodes,
            span: Some(self.span(start, end)),
        })
    }

    fn parse_declaration(&mut self) -> Option<Node> {
        let start = self.offset_at(self.pos);
        let (terminator_pos, terminator) = self.scan_to_terminator();
        let colon = (self.pos..terminator_pos)
            .find(|&pos| self.tokens[pos].kind == TokenKind::Colon);
        let end = self.offset_at(terminator_pos);
        self.pos = terminator_pos;
        if terminator == Terminator::Semicolon {
            self.pos += 1;
        }

        let Some(colon) = colon else {
            let word = self.slice(start, end).trim();
            self.error(messages::unknown_word(word), start, end);
            return None;
        };

        let prop = self.slice(start, self.tokens[colon].offset).trim().to_string();
        let raw_value = self.slice(self.tokens[colon].end(), end).trim();
        let (value, important) = split_important(raw_value);
        let decl_end = if terminator == Terminator::Semicolon {
            self.end_of_previous()
        } else {
            end
        };
        Some(Node::Decl(Declaration {
            prop,
            value: value.to_string(),
            important,
            span: Some(self.span(start, decl_end)),
        }))
    }

    fn end_of_previous(&self) -> TextSize {
        match self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos)) {
            Some(token) => token.end(),
            None => TextSize::of(self.input),
        }
    }
}

/// Split a trailing `!important` off a declaration value.
fn split_important(value: &str) -> (&str, bool) {
    let Some(bang) = value.rfind('!') else {
        return (value, false);
    };
    let flag = value[bang + 1..].trim();
    if flag.eq_ignore_ascii_case("important") {
        (value[..bang].trim_end(), true)
    } else {
        (value, false)
    }
}
