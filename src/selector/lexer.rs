//! Logos-based lexer for selectors

use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Tokenize a selector string
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        tokens.push(Token {
            kind: result.unwrap_or(TokenKind::Error),
            text,
            offset: TextSize::new(lexer.span().start as u32),
        });
    }
    tokens
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r"-?-?([a-zA-Z_]|[^\x00-\x7F]|\\[^\n])([a-zA-Z0-9_\-]|[^\x00-\x7F]|\\[^\n])*")]
    Ident,

    #[regex(r"#([a-zA-Z0-9_\-]|[^\x00-\x7F]|\\[^\n])+")]
    Id,

    #[regex(r"[0-9]+(\.[0-9]+)?%?")]
    Number,

    #[regex(r"\[[^\]]*\]")]
    Attribute,

    #[token(".")]
    Dot,

    #[token("&")]
    Amp,

    #[token("*")]
    Star,

    #[token(",")]
    Comma,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("~")]
    Tilde,

    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    Error,
}
