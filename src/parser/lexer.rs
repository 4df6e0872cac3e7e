//! Logos-based lexer for Clojure source
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token, so concatenating token texts reproduces the source.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    #[token(",")]
    Comma,

    #[regex(r";[^\n]*")]
    Comment,

    // =========================================================================
    // ATOMS
    // =========================================================================
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,

    #[regex(r#"#"([^"\\]|\\(.|\n))*""#)]
    Regex,

    #[regex(r"\\(newline|space|tab|formfeed|backspace|return|u[0-9a-fA-F]{4}|o[0-7]{1,3}|.)")]
    Char,

    #[regex(r#"::?[^ \t\r\n\x0C,;()\[\]{}"\\`~^@]+"#)]
    Keyword,

    #[regex(r"[+-]?[0-9][0-9a-zA-Z.+/-]*", priority = 10)]
    Number,

    #[regex(r"##[a-zA-Z-]+")]
    SymbolicValue,

    #[regex(r#"[^ \t\r\n\x0C,;()\[\]{}"\\`~^@#:'0-9][^ \t\r\n\x0C,;()\[\]{}"\\`~^@]*"#, priority = 5)]
    Symbol,

    // =========================================================================
    // DISPATCH (must be listed with the plain delimiters below)
    // =========================================================================
    #[token("#{")]
    HashLBrace,
    #[token("#(")]
    HashLParen,
    #[token("#'")]
    VarQuote,
    #[token("#_")]
    Discard,
    #[token("#?")]
    ReaderCond,
    #[token("#?@")]
    ReaderCondSplicing,
    #[regex(r#"#[a-zA-Z][^ \t\r\n\x0C,;()\[\]{}"\\`~^@]*"#)]
    HashTag,

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // =========================================================================
    // READER PREFIXES
    // =========================================================================
    #[token("'")]
    Quote,
    #[token("`")]
    SyntaxQuote,
    #[token("~")]
    Unquote,
    #[token("~@")]
    UnquoteSplicing,
    #[token("@")]
    Deref,
    #[token("^")]
    Caret,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Comma => SyntaxKind::COMMA,
            Comment => SyntaxKind::COMMENT,
            String => SyntaxKind::STRING,
            Regex => SyntaxKind::REGEX,
            Char => SyntaxKind::CHAR,
            Keyword => SyntaxKind::KEYWORD,
            Number | SymbolicValue => SyntaxKind::NUMBER,
            Symbol => SyntaxKind::SYMBOL,
            HashLBrace => SyntaxKind::HASH_L_BRACE,
            HashLParen => SyntaxKind::HASH_L_PAREN,
            VarQuote => SyntaxKind::VAR_QUOTE,
            Discard => SyntaxKind::DISCARD,
            ReaderCond => SyntaxKind::READER_COND,
            ReaderCondSplicing => SyntaxKind::READER_COND_SPLICING,
            HashTag => SyntaxKind::HASH_TAG,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Quote => SyntaxKind::QUOTE,
            SyntaxQuote => SyntaxKind::SYNTAX_QUOTE,
            Unquote => SyntaxKind::UNQUOTE,
            UnquoteSplicing => SyntaxKind::UNQUOTE_SPLICING,
            Deref => SyntaxKind::DEREF,
            Caret => SyntaxKind::CARET,
        }
    }
}
