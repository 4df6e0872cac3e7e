use crate::parser::SyntaxKind;
use serde::Serialize;
use std::fmt;

/// Structural kind of a node as reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeTag {
    Forms,
    List,
    Vector,
    Map,
    Set,
    Fn,
    Token,
    Whitespace,
    Comma,
    Comment,
    Quote,
    SyntaxQuote,
    Unquote,
    UnquoteSplicing,
    Deref,
    Var,
    Meta,
    Uneval,
    ReaderMacro,
    Tagged,
    Delimiter,
    Error,
}

impl NodeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeTag::Forms => "forms",
            NodeTag::List => "list",
            NodeTag::Vector => "vector",
            NodeTag::Map => "map",
            NodeTag::Set => "set",
            NodeTag::Fn => "fn",
            NodeTag::Token => "token",
            NodeTag::Whitespace => "whitespace",
            NodeTag::Comma => "comma",
            NodeTag::Comment => "comment",
            NodeTag::Quote => "quote",
            NodeTag::SyntaxQuote => "syntax-quote",
            NodeTag::Unquote => "unquote",
            NodeTag::UnquoteSplicing => "unquote-splicing",
            NodeTag::Deref => "deref",
            NodeTag::Var => "var",
            NodeTag::Meta => "meta",
            NodeTag::Uneval => "uneval",
            NodeTag::ReaderMacro => "reader-macro",
            NodeTag::Tagged => "tagged",
            NodeTag::Delimiter => "delimiter",
            NodeTag::Error => "error",
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(
            self,
            NodeTag::List | NodeTag::Vector | NodeTag::Map | NodeTag::Set | NodeTag::Fn
        )
    }
}

impl From<SyntaxKind> for NodeTag {
    fn from(kind: SyntaxKind) -> Self {
        match kind {
            SyntaxKind::ROOT => NodeTag::Forms,
            SyntaxKind::LIST => NodeTag::List,
            SyntaxKind::VECTOR => NodeTag::Vector,
            SyntaxKind::MAP => NodeTag::Map,
            SyntaxKind::SET => NodeTag::Set,
            SyntaxKind::FN => NodeTag::Fn,
            SyntaxKind::WHITESPACE => NodeTag::Whitespace,
            SyntaxKind::COMMA => NodeTag::Comma,
            SyntaxKind::COMMENT => NodeTag::Comment,
            SyntaxKind::QUOTE_FORM => NodeTag::Quote,
            SyntaxKind::SYNTAX_QUOTE_FORM => NodeTag::SyntaxQuote,
            SyntaxKind::UNQUOTE_FORM => NodeTag::Unquote,
            SyntaxKind::UNQUOTE_SPLICING_FORM => NodeTag::UnquoteSplicing,
            SyntaxKind::DEREF_FORM => NodeTag::Deref,
            SyntaxKind::VAR_FORM => NodeTag::Var,
            SyntaxKind::META_FORM => NodeTag::Meta,
            SyntaxKind::DISCARD_FORM => NodeTag::Uneval,
            SyntaxKind::READER_COND_FORM => NodeTag::ReaderMacro,
            SyntaxKind::TAGGED_FORM => NodeTag::Tagged,
            SyntaxKind::ERROR => NodeTag::Error,
            k if k.is_atom() => NodeTag::Token,
            _ => NodeTag::Delimiter,
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
