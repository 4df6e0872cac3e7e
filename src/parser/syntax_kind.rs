//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! for Clojure/EDN source.

/// All syntax kinds (tokens and nodes) in Clojure source
///
/// Tokens are leaves (atoms, delimiters, reader prefixes, trivia).
/// Nodes are composite (collections and reader forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMA, // commas are whitespace in Clojure
    COMMENT,

    // =========================================================================
    // ATOMS
    // =========================================================================
    SYMBOL,  // foo, clojure.core/map, +
    KEYWORD, // :foo, ::bar, :ns/baz
    NUMBER,  // 42, -1.5, 1/2, 0xFF, 10N, ##Inf
    STRING,  // "hello"
    CHAR,    // \a, \newline, A
    REGEX,   // #"[a-z]+"

    // =========================================================================
    // DELIMITERS
    // =========================================================================
    L_PAREN,      // (
    R_PAREN,      // )
    L_BRACKET,    // [
    R_BRACKET,    // ]
    L_BRACE,      // {
    R_BRACE,      // }
    HASH_L_BRACE, // #{
    HASH_L_PAREN, // #(

    // =========================================================================
    // READER PREFIXES
    // =========================================================================
    QUOTE,                  // '
    SYNTAX_QUOTE,           // `
    UNQUOTE,                // ~
    UNQUOTE_SPLICING,       // ~@
    DEREF,                  // @
    CARET,                  // ^
    VAR_QUOTE,              // #'
    DISCARD,                // #_
    READER_COND,            // #?
    READER_COND_SPLICING,   // #?@
    HASH_TAG,               // #inst, #uuid, #my/tag

    // =========================================================================
    // NODES
    // =========================================================================
    ROOT,
    LIST,
    VECTOR,
    MAP,
    SET,
    FN,
    QUOTE_FORM,
    SYNTAX_QUOTE_FORM,
    UNQUOTE_FORM,
    UNQUOTE_SPLICING_FORM,
    DEREF_FORM,
    VAR_FORM,
    META_FORM,
    DISCARD_FORM,
    READER_COND_FORM,
    TAGGED_FORM,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comma or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMA | Self::COMMENT)
    }

    /// Check if this is an atom (a token carrying a value)
    pub fn is_atom(self) -> bool {
        (self as u16) >= (Self::SYMBOL as u16) && (self as u16) <= (Self::REGEX as u16)
    }

    /// Check if this is an opening delimiter
    pub fn is_open_delim(self) -> bool {
        matches!(
            self,
            Self::L_PAREN | Self::L_BRACKET | Self::L_BRACE | Self::HASH_L_BRACE | Self::HASH_L_PAREN
        )
    }

    /// Check if this is a closing delimiter
    pub fn is_close_delim(self) -> bool {
        matches!(self, Self::R_PAREN | Self::R_BRACKET | Self::R_BRACE)
    }

    /// Check if this is a reader-prefix node. These hold a fixed number of
    /// forms (two for metadata, one otherwise), so their children can be
    /// replaced but never added or removed.
    pub fn is_prefix_form(self) -> bool {
        matches!(
            self,
            Self::QUOTE_FORM
                | Self::SYNTAX_QUOTE_FORM
                | Self::UNQUOTE_FORM
                | Self::UNQUOTE_SPLICING_FORM
                | Self::DEREF_FORM
                | Self::VAR_FORM
                | Self::META_FORM
                | Self::READER_COND_FORM
                | Self::TAGGED_FORM
        )
    }

    /// Check if this is a collection node (delimited by a pair of tokens)
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            Self::LIST | Self::VECTOR | Self::MAP | Self::SET | Self::FN
        )
    }

    /// Closing delimiter matching an opening one
    pub fn closing_delim(self) -> Option<SyntaxKind> {
        match self {
            Self::L_PAREN | Self::HASH_L_PAREN => Some(Self::R_PAREN),
            Self::L_BRACKET => Some(Self::R_BRACKET),
            Self::L_BRACE | Self::HASH_L_BRACE => Some(Self::R_BRACE),
            _ => None,
        }
    }

    /// Collection node built from an opening delimiter
    pub fn collection_for(open: SyntaxKind) -> Option<SyntaxKind> {
        match open {
            Self::L_PAREN => Some(Self::LIST),
            Self::L_BRACKET => Some(Self::VECTOR),
            Self::L_BRACE => Some(Self::MAP),
            Self::HASH_L_BRACE => Some(Self::SET),
            Self::HASH_L_PAREN => Some(Self::FN),
            _ => None,
        }
    }

    /// Delimiter tokens `(kind, text)` for a collection node
    pub fn delimiters(self) -> Option<((SyntaxKind, &'static str), (SyntaxKind, &'static str))> {
        match self {
            Self::LIST => Some(((Self::L_PAREN, "("), (Self::R_PAREN, ")"))),
            Self::VECTOR => Some(((Self::L_BRACKET, "["), (Self::R_BRACKET, "]"))),
            Self::MAP => Some(((Self::L_BRACE, "{"), (Self::R_BRACE, "}"))),
            Self::SET => Some(((Self::HASH_L_BRACE, "#{"), (Self::R_BRACE, "}"))),
            Self::FN => Some(((Self::HASH_L_PAREN, "#("), (Self::R_PAREN, ")"))),
            _ => None,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClojureLanguage {}

impl rowan::Language for ClojureLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Red-tree view over a parsed document
pub type SyntaxNode = rowan::SyntaxNode<ClojureLanguage>;
