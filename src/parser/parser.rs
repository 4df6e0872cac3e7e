//! Recursive descent parser for Clojure source
//!
//! Builds a rowan GreenNode tree from tokens. Every token, trivia included,
//! lands in the tree so the CST renders back to the exact input.

use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// All error messages joined into one diagnostic line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{} at {:?}", e.message, e.range))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Clojure source code into a CST rooted at a `ROOT` node
pub fn parse(input: &str) -> Parse {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens);
    parser.parse_root();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Wrap the current token in an ERROR node so the text is still preserved
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.bump();
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_root(&mut self) {
        self.builder.start_node(SyntaxKind::ROOT.into());
        while !self.at_eof() {
            self.parse_element();
        }
        self.builder.finish_node();
    }

    /// Parse one element: a trivia token or a form
    fn parse_element(&mut self) {
        let kind = self.current_kind();
        if kind.is_trivia() {
            self.bump();
            return;
        }
        self.parse_form_here(kind);
    }

    fn parse_form_here(&mut self, kind: SyntaxKind) {
        match kind {
            k if k.is_atom() => self.bump(),
            k if k.is_open_delim() => self.parse_collection(k),
            SyntaxKind::QUOTE => self.parse_prefixed(SyntaxKind::QUOTE_FORM),
            SyntaxKind::SYNTAX_QUOTE => self.parse_prefixed(SyntaxKind::SYNTAX_QUOTE_FORM),
            SyntaxKind::UNQUOTE => self.parse_prefixed(SyntaxKind::UNQUOTE_FORM),
            SyntaxKind::UNQUOTE_SPLICING => {
                self.parse_prefixed(SyntaxKind::UNQUOTE_SPLICING_FORM)
            }
            SyntaxKind::DEREF => self.parse_prefixed(SyntaxKind::DEREF_FORM),
            SyntaxKind::VAR_QUOTE => self.parse_prefixed(SyntaxKind::VAR_FORM),
            SyntaxKind::DISCARD => self.parse_prefixed(SyntaxKind::DISCARD_FORM),
            SyntaxKind::HASH_TAG => self.parse_prefixed(SyntaxKind::TAGGED_FORM),
            SyntaxKind::READER_COND | SyntaxKind::READER_COND_SPLICING => {
                self.parse_reader_conditional()
            }
            SyntaxKind::CARET => self.parse_meta(),
            k if k.is_close_delim() => self.error_bump("unmatched closing delimiter"),
            _ => self.error_bump("unexpected token"),
        }
    }

    /// `(`…`)`, `[`…`]`, `{`…`}`, `#{`…`}`, `#(`…`)`
    fn parse_collection(&mut self, open: SyntaxKind) {
        let (Some(node), Some(close)) = (SyntaxKind::collection_for(open), open.closing_delim())
        else {
            self.error_bump("expected an opening delimiter");
            return;
        };

        self.builder.start_node(node.into());
        self.bump();
        loop {
            if self.at_eof() {
                self.error(format!("unclosed delimiter, expected {:?}", close));
                break;
            }
            let kind = self.current_kind();
            if kind == close {
                self.bump();
                break;
            }
            if kind.is_close_delim() {
                self.error_bump(format!("mismatched delimiter, expected {:?}", close));
                continue;
            }
            self.parse_element();
        }
        self.builder.finish_node();
    }

    /// Prefix token followed by exactly one form
    fn parse_prefixed(&mut self, node: SyntaxKind) {
        self.builder.start_node(node.into());
        self.bump();
        self.parse_required_form();
        self.builder.finish_node();
    }

    /// `^meta target`
    fn parse_meta(&mut self) {
        self.builder.start_node(SyntaxKind::META_FORM.into());
        self.bump();
        self.parse_required_form();
        self.parse_required_form();
        self.builder.finish_node();
    }

    /// `#?(...)` / `#?@(...)`
    fn parse_reader_conditional(&mut self) {
        self.builder.start_node(SyntaxKind::READER_COND_FORM.into());
        self.bump();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_collection(SyntaxKind::L_PAREN);
        } else {
            self.error("reader conditional requires a list");
        }
        self.builder.finish_node();
    }

    fn parse_required_form(&mut self) {
        self.skip_trivia();
        if self.at_eof() {
            self.error("expected a form, found end of input");
            return;
        }
        let kind = self.current_kind();
        if kind.is_close_delim() {
            self.error("expected a form before closing delimiter");
            return;
        }
        self.parse_form_here(kind);
    }
}

/// Parse a content string that must contain exactly one form.
///
/// Returns the form's green element, or an error message describing why the
/// content is unusable (syntax error, no form, several forms).
pub fn parse_form(input: &str) -> Result<crate::syntax::GreenElement, String> {
    let parsed = parse(input);
    if !parsed.ok() {
        return Err(parsed.error_summary());
    }
    let mut forms = parsed
        .green
        .children()
        .filter(|child| !crate::syntax::is_trivia_ref(*child))
        .map(crate::syntax::to_owned_element);
    match (forms.next(), forms.next()) {
        (Some(form), None) => Ok(form),
        (None, _) => Err(format!("no form found in {input:?}")),
        (Some(_), Some(_)) => Err(format!("expected exactly one form in {input:?}")),
    }
}
