//! Token kind definitions for the lenient SQL tokenizer.
//!
//! Every byte of the input ends up in exactly one token, so whitespace and
//! comments get kinds of their own. Anything the tokenizer cannot place
//! becomes `Unknown`.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Recognized clause keyword.
    Keyword(Keyword),
    /// Bare or backtick-quoted identifier.
    Identifier,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// Run of `=<>!+-*/%`.
    Operator,
    /// Single- or double-quoted literal.
    String,
    /// Digits with optional interior dots.
    Number,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `-- line` or `/* block */` comment.
    Comment,
    Whitespace,
    Unknown,
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Returns the keyword if this token is one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Identifier)
    }

    /// Identifiers and keywords, i.e. anything that reads as a word.
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Keyword(_))
    }

    /// Whitespace and comments; skipped by every scanner.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}
