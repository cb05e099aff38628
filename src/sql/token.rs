//! Token model tying a `TokenKind` and its text to a source span.
//!
//! Offsets let the context resolver compare tokens against a cursor offset
//! and slice the original query without a reconstructed string. Tokens are
//! never mutated after the tokenizer produces them.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// `value` is the token's text. It equals `sql[start..end]` for every kind
/// except backtick identifiers, whose value is the unescaped inner text.
///
/// Invariants:
/// - `end >= start`
/// - `[start, end)` is a valid slice range for the original input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    /// Byte length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the identifier text if this token is an identifier.
    pub fn ident(&self) -> Option<&str> {
        self.kind.is_ident().then_some(self.value.as_str())
    }

    /// Returns the text of identifiers and keywords.
    pub fn word(&self) -> Option<&str> {
        self.kind.is_word().then_some(self.value.as_str())
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Returns true if the cursor (byte offset) lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `cursor == end` returns false.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start && cursor < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{keyword::Keyword, token_kind::TokenKind};

    #[test]
    fn length_and_empty() {
        let t = Token::new(TokenKind::Comma, ",", 5, 6);
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
    }

    #[test]
    fn ident_access() {
        let t = Token::new(TokenKind::Identifier, "Users", 0, 5);
        assert_eq!(t.ident(), Some("Users"));
        assert_eq!(t.word(), Some("Users"));
        assert!(t.contains(2));
        assert!(!t.contains(5));
    }

    #[test]
    fn keyword_is_word_but_not_ident() {
        let t = Token::new(TokenKind::Keyword(Keyword::Select), "select", 0, 6);
        assert!(t.is_keyword(Keyword::Select));
        assert_eq!(t.ident(), None);
        assert_eq!(t.word(), Some("select"));
    }
}
