//! Cursor clause classification.
//!
//! A backward scan from the cursor token to the nearest keyword that names a
//! clause. Last keyword wins: nesting is not tracked, so a `WHERE` inside a
//! subquery reads the same as a top-level one.
use crate::*;
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum ClauseType {
    #[display("SELECT")]
    Select,
    #[display("FROM")]
    From,
    #[display("WHERE")]
    Where,
    #[display("JOIN")]
    Join,
    #[display("ON")]
    On,
    #[display("GROUP_BY")]
    GroupBy,
    #[display("ORDER_BY")]
    OrderBy,
    #[display("HAVING")]
    Having,
    #[display("INSERT")]
    Insert,
    #[display("UPDATE")]
    Update,
    #[display("DELETE")]
    Delete,
    #[display("SET")]
    Set,
    #[display("VALUES")]
    Values,
    #[default]
    #[display("UNKNOWN")]
    Unknown,
}

impl ClauseType {
    /// Single-keyword mapping. `BY` and `INTO` depend on their predecessor
    /// and are handled by `classify`.
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        let clause = match keyword {
            Keyword::Select => ClauseType::Select,
            Keyword::From => ClauseType::From,
            Keyword::Where => ClauseType::Where,
            kw if kw.is_join_like() => ClauseType::Join,
            Keyword::On => ClauseType::On,
            Keyword::Having => ClauseType::Having,
            Keyword::Insert => ClauseType::Insert,
            Keyword::Update => ClauseType::Update,
            Keyword::Delete => ClauseType::Delete,
            Keyword::Set => ClauseType::Set,
            Keyword::Values => ClauseType::Values,
            _ => return None,
        };
        Some(clause)
    }

    /// Clauses whose expressions reference columns, where `x.` is looked up
    /// as an alias or table before being treated as a database.
    pub fn is_column_bearing(self) -> bool {
        matches!(
            self,
            ClauseType::Select
                | ClauseType::Where
                | ClauseType::On
                | ClauseType::GroupBy
                | ClauseType::OrderBy
                | ClauseType::Having
                | ClauseType::Set
        )
    }

    /// Clauses that expect a table name next.
    pub fn expects_table(self) -> bool {
        matches!(
            self,
            ClauseType::From | ClauseType::Join | ClauseType::Update | ClauseType::Delete
        )
    }
}

/// Classify the clause containing `cursor_index`.
///
/// Scans from `cursor_index` (inclusive, clamped to the last token) back to
/// the start. Keywords that name no clause are skipped. Returns
/// `ClauseType::Unknown` when nothing matches or `tokens` is empty.
pub fn classify(tokens: &[Token], cursor_index: usize) -> ClauseType {
    let Some(last) = tokens.len().checked_sub(1) else {
        return ClauseType::Unknown;
    };

    for idx in (0..=cursor_index.min(last)).rev() {
        let Some(keyword) = tokens[idx].kind.keyword() else {
            continue;
        };
        let clause = match keyword {
            Keyword::By => match previous_keyword(tokens, idx) {
                Some(Keyword::Group) => Some(ClauseType::GroupBy),
                Some(Keyword::Order) => Some(ClauseType::OrderBy),
                _ => None,
            },
            Keyword::Into => {
                (previous_keyword(tokens, idx) == Some(Keyword::Insert)).then_some(ClauseType::Insert)
            }
            other => ClauseType::from_keyword(other),
        };
        if let Some(clause) = clause {
            return clause;
        }
    }

    ClauseType::Unknown
}

/// Keyword of the nearest non-trivia token before `idx`, if that token is one.
fn previous_keyword(tokens: &[Token], idx: usize) -> Option<Keyword> {
    tokens[..idx]
        .iter()
        .rev()
        .find(|t| !t.is_trivia())
        .and_then(|t| t.kind.keyword())
}
