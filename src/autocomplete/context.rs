//! Cursor context resolution.
//!
//! Turns `(text, cursor)` into everything the suggestion builder needs: the
//! word being typed, dotted prefixes, the clause and the tables in scope.
//! The text is re-tokenized on every call.
use crate::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlContext {
    pub clause_type: ClauseType,
    pub from_tables: Vec<TableReference>,
    /// Table named by the enclosing `UPDATE` / `INSERT INTO`, if any.
    pub target_table: Option<TableReference>,
    /// The word up to the cursor; empty when the cursor is not on a word.
    pub current_word: String,
    /// Offset where `current_word` starts (the cursor when it is empty).
    pub word_start: usize,
    pub is_after_dot: bool,
    /// Identifier before the dot (`x` in `x.`), or the first part of `a.b.`.
    pub database_prefix: Option<String>,
    /// Middle part of `a.b.` while typing the third component.
    pub table_prefix: Option<String>,
    /// Caller-supplied UI state, passed through untouched.
    pub selected_database: Option<String>,
}

impl SqlContext {
    /// Tables visible to column completion: FROM/JOIN references, or the
    /// statement target when there are none.
    pub fn visible_tables(&self) -> Vec<&TableReference> {
        if self.from_tables.is_empty() {
            self.target_table.iter().collect()
        } else {
            self.from_tables.iter().collect()
        }
    }
}

/// Resolve the completion context at byte offset `cursor` in `sql`.
///
/// Never fails: empty or malformed input yields a context with
/// `ClauseType::Unknown`, no tables and no dotted prefixes.
pub fn resolve(sql: &str, cursor: usize, selected_database: Option<&str>) -> SqlContext {
    let cursor = cursor.min(sql.len());
    let tokens = tokenize(sql);

    let mut context = SqlContext {
        from_tables: extract_tables(&tokens),
        word_start: cursor,
        selected_database: selected_database.map(str::to_string),
        ..Default::default()
    };

    let Some(idx) = cursor_token(&tokens, cursor) else {
        trace!("No token at cursor {cursor}");
        return context;
    };
    let token = &tokens[idx];

    if token.kind.is_word() {
        context.current_word = word_prefix(sql, token, cursor);
        context.word_start = token.start;
    }

    let dot_idx = match token.kind {
        TokenKind::Dot => Some(idx),
        kind if kind.is_word() && idx > 0 && tokens[idx - 1].kind == TokenKind::Dot => {
            Some(idx - 1)
        }
        _ => None,
    };
    if let Some(dot) = dot_idx {
        context.is_after_dot = true;
        let near = dot.checked_sub(1).and_then(|i| tokens[i].word());
        let far = dot
            .checked_sub(2)
            .filter(|&i| tokens[i].kind == TokenKind::Dot)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| tokens[i].word());
        match (far, near) {
            (Some(database), Some(table)) => {
                context.database_prefix = Some(database.to_string());
                context.table_prefix = Some(table.to_string());
            }
            (None, Some(prefix)) => context.database_prefix = Some(prefix.to_string()),
            _ => {}
        }
    }

    context.clause_type = classify(&tokens, idx);
    context.target_table = extract_target(&tokens, idx);

    trace!(
        "Resolved cursor {cursor}: clause={} word={:?} after_dot={} prefix={:?}.{:?} tables={}",
        context.clause_type,
        context.current_word,
        context.is_after_dot,
        context.database_prefix,
        context.table_prefix,
        context.from_tables.len()
    );
    context
}

/// Index of the token the cursor belongs to.
///
/// A cursor sitting right after a word or dot belongs to that token (it is
/// the one being typed). Otherwise the token containing the cursor wins,
/// falling back to the last token ending at or before it.
fn cursor_token(tokens: &[Token], cursor: usize) -> Option<usize> {
    let left = tokens.iter().rposition(|t| t.end <= cursor);
    if let Some(i) = left {
        let t = &tokens[i];
        if t.end == cursor && (t.kind.is_word() || t.kind == TokenKind::Dot) {
            return Some(i);
        }
    }
    tokens.iter().position(|t| t.contains(cursor)).or(left)
}

/// The part of a word token before the cursor, unquoted for backtick identifiers.
fn word_prefix(sql: &str, token: &Token, cursor: usize) -> String {
    if cursor >= token.end {
        return token.value.clone();
    }
    let raw = sql.get(token.start..cursor).unwrap_or_default();
    raw.strip_prefix('`').unwrap_or(raw).to_string()
}
