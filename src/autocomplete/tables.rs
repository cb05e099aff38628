//! FROM / JOIN table reference extraction.
//!
//! The scan always covers the full token stream, so tables joined after the
//! cursor are still in scope for completion.
use crate::*;

/// One `[database.]table [[AS] alias]` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub database: Option<String>,
    pub table: String,
    pub alias: Option<String>,
    /// Offset just past the table name where an alias could be appended.
    /// `None` once an alias is written.
    pub end_position: Option<usize>,
    /// Offset just past the table name (after `database.table` if qualified).
    pub name_end: usize,
}

impl TableReference {
    /// The name this reference is addressed by in expressions.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }
}

/// Extract every table reference following `FROM` or `JOIN`, in source order.
///
/// Join modifiers (`LEFT`, `INNER OUTER`, ...) are separate keyword tokens
/// and never trigger a read, so `LEFT JOIN t` reads `t` exactly once. A comma
/// after a reference continues the list (`FROM a, b`).
pub fn extract_tables(tokens: &[Token]) -> Vec<TableReference> {
    let mut refs = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let t = &tokens[i];
        if t.is_keyword(Keyword::From) || t.is_keyword(Keyword::Join) {
            i = read_reference_list(tokens, i + 1, &mut refs);
            continue;
        }
        i += 1;
    }

    refs
}

/// The table named by the nearest `UPDATE t` or `INSERT INTO t` at or before
/// `cursor_index`, stopping at a `;` statement separator.
pub fn extract_target(tokens: &[Token], cursor_index: usize) -> Option<TableReference> {
    let last = tokens.len().checked_sub(1)?;

    for idx in (0..=cursor_index.min(last)).rev() {
        let t = &tokens[idx];
        if t.kind == TokenKind::Unknown && t.value == ";" {
            return None;
        }
        if t.is_keyword(Keyword::Update) {
            return read_reference(tokens, idx + 1).map(|(r, _)| r);
        }
        if t.is_keyword(Keyword::Into) {
            let before = tokens[..idx].iter().rev().find(|t| !t.is_trivia());
            if before.is_some_and(|t| t.is_keyword(Keyword::Insert)) {
                return read_reference(tokens, idx + 1).map(|(r, _)| r);
            }
        }
    }

    None
}

fn read_reference_list(tokens: &[Token], mut i: usize, refs: &mut Vec<TableReference>) -> usize {
    while let Some((reference, next)) = read_reference(tokens, i) {
        refs.push(reference);
        i = next;

        let after = skip_trivia(tokens, i);
        match tokens.get(after) {
            Some(t) if t.kind == TokenKind::Comma => i = after + 1,
            _ => break,
        }
    }
    i
}

/// Read one reference starting at `i`. Returns it with the index of the first
/// token not consumed.
fn read_reference(tokens: &[Token], i: usize) -> Option<(TableReference, usize)> {
    let first_idx = skip_trivia(tokens, i);
    let first = tokens.get(first_idx).and_then(Token::ident)?;

    let mut next = first_idx + 1;
    let mut database = None;
    let mut table = first;
    let mut name_end = tokens[first_idx].end;

    let dot_idx = skip_trivia(tokens, next);
    if tokens.get(dot_idx).is_some_and(|t| t.kind == TokenKind::Dot) {
        let table_idx = skip_trivia(tokens, dot_idx + 1);
        let table_token = tokens.get(table_idx).filter(|t| t.kind.is_ident())?;
        database = Some(first.to_string());
        table = table_token.value.as_str();
        name_end = table_token.end;
        next = table_idx + 1;
    }

    let mut alias_idx = skip_trivia(tokens, next);
    if tokens.get(alias_idx).is_some_and(|t| t.is_keyword(Keyword::As)) {
        next = alias_idx + 1;
        alias_idx = skip_trivia(tokens, next);
    }
    let alias = tokens.get(alias_idx).and_then(Token::ident).map(str::to_string);
    if alias.is_some() {
        next = alias_idx + 1;
    }

    let reference = TableReference {
        database,
        table: table.to_string(),
        end_position: alias.is_none().then_some(name_end),
        alias,
        name_end,
    };
    Some((reference, next))
}

fn skip_trivia(tokens: &[Token], mut i: usize) -> usize {
    while tokens.get(i).is_some_and(Token::is_trivia) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tables(sql: &str) -> Vec<TableReference> {
        extract_tables(&tokenize(sql))
    }

    fn reference(
        database: Option<&str>,
        table: &str,
        alias: Option<&str>,
        name_end: usize,
    ) -> TableReference {
        TableReference {
            database: database.map(str::to_string),
            table: table.to_string(),
            alias: alias.map(str::to_string),
            end_position: alias.is_none().then_some(name_end),
            name_end,
        }
    }

    #[test]
    fn qualified_table_without_alias() {
        let sql = "SELECT * FROM mydb.Product";
        assert_eq!(
            tables(sql),
            vec![reference(Some("mydb"), "Product", None, sql.len())]
        );
    }

    #[test]
    fn alias_then_bare_join() {
        let refs = tables("SELECT * FROM Orders o JOIN Product");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].alias.as_deref(), Some("o"));
        assert_eq!(refs[0].end_position, None);
        assert_eq!(refs[1].alias, None);
        assert_eq!(refs[1].end_position, Some(35));
    }

    #[rstest]
    #[case("FROM users AS u", reference(None, "users", Some("u"), 10))]
    #[case("FROM users u WHERE u.id = 1", reference(None, "users", Some("u"), 10))]
    #[case("FROM users WHERE id = 1", reference(None, "users", None, 10))]
    #[case("FROM users AS ", reference(None, "users", None, 10))]
    #[case("FROM `my table` t", reference(None, "my table", Some("t"), 15))]
    #[case("FROM db . users", reference(Some("db"), "users", None, 15))]
    #[case("FROM /* c */ users;", reference(None, "users", None, 18))]
    fn single_reference_shapes(#[case] sql: &str, #[case] expected: TableReference) {
        assert_eq!(tables(sql), vec![expected]);
    }

    #[test]
    fn compound_joins_trigger_once() {
        let refs = tables("FROM a LEFT JOIN b ON a.id = b.id INNER JOIN c cc RIGHT OUTER JOIN d");
        let names: Vec<_> = refs.iter().map(|r| r.table.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(refs[0].alias, None);
        assert_eq!(refs[2].alias.as_deref(), Some("cc"));
    }

    #[test]
    fn comma_lists_continue() {
        let refs = tables("SELECT * FROM a, db.b bb , c WHERE 1");
        assert_eq!(
            refs,
            vec![
                reference(None, "a", None, 15),
                reference(Some("db"), "b", Some("bb"), 21),
                reference(None, "c", None, 28),
            ]
        );
    }

    #[test]
    fn tables_after_cursor_and_in_subqueries_are_found() {
        let refs = tables("SELECT * FROM (SELECT id FROM inner_t) s JOIN outer_t");
        let names: Vec<_> = refs.iter().map(|r| r.table.as_str()).collect();
        assert_eq!(names, ["inner_t", "outer_t"]);
    }

    #[rstest]
    #[case("")]
    #[case("SELECT 1")]
    #[case("SELECT * FROM")]
    #[case("SELECT * FROM WHERE")]
    #[case("SELECT * FROM db.")]
    #[case("FROM 'x'")]
    fn incomplete_input_yields_nothing(#[case] sql: &str) {
        assert!(tables(sql).is_empty());
    }

    #[rstest]
    #[case("UPDATE users u SET ", Some(("users", Some("u"))))]
    #[case("INSERT INTO shop.orders (id) VALUES (", Some(("orders", None)))]
    #[case("INSERT INTO ", None)]
    #[case("SELECT * FROM t", None)]
    #[case("UPDATE a SET x = 1; SELECT ", None)]
    fn target_table(#[case] sql: &str, #[case] expected: Option<(&str, Option<&str>)>) {
        let tokens = tokenize(sql);
        let target = extract_target(&tokens, tokens.len());
        assert_eq!(
            target
                .as_ref()
                .map(|r| (r.table.as_str(), r.alias.as_deref())),
            expected
        );
    }

    #[test]
    fn qualifier_prefers_alias() {
        assert_eq!(reference(None, "users", Some("u"), 0).qualifier(), "u");
        assert_eq!(reference(None, "users", None, 0).qualifier(), "users");
    }
}
