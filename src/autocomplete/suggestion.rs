use crate::*;
use derive_more::Display;
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

/// What a suggestion completes to. Also the usage-tracking category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display("column")]
    Column,
    #[display("table")]
    Table,
    #[display("database")]
    Database,
    #[display("function")]
    Function,
    #[display("keyword")]
    Keyword,
    #[display("operator")]
    Operator,
}

impl Category {
    /// Sort priority before any usage boost; lower is shown first.
    pub const fn base_priority(self) -> u32 {
        match self {
            Category::Column => 10,
            Category::Table => 20,
            Category::Database => 25,
            Category::Function => 30,
            Category::Keyword => 40,
            Category::Operator => 50,
        }
    }
}

/// Operators offered inside predicate clauses.
pub const OPERATORS: &[&str] = &[
    "=",
    "<>",
    "!=",
    "<",
    ">",
    "<=",
    ">=",
    "LIKE",
    "NOT LIKE",
    "IN",
    "NOT IN",
    "BETWEEN",
    "IS NULL",
    "IS NOT NULL",
    "AND",
    "OR",
];

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{category}:{label}")]
pub struct Suggestion {
    pub label: String,
    pub category: Category,
    /// Column type for columns, owning database for tables.
    pub detail: Option<String>,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, category: Category) -> Self {
        Self {
            label: label.into(),
            category,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Usage key, `"{category}:{label}"`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

pub type Suggestions = Vec<Suggestion>;

/// Build the candidate list for a resolved context.
///
/// Strategy:
/// 1. After a dot, resolve the prefix: `db.table.` gives that table's
///    columns. In column-bearing clauses `x.` is tried as an alias, then as a
///    table in scope, then as a database. Elsewhere it is a database.
/// 2. Otherwise pick candidates by clause (columns and functions in
///    expressions, tables and databases where a table name is expected).
/// 3. Keep candidates starting with `current_word` (case-insensitive) and
///    drop duplicates by category and lower-cased label, first one wins.
pub fn build_suggestions(
    context: &SqlContext,
    schema: &Schema,
    functions: &[String],
    keywords: &[String],
) -> Suggestions {
    let mut out = Vec::new();

    if context.is_after_dot {
        dotted(context, schema, &mut out);
    } else {
        match context.clause_type {
            ClauseType::Select | ClauseType::GroupBy | ClauseType::OrderBy => {
                expression(context, schema, &mut out);
                push_names(functions, Category::Function, &mut out);
                push_names(keywords, Category::Keyword, &mut out);
            }
            ClauseType::Where | ClauseType::Having | ClauseType::On => {
                expression(context, schema, &mut out);
                push_names(functions, Category::Function, &mut out);
                push_names(keywords, Category::Keyword, &mut out);
                push_names(OPERATORS, Category::Operator, &mut out);
            }
            ClauseType::Set => {
                for reference in context.target_table.iter().chain(&context.from_tables) {
                    table_columns(schema, context, reference, &mut out);
                }
                push_names(keywords, Category::Keyword, &mut out);
            }
            ClauseType::Insert => match &context.target_table {
                Some(target) if context.word_start > target.name_end => {
                    table_columns(schema, context, target, &mut out);
                }
                _ => {
                    tables(context, schema, &mut out);
                    push_names(keywords, Category::Keyword, &mut out);
                }
            },
            clause if clause.expects_table() => {
                tables(context, schema, &mut out);
                push_names(keywords, Category::Keyword, &mut out);
            }
            ClauseType::Values => {
                push_names(functions, Category::Function, &mut out);
                push_names(keywords, Category::Keyword, &mut out);
            }
            _ => push_names(keywords, Category::Keyword, &mut out),
        }
    }

    let word = context.current_word.to_lowercase();
    out.into_iter()
        .filter(|s| s.label.to_lowercase().starts_with(&word))
        .unique_by(|s| (s.category, s.label.to_lowercase()))
        .collect()
}

fn dotted(context: &SqlContext, schema: &Schema, out: &mut Suggestions) {
    let Some(prefix) = context.database_prefix.as_deref() else {
        return;
    };

    if let Some(table) = context.table_prefix.as_deref() {
        if let Some((_, table)) = schema.find_table(Some(prefix), table) {
            push_columns(table, out);
        }
        return;
    }

    if context.clause_type.is_column_bearing() {
        let visible = context.visible_tables();
        let by_alias = visible.iter().find(|r| {
            r.alias
                .as_deref()
                .is_some_and(|alias| eq_ignore_case(alias, prefix))
        });
        let by_table = || visible.iter().find(|r| eq_ignore_case(&r.table, prefix));
        if let Some(reference) = by_alias.or_else(by_table) {
            table_columns(schema, context, reference, out);
            return;
        }
    }

    if let Some(database) = schema.database(prefix) {
        push_tables(database, out);
    }
}

/// Columns of every visible table plus the names they are addressed by.
fn expression(context: &SqlContext, schema: &Schema, out: &mut Suggestions) {
    let visible = context.visible_tables();
    for reference in &visible {
        table_columns(schema, context, reference, out);
    }
    for reference in &visible {
        let mut suggestion = Suggestion::new(reference.qualifier(), Category::Table);
        if reference.alias.is_some() {
            suggestion = suggestion.with_detail(&reference.table);
        }
        out.push(suggestion);
    }
}

/// Tables of the selected database (every database when none is selected)
/// followed by database names.
fn tables(context: &SqlContext, schema: &Schema, out: &mut Suggestions) {
    match context
        .selected_database
        .as_deref()
        .and_then(|name| schema.database(name))
    {
        Some(database) => push_tables(database, out),
        None => schema.databases.iter().for_each(|db| push_tables(db, out)),
    }
    out.extend(
        schema
            .databases
            .iter()
            .map(|db| Suggestion::new(&db.name, Category::Database)),
    );
}

fn table_columns(
    schema: &Schema,
    context: &SqlContext,
    reference: &TableReference,
    out: &mut Suggestions,
) {
    let database = reference
        .database
        .as_deref()
        .or(context.selected_database.as_deref());
    match schema.find_table(database, &reference.table) {
        Some((_, table)) => push_columns(table, out),
        None => trace!("No metadata for table {}", reference.table),
    }
}

fn push_columns(table: &Table, out: &mut Suggestions) {
    out.extend(
        table
            .columns
            .iter()
            .map(|c| Suggestion::new(&c.name, Category::Column).with_detail(&c.data_type)),
    );
}

fn push_tables(database: &Database, out: &mut Suggestions) {
    out.extend(
        database
            .tables
            .iter()
            .map(|t| Suggestion::new(&t.name, Category::Table).with_detail(&database.name)),
    );
}

fn push_names<S: AsRef<str>>(names: &[S], category: Category, out: &mut Suggestions) {
    out.extend(names.iter().map(|n| Suggestion::new(n.as_ref(), category)));
}
