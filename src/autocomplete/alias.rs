use crate::*;
use std::collections::HashSet;

/// Produce a short alias for `table_name` that is not in `existing`.
///
/// Candidates, first free one wins: the first alphabetic character, the
/// first two characters, then the first candidate suffixed with 1, 2, ...
/// Everything is lower-cased and `existing` must hold lower-cased aliases.
/// An empty name always yields `t`.
pub fn generate_alias(table_name: &str, existing: &HashSet<String>) -> String {
    if table_name.is_empty() {
        return "t".to_string();
    }

    let base: String = table_name
        .chars()
        .find(|c| c.is_alphabetic())
        .map_or_else(|| "t".to_string(), |c| c.to_lowercase().collect());
    if !existing.contains(&base) {
        return base;
    }

    let two: String = table_name.chars().take(2).flat_map(char::to_lowercase).collect();
    if !existing.contains(&two) {
        return two;
    }

    let mut n = 1;
    loop {
        let candidate = format!("{base}{n}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// An alias to splice into the query text at `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasInsertion {
    pub position: usize,
    pub table: String,
    pub alias: String,
}

/// Generate aliases for every reference that has no alias yet.
///
/// Aliases already written in `refs` are added to `existing` first, and each
/// generated alias is added before the next one is requested, so one batch
/// never produces duplicates.
pub fn alias_insertions(
    refs: &[TableReference],
    existing: &mut HashSet<String>,
) -> Vec<AliasInsertion> {
    existing.extend(
        refs.iter()
            .filter_map(|r| r.alias.as_deref())
            .map(str::to_lowercase),
    );

    refs.iter()
        .filter_map(|r| {
            let position = r.end_position?;
            let alias = generate_alias(&r.table, existing);
            existing.insert(alias.to_lowercase());
            Some(AliasInsertion {
                position,
                table: r.table.clone(),
                alias,
            })
        })
        .collect()
}

/// Apply insertions to `sql`, writing ` alias` at each position.
///
/// Positions outside the text or off a character boundary are skipped.
pub fn apply_alias_insertions(sql: &str, insertions: &[AliasInsertion]) -> String {
    let mut ordered: Vec<&AliasInsertion> = insertions.iter().collect();
    ordered.sort_by(|a, b| b.position.cmp(&a.position));

    let mut out = sql.to_string();
    for insertion in ordered {
        if !out.is_char_boundary(insertion.position) {
            warn!(
                "Skipping alias {} at invalid offset {}",
                insertion.alias, insertion.position
            );
            continue;
        }
        out.insert_str(insertion.position, &format!(" {}", insertion.alias));
    }
    out
}
