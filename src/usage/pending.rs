use crate::*;
use std::time::Duration;

/// A suggestion that was shown and may still be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSuggestion {
    pub label: String,
    pub key: String,
    pub category: Category,
    /// Word range the suggestion would replace.
    pub range: EditorRange,
    pub timestamp: i64,
}

impl PendingSuggestion {
    pub fn new(suggestion: &Suggestion, range: EditorRange, timestamp: i64) -> Self {
        Self {
            label: suggestion.label.clone(),
            key: suggestion.key(),
            category: suggestion.category,
            range,
            timestamp,
        }
    }

    pub fn is_expired(&self, now: i64, window: Duration) -> bool {
        let window = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(self.timestamp) > window
    }

    /// Whether `edit` looks like this suggestion being inserted: it starts at
    /// or after the word, ends no further than the word plus the label, and
    /// inserts text containing the label.
    pub fn matches(&self, edit: &TextEdit) -> bool {
        let changed = &edit.changed_range;
        let label_len = u32::try_from(self.label.chars().count()).unwrap_or(u32::MAX);

        changed.start() >= self.range.start()
            && changed.end_column <= self.range.end_column.saturating_add(label_len)
            && edit.inserted_text.contains(&self.label)
    }
}
