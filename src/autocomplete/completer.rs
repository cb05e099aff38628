//! End-to-end completion: resolve, fetch metadata, build, rank, remember.
use crate::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSuggestion {
    pub suggestion: Suggestion,
    pub sort_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub context: SqlContext,
    /// Word range the chosen suggestion replaces.
    pub range: EditorRange,
    pub items: Vec<RankedSuggestion>,
}

/// Attach usage-aware sort keys and order by them. Ties keep build order.
pub fn rank<S, C>(tracker: &UsageTracker<S, C>, suggestions: Suggestions) -> Vec<RankedSuggestion> {
    let mut ranked: Vec<_> = suggestions
        .into_iter()
        .map(|suggestion| RankedSuggestion {
            sort_text: tracker.sort_text(&suggestion.label, suggestion.category),
            suggestion,
        })
        .collect();
    ranked.sort_by(|a, b| a.sort_text.cmp(&b.sort_text));
    ranked
}

pub struct Completer<P, S, C = SystemClock> {
    metadata: MetadataCache<P>,
    tracker: UsageTracker<S, C>,
}

impl<P: MetadataProvider, S: KeyValueStore, C: Clock> Completer<P, S, C> {
    pub fn new(metadata: MetadataCache<P>, tracker: UsageTracker<S, C>) -> Self {
        Self { metadata, tracker }
    }

    pub fn metadata(&self) -> &MetadataCache<P> {
        &self.metadata
    }

    pub fn tracker(&self) -> &UsageTracker<S, C> {
        &self.tracker
    }

    pub async fn switch_connection(&mut self, connection: &str) {
        self.tracker.switch_connection(connection).await;
    }

    pub async fn complete(
        &mut self,
        sql: &str,
        cursor: usize,
        selected_database: Option<&str>,
    ) -> Completion {
        let cursor = cursor.min(sql.len());
        let context = resolve(sql, cursor, selected_database);
        let connection = self.tracker.connection().unwrap_or_default().to_string();

        let (schema, functions, keywords) = tokio::join!(
            self.metadata.schema(&connection),
            self.metadata.functions(&connection),
            self.metadata.keywords(&connection),
        );
        let schema = schema.unwrap_or_else(|e| {
            warn!("Completing without schema: {e}");
            Arc::default()
        });
        let functions = functions.unwrap_or_else(|e| {
            warn!("Completing without functions: {e}");
            Arc::default()
        });
        let keywords = keywords.unwrap_or_else(|e| {
            warn!("Completing without keywords: {e}");
            Arc::default()
        });

        let items = rank(
            &self.tracker,
            build_suggestions(&context, &schema, &functions, &keywords),
        );
        let range = EditorRange::from_offsets(sql, context.word_start, cursor);
        let shown: Suggestions = items.iter().map(|i| i.suggestion.clone()).collect();
        self.tracker.record_pending_suggestions(&shown, range);

        debug!(
            "{} suggestions for {} at {cursor}",
            items.len(),
            context.clause_type
        );
        Completion {
            context,
            range,
            items,
        }
    }

    /// Forward an editor edit to acceptance tracking.
    pub async fn on_edit(&mut self, edit: &TextEdit, current_text: &str) -> Option<String> {
        self.tracker
            .check_for_accepted_suggestion(edit, current_text)
            .await
    }
}
