//! Per-connection suggestion usage tracking.
//!
//! Shown suggestions are kept as pending for a short window. An editor edit
//! that looks like one of them being inserted counts as an acceptance, and
//! accepted labels rank higher in later completions.
use crate::*;
use std::time::Duration;

pub const STORAGE_KEY_PREFIX: &str = "qsense.usage.";

pub struct UsageTracker<S, C = SystemClock> {
    store: S,
    clock: C,
    match_window: Duration,
    connection: Option<String>,
    data: UsageData,
    pending: Vec<PendingSuggestion>,
}

impl<S: KeyValueStore> UsageTracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S, C> UsageTracker<S, C> {
    pub fn storage_key(connection: &str) -> String {
        format!("{STORAGE_KEY_PREFIX}{connection}")
    }

    pub fn with_match_window(mut self, window: Duration) -> Self {
        self.match_window = window;
        self
    }

    pub fn connection(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    pub fn data(&self) -> &UsageData {
        &self.data
    }

    pub fn pending(&self) -> &[PendingSuggestion] {
        &self.pending
    }

    pub fn usage_count(&self, label: &str, category: Category) -> u64 {
        self.data.count(&UsageData::key(category, label))
    }

    /// Lexicographic sort key for a suggestion, e.g. `"09-user_id"`.
    pub fn sort_text(&self, label: &str, category: Category) -> String {
        sort_text_for(label, category, self.usage_count(label, category))
    }
}

impl<S: KeyValueStore, C: Clock> UsageTracker<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            store,
            clock,
            match_window: config().match_window(),
            connection: None,
            data: UsageData::empty(now),
            pending: Vec::new(),
        }
    }

    /// Make `connection` current, loading its stored usage. Switching to the
    /// current connection is a no-op. Pending suggestions never carry over.
    pub async fn switch_connection(&mut self, connection: &str) {
        if self.connection.as_deref() == Some(connection) {
            return;
        }
        info!("Switching usage data to connection {connection}");
        self.pending.clear();
        self.data = self.load(connection).await;
        self.connection = Some(connection.to_string());
    }

    async fn load(&self, connection: &str) -> UsageData {
        let now = self.clock.now_ms();
        let raw = match self.store.get(&Self::storage_key(connection)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return UsageData::empty(now),
            Err(e) => {
                warn!("Failed to load usage data for {connection}: {e}");
                return UsageData::empty(now);
            }
        };

        match UsageData::from_json(&raw) {
            Ok(Some(data)) => {
                debug!("Loaded {} usage entries for {connection}", data.items.len());
                data
            }
            Ok(None) => {
                debug!("Discarding usage data for {connection}: version mismatch");
                UsageData::empty(now)
            }
            Err(e) => {
                warn!("Discarding unreadable usage data for {connection}: {e}");
                UsageData::empty(now)
            }
        }
    }

    async fn persist(&mut self) {
        self.data.last_updated = self.clock.now_ms();
        let Some(connection) = self.connection.as_deref() else {
            trace!("No connection selected, usage kept in memory");
            return;
        };

        let result = match self.data.to_json() {
            Ok(json) => self.store.set(&Self::storage_key(connection), json).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!("Failed to persist usage data for {connection}: {e}");
        }
    }

    /// Remember what was just shown. Entries older than the match window are
    /// dropped first.
    pub fn record_pending_suggestions(&mut self, suggestions: &[Suggestion], range: EditorRange) {
        let now = self.clock.now_ms();
        let window = self.match_window;
        self.pending.retain(|p| !p.is_expired(now, window));
        self.pending.extend(
            suggestions
                .iter()
                .map(|s| PendingSuggestion::new(s, range, now)),
        );
    }

    /// Match an editor edit against pending suggestions and count the first
    /// hit. Returns the usage key of the accepted suggestion.
    ///
    /// The label must also be present in `current_text`. Every pending entry
    /// with the accepted key is dropped so the same acceptance is never
    /// counted twice.
    pub async fn check_for_accepted_suggestion(
        &mut self,
        edit: &TextEdit,
        current_text: &str,
    ) -> Option<String> {
        let now = self.clock.now_ms();
        let window = self.match_window;
        let idx = self.pending.iter().position(|p| {
            !p.is_expired(now, window) && p.matches(edit) && current_text.contains(&p.label)
        })?;

        let accepted = self.pending.remove(idx);
        self.pending.retain(|p| p.key != accepted.key);
        let count = self
            .data
            .record(accepted.key.clone(), accepted.category, now);
        debug!("Accepted {} ({count} uses)", accepted.key);
        self.persist().await;
        Some(accepted.key)
    }

    pub async fn clear_usage_data(&mut self) {
        info!("Clearing usage data");
        self.data = UsageData::empty(self.clock.now_ms());
        self.pending.clear();
        self.persist().await;
    }
}

/// `"{priority:02}-{label}"`: the category's base priority minus a usage
/// boost of `min(9, floor(log2(count + 1)))`, never below 1.
pub fn sort_text_for(label: &str, category: Category, usage_count: u64) -> String {
    let boost = usage_count.saturating_add(1).ilog2().min(9);
    let priority = category.base_priority().saturating_sub(boost).max(1);
    format!("{priority:02}-{}", label.to_lowercase())
}
