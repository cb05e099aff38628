//! Persisted usage record.
//!
//! Shape on disk:
//! ```text
//! { "version": 1, "lastUpdated": <ms>,
//!   "items": { "<category>:<label>": { "count": n, "lastUsed": <ms>, "category": "column" } } }
//! ```
use crate::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const USAGE_DATA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub count: u64,
    pub last_used: i64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageData {
    pub version: u32,
    pub last_updated: i64,
    pub items: BTreeMap<String, UsageEntry>,
}

impl UsageData {
    pub fn empty(now: i64) -> Self {
        Self {
            version: USAGE_DATA_VERSION,
            last_updated: now,
            items: BTreeMap::new(),
        }
    }

    pub fn key(category: Category, label: &str) -> String {
        format!("{category}:{label}")
    }

    pub fn count(&self, key: &str) -> u64 {
        self.items.get(key).map_or(0, |e| e.count)
    }

    /// Count one acceptance of `key`, returning the new total.
    pub fn record(&mut self, key: String, category: Category, now: i64) -> u64 {
        let entry = self.items.entry(key).or_insert(UsageEntry {
            count: 0,
            last_used: now,
            category,
        });
        entry.count += 1;
        entry.last_used = now;
        self.last_updated = now;
        entry.count
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored record. `Ok(None)` means the record has another
    /// version and must be replaced, not migrated.
    pub fn from_json(raw: &str) -> Result<Option<Self>> {
        #[derive(Deserialize)]
        struct Version {
            version: u32,
        }

        let Version { version } = serde_json::from_str(raw)?;
        if version != USAGE_DATA_VERSION {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(raw)?))
    }
}
