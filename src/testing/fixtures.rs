use crate::*;
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// `shop` (users, orders, products) and `analytics` (events, users).
pub fn sample_schema() -> Schema {
    let mut schema = Schema::new();
    for (database, table, columns) in [
        (
            "shop",
            "users",
            vec![("id", "INT"), ("name", "VARCHAR"), ("email", "VARCHAR")],
        ),
        (
            "shop",
            "orders",
            vec![
                ("id", "INT"),
                ("user_id", "INT"),
                ("total", "DECIMAL"),
                ("created_at", "DATETIME"),
            ],
        ),
        (
            "shop",
            "products",
            vec![("id", "INT"), ("title", "VARCHAR"), ("price", "DECIMAL")],
        ),
        (
            "analytics",
            "events",
            vec![("id", "BIGINT"), ("user_id", "INT"), ("kind", "VARCHAR")],
        ),
        (
            "analytics",
            "users",
            vec![("uid", "INT"), ("segment", "VARCHAR")],
        ),
    ] {
        schema.insert_table(database, Table::new_with_ordered(table, columns));
    }
    schema
}

pub fn sample_functions() -> Vec<String> {
    ["COUNT", "SUM", "NOW"].map(String::from).to_vec()
}

pub fn sample_keywords() -> Vec<String> {
    ["SELECT", "FROM", "WHERE", "AND", "ORDER"]
        .map(String::from)
        .to_vec()
}

pub fn sample_provider() -> StaticProvider {
    StaticProvider::new(sample_schema())
        .with_functions(sample_functions())
        .with_keywords(sample_keywords())
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn at(now_ms: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now_ms)))
    }

    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Store whose every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Err(Error::Store(format!("read {key}: unavailable")))
    }

    async fn set(&self, key: &str, _value: String) -> Result {
        Err(Error::Store(format!("write {key}: unavailable")))
    }
}
