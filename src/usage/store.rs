//! Key-value persistence for usage records.
use crate::*;
use std::{
    collections::HashMap,
    future::Future,
    io,
    path::PathBuf,
    sync::Arc,
};
use tokio::sync::RwLock;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result> + Send;
}

impl<S: KeyValueStore> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result> + Send {
        self.as_ref().set(key, value)
    }
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the configured usage directory.
    pub fn from_config() -> Self {
        Self::new(&config().usage_dir)
    }

    /// File for `key`. Bytes outside `[A-Za-z0-9.-]` are written as `%XX`,
    /// so distinct keys never share a file.
    fn path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for b in key.bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => name.push(b as char),
                _ => name.push_str(&format!("%{b:02X}")),
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(key);
        // Atomic replace.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        trace!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[tokio::test]
    async fn memory_store_round_trip() -> Result {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.get("k").await?, None);

        store.set("k", "v1".into()).await?;
        store.set("k", "v2".into()).await?;
        assert_eq!(store.get("k").await?.as_deref(), Some("v2"));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn shared_store_sees_writes() -> Result {
        let store = Arc::new(MemoryStore::new());
        let shared = Arc::clone(&store);
        shared.set("k", "v".into()).await?;
        assert_eq!(store.get("k").await?.as_deref(), Some("v"));
        Ok(())
    }

    #[test_context(TempUsageDir)]
    #[tokio::test]
    async fn file_store_round_trip(ctx: &mut TempUsageDir) -> Result {
        let store = FileStore::new(&ctx.dir);
        assert_eq!(store.get("qsense.usage.local").await?, None);

        store.set("qsense.usage.local", "{}".into()).await?;
        assert_eq!(store.get("qsense.usage.local").await?.as_deref(), Some("{}"));
        assert!(ctx.dir.join("qsense.usage.local.json").is_file());
        Ok(())
    }

    #[test_context(TempUsageDir)]
    #[tokio::test]
    async fn file_store_escapes_keys(ctx: &mut TempUsageDir) -> Result {
        let store = FileStore::new(&ctx.dir);
        store.set("qsense.usage.pg://db/1", "x".into()).await?;
        assert!(ctx.dir.join("qsense.usage.pg%3A%2F%2Fdb%2F1.json").is_file());
        assert_eq!(store.get("qsense.usage.pg://db/1").await?.as_deref(), Some("x"));
        Ok(())
    }

    #[rstest]
    #[case("prod/main", "prod_main")]
    #[case("prod_main", "prod%5Fmain")]
    #[case("a b", "a_b")]
    #[case("café", "caf%C3%A9")]
    fn distinct_keys_get_distinct_files(#[case] a: &str, #[case] b: &str) {
        let store = FileStore::new("usage");
        assert_ne!(store.path(a), store.path(b));
    }

    #[test_context(TempUsageDir)]
    #[tokio::test]
    async fn similar_connection_keys_do_not_share_records(ctx: &mut TempUsageDir) -> Result {
        let store = FileStore::new(&ctx.dir);
        let slash = UsageTracker::<FileStore>::storage_key("prod/main");
        let underscore = UsageTracker::<FileStore>::storage_key("prod_main");

        store.set(&slash, "A".into()).await?;
        assert_eq!(store.get(&underscore).await?, None);

        store.set(&underscore, "B".into()).await?;
        assert_eq!(store.get(&slash).await?.as_deref(), Some("A"));
        assert_eq!(store.get(&underscore).await?.as_deref(), Some("B"));
        Ok(())
    }

    #[test_context(TempUsageDir)]
    #[tokio::test]
    async fn unreadable_path_is_an_error(ctx: &mut TempUsageDir) -> Result {
        tokio::fs::create_dir_all(ctx.dir.join("blocked.json")).await?;
        let store = FileStore::new(&ctx.dir);
        assert!(matches!(store.get("blocked").await, Err(Error::Io(_))));
        Ok(())
    }
}
