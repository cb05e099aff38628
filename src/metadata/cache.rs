//! Caller-owned metadata cache.
//!
//! Schema trees, function lists and keyword lists are cached independently per
//! connection with moka, so each can be refreshed on its own schedule. Nothing
//! here is global: the owner decides capacity, TTL and when to invalidate.
use super::*;
use crate::*;
use moka::future::Cache;
use std::{sync::Arc, time::Duration};

pub struct MetadataCache<P> {
    provider: P,
    schemas: Cache<String, Arc<Schema>>,
    functions: Cache<String, Arc<Vec<String>>>,
    keywords: Cache<String, Arc<Vec<String>>>,
}

impl<P: MetadataProvider> MetadataCache<P> {
    /// Create a cache sized from the global configuration.
    pub fn new(provider: P) -> Self {
        let config = config();
        Self::with_config(provider, config.metadata_capacity, config.metadata_ttl())
    }

    pub fn with_config(provider: P, capacity: u64, ttl: Duration) -> Self {
        Self {
            provider,
            schemas: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            functions: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            keywords: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn schema(&self, connection: &str) -> Result<Arc<Schema>> {
        self.schemas
            .try_get_with(connection.to_string(), async {
                debug!("Loading schema metadata for connection {connection}");
                self.provider.schema(connection).await.map(Arc::new)
            })
            .await
            .map_err(|e| Error::Metadata(e.to_string()))
    }

    pub async fn functions(&self, connection: &str) -> Result<Arc<Vec<String>>> {
        self.functions
            .try_get_with(connection.to_string(), async {
                self.provider.functions(connection).await.map(Arc::new)
            })
            .await
            .map_err(|e| Error::Metadata(e.to_string()))
    }

    pub async fn keywords(&self, connection: &str) -> Result<Arc<Vec<String>>> {
        self.keywords
            .try_get_with(connection.to_string(), async {
                self.provider.keywords(connection).await.map(Arc::new)
            })
            .await
            .map_err(|e| Error::Metadata(e.to_string()))
    }

    pub async fn invalidate_schema(&self, connection: &str) {
        self.schemas.invalidate(connection).await;
    }

    pub async fn invalidate_functions(&self, connection: &str) {
        self.functions.invalidate(connection).await;
    }

    pub async fn invalidate_keywords(&self, connection: &str) {
        self.keywords.invalidate(connection).await;
    }

    /// Drop everything cached for one connection.
    pub async fn invalidate_connection(&self, connection: &str) {
        self.invalidate_schema(connection).await;
        self.invalidate_functions(connection).await;
        self.invalidate_keywords(connection).await;
    }

    pub fn invalidate_all(&self) {
        self.schemas.invalidate_all();
        self.functions.invalidate_all();
        self.keywords.invalidate_all();
    }
}
