//! Metadata source abstraction.
//!
//! The completion core never talks to a database itself. Hosts implement
//! `MetadataProvider` on top of whatever connection layer they own and let
//! `MetadataCache` decide when to call it.
use super::*;
use crate::*;
use std::future::Future;

pub trait MetadataProvider: Send + Sync {
    /// The `database -> table -> columns` tree for a connection.
    fn schema(&self, connection: &str) -> impl Future<Output = Result<Schema>> + Send;

    /// Flat list of function names offered in expression positions.
    fn functions(&self, connection: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Flat list of keywords offered as the generic fallback.
    fn keywords(&self, connection: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Provider serving the same in-memory metadata to every connection.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    pub schema: Schema,
    pub functions: Vec<String>,
    pub keywords: Vec<String>,
}

impl StaticProvider {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            ..Default::default()
        }
    }

    pub fn with_functions<S: Into<String>>(mut self, functions: impl IntoIterator<Item = S>) -> Self {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

impl MetadataProvider for StaticProvider {
    async fn schema(&self, _connection: &str) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    async fn functions(&self, _connection: &str) -> Result<Vec<String>> {
        Ok(self.functions.clone())
    }

    async fn keywords(&self, _connection: &str) -> Result<Vec<String>> {
        Ok(self.keywords.clone())
    }
}
