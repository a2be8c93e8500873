// Query service - orchestrates normalization, dataset stores and the word of the day
//
// Every operation returns JSON-serializable values. Storage details are logged
// here and replaced by fixed user-facing messages; a missing word is a normal
// payload, not an error.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dictionary::{DictionaryError, DictionaryStore};
use crate::normalize::normalize;
use crate::registry::{DatasetInfo, DatasetRegistry};
use crate::word_of_day::{Clock, SystemClock, WordOfDayCache};

/// Service version reported by `info`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message returned in place of a document for unknown words
pub const NOT_FOUND_MESSAGE: &str = "Mot non trouvé";

/// Errors surfaced to the external layer. Messages are fixed and user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Dictionnaire inconnu : {0}")]
    UnknownDataset(String),
    #[error("Le dictionnaire est vide")]
    EmptyDataset,
    #[error("Le dictionnaire est momentanément indisponible")]
    Unavailable,
}

/// Payload of the root/info endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub version: String,
    pub message: String,
    pub dictionaries: BTreeMap<String, DatasetInfo>,
}

/// Dictionary queries over the dataset registry
pub struct QueryService {
    registry: Arc<DatasetRegistry>,
    word_of_day: WordOfDayCache,
}

impl QueryService {
    /// Service using the system clock for the word of the day
    pub fn new(registry: Arc<DatasetRegistry>) -> Self {
        Self::with_clock(registry, Arc::new(SystemClock))
    }

    pub fn with_clock(registry: Arc<DatasetRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            word_of_day: WordOfDayCache::new(clock),
        }
    }

    /// Version and dataset metadata
    pub fn info(&self) -> ServiceInfo {
        ServiceInfo {
            version: VERSION.to_string(),
            message: "Check /docs for documentation".to_string(),
            dictionaries: self.registry.infos(),
        }
    }

    /// True when the primary dataset is open and has words
    pub fn is_healthy(&self) -> bool {
        self.registry
            .primary()
            .map(|entry| entry.info().available && entry.info().total > 0)
            .unwrap_or(false)
    }

    /// Document for an exact word in the primary dataset.
    ///
    /// Unknown words yield `{"message": "Mot non trouvé"}`. A stored row is
    /// returned as-is, even when its payload is empty (`null` for NULL).
    pub async fn get_document(&self, raw_word: &str) -> Result<Value, QueryError> {
        let store = self.primary_store()?;
        document(store, raw_word).await
    }

    /// Document for an exact word in a named dataset.
    pub async fn get_document_in(&self, slug: &str, raw_word: &str) -> Result<Value, QueryError> {
        let store = self.store(slug)?;
        document(store, raw_word).await
    }

    /// A random word from the primary dataset.
    pub async fn get_random(&self) -> Result<String, QueryError> {
        let store = self.primary_store()?;
        store.random_word().await.map_err(to_query_error)
    }

    /// A random word from a named dataset.
    pub async fn get_random_in(&self, slug: &str) -> Result<String, QueryError> {
        let store = self.store(slug)?;
        store.random_word().await.map_err(to_query_error)
    }

    /// Today's word, picked from the primary dataset.
    pub async fn get_word_of_day(&self) -> Result<String, QueryError> {
        let store: &DictionaryStore = self.primary_store()?;
        self.word_of_day
            .get(store)
            .await
            .map_err(to_query_error)
    }

    /// First five words starting with the normalized query.
    pub async fn autocomplete(&self, raw_query: &str) -> Result<Vec<String>, QueryError> {
        let prefix = normalize(raw_query);
        let store = self.primary_store()?;
        store.autocomplete(&prefix).await.map_err(to_query_error)
    }

    pub async fn autocomplete_in(
        &self,
        slug: &str,
        raw_query: &str,
    ) -> Result<Vec<String>, QueryError> {
        let prefix = normalize(raw_query);
        let store = self.store(slug)?;
        store.autocomplete(&prefix).await.map_err(to_query_error)
    }

    /// One page of 50 words starting with the normalized query, pages from 0.
    pub async fn search(&self, raw_query: &str, page: u32) -> Result<Vec<String>, QueryError> {
        let prefix = normalize(raw_query);
        let store = self.primary_store()?;
        store
            .search_page(&prefix, page)
            .await
            .map_err(to_query_error)
    }

    pub async fn search_in(
        &self,
        slug: &str,
        raw_query: &str,
        page: u32,
    ) -> Result<Vec<String>, QueryError> {
        let prefix = normalize(raw_query);
        let store = self.store(slug)?;
        store
            .search_page(&prefix, page)
            .await
            .map_err(to_query_error)
    }

    fn primary_store(&self) -> Result<&Arc<DictionaryStore>, QueryError> {
        let entry = self.registry.primary().ok_or_else(|| {
            crate::error!("No dataset configured");
            QueryError::Unavailable
        })?;
        entry.store().ok_or(QueryError::Unavailable)
    }

    fn store(&self, slug: &str) -> Result<&Arc<DictionaryStore>, QueryError> {
        let entry = self
            .registry
            .get(slug)
            .ok_or_else(|| QueryError::UnknownDataset(slug.to_string()))?;
        entry.store().ok_or(QueryError::Unavailable)
    }
}

async fn document(store: &DictionaryStore, raw_word: &str) -> Result<Value, QueryError> {
    match store.lookup_word(raw_word).await {
        Ok(document) => Ok(document.payload),
        Err(DictionaryError::NotFound(_)) => Ok(not_found()),
        Err(e) => Err(to_query_error(e)),
    }
}

fn not_found() -> Value {
    json!({ "message": NOT_FOUND_MESSAGE })
}

/// Log the internal detail and hand back a fixed message.
fn to_query_error(error: DictionaryError) -> QueryError {
    match error {
        DictionaryError::EmptyDataset => {
            crate::error!("Query on an empty dataset");
            QueryError::EmptyDataset
        }
        other => {
            crate::error!("Dictionary query failed: {}", other);
            QueryError::Unavailable
        }
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
