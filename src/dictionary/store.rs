// Dictionary store - read-only access to one dataset file
//
// Wraps the libsql queries with dictionary semantics: NotFound for absent
// words, EmptyDataset for random picks on an empty table, and the fixed
// autocomplete/search window sizes. Size and fingerprint are computed once
// at open since the file never changes while the process runs.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::document::Document;
use crate::turso::{DatasetVariant, RawDocument, TursoClient, TursoError};
use crate::word_of_day::WordSource;

/// Results returned by autocomplete
pub const AUTOCOMPLETE_LIMIT: u32 = 5;
/// Results per search page
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Error types for dictionary operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DictionaryError {
    /// Word not present in the dataset
    #[error("Word '{0}' not found")]
    NotFound(String),
    /// Dataset has no rows
    #[error("Dataset is empty")]
    EmptyDataset,
    /// Underlying storage could not be opened or read
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    /// Stored payload is not valid JSON
    #[error("Invalid document for '{word}': {reason}")]
    InvalidDocument { word: String, reason: String },
}

impl From<TursoError> for DictionaryError {
    fn from(error: TursoError) -> Self {
        DictionaryError::StorageUnavailable(error.to_string())
    }
}

/// Read-only store over one dataset file
pub struct DictionaryStore {
    client: TursoClient,
    variant: DatasetVariant,
    total: u64,
    checksum: String,
    byte_size: u64,
}

impl DictionaryStore {
    /// Open a dataset file read-only and compute its metadata.
    pub async fn open(db_path: PathBuf, variant: DatasetVariant) -> Result<Self, DictionaryError> {
        let client = TursoClient::open_read_only(db_path).await?;
        let total = client.count_words().await?;
        let (checksum, byte_size) = fingerprint(client.path())
            .map_err(|e| DictionaryError::StorageUnavailable(e.to_string()))?;

        crate::debug!(
            "Opened dataset {:?}: {} words, {} bytes, sha256 {}",
            client.path(),
            total,
            byte_size,
            checksum
        );

        Ok(Self {
            client,
            variant,
            total,
            checksum,
            byte_size,
        })
    }

    /// Schema version this store reads payloads with
    pub fn variant(&self) -> DatasetVariant {
        self.variant
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        self.client.path()
    }

    /// Exact lookup by word key.
    pub async fn lookup_word(&self, word: &str) -> Result<Document, DictionaryError> {
        let raw = self
            .client
            .fetch_document(self.variant, word)
            .await?
            .ok_or_else(|| DictionaryError::NotFound(word.to_string()))?;
        self.parse(raw)
    }

    /// One word chosen uniformly at random.
    pub async fn random_word(&self) -> Result<String, DictionaryError> {
        self.client
            .fetch_random_word()
            .await?
            .ok_or(DictionaryError::EmptyDataset)
    }

    /// Words whose indexed form starts with `normalized_prefix`, ascending,
    /// skipping `offset` matches and returning at most `page_size`.
    ///
    /// An empty prefix matches every word. No match is an empty list.
    pub async fn search_prefix(
        &self,
        normalized_prefix: &str,
        page_size: u32,
        offset: u64,
    ) -> Result<Vec<String>, DictionaryError> {
        if page_size == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .client
            .fetch_words_by_prefix(normalized_prefix, page_size, offset)
            .await?)
    }

    /// First `AUTOCOMPLETE_LIMIT` matches.
    pub async fn autocomplete(&self, normalized_prefix: &str) -> Result<Vec<String>, DictionaryError> {
        self.search_prefix(normalized_prefix, AUTOCOMPLETE_LIMIT, 0)
            .await
    }

    /// One page of `SEARCH_PAGE_SIZE` matches, pages counted from 0.
    pub async fn search_page(
        &self,
        normalized_prefix: &str,
        page: u32,
    ) -> Result<Vec<String>, DictionaryError> {
        let offset = u64::from(page) * u64::from(SEARCH_PAGE_SIZE);
        self.search_prefix(normalized_prefix, SEARCH_PAGE_SIZE, offset)
            .await
    }

    /// Number of words in the dataset
    pub fn dataset_size(&self) -> u64 {
        self.total
    }

    /// Hex SHA-256 of the dataset file
    pub fn dataset_checksum(&self) -> &str {
        &self.checksum
    }

    /// Size of the dataset file in bytes
    pub fn dataset_byte_size(&self) -> u64 {
        self.byte_size
    }

    /// Cursor over every stored document, for whole-dataset passes.
    pub async fn documents(&self) -> Result<DocumentCursor, DictionaryError> {
        let rows = self.client.scan_documents(self.variant).await?;
        Ok(DocumentCursor {
            rows,
            variant: self.variant,
        })
    }

    fn parse(&self, raw: RawDocument) -> Result<Document, DictionaryError> {
        let word = raw.word.clone();
        Document::from_raw(raw, self.variant)
            .map_err(|reason| DictionaryError::InvalidDocument { word, reason })
    }
}

#[async_trait]
impl WordSource for DictionaryStore {
    async fn random_word(&self) -> Result<String, DictionaryError> {
        DictionaryStore::random_word(self).await
    }
}

/// Streaming iterator over a store's documents
pub struct DocumentCursor {
    rows: crate::turso::DocumentRows,
    variant: DatasetVariant,
}

impl DocumentCursor {
    /// Next document. A payload that isn't JSON yields `InvalidDocument`.
    pub async fn next(&mut self) -> Result<Option<Document>, DictionaryError> {
        let Some(raw) = self.rows.next().await? else {
            return Ok(None);
        };
        let word = raw.word.clone();
        Document::from_raw(raw, self.variant)
            .map(Some)
            .map_err(|reason| DictionaryError::InvalidDocument { word, reason })
    }
}

/// SHA-256 hex digest and byte length of a file.
fn fingerprint(path: &Path) -> io::Result<(String, u64)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let byte_size = io::copy(&mut file, &mut hasher)?;
    Ok((hex::encode(hasher.finalize()), byte_size))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
