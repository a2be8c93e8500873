// Dataset registry - every configured dataset with its store and metadata
//
// Built once at startup, read-only afterwards. A dataset whose file cannot be
// opened stays listed with `available: false` instead of aborting startup.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{DatasetConfig, ServiceConfig};
use crate::dictionary::DictionaryStore;
use crate::validation::{self, ValidationFailure, ValidationReport};

/// Length of the short content hash shown to clients
const SHORT_HASH_LEN: usize = 7;

/// Metadata shown by the root/info endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub name: String,
    pub slug: String,
    /// Number of words
    pub total: u64,
    /// Short content fingerprint
    pub hash: String,
    /// Whether every document conforms to `schema`
    pub valid: bool,
    /// Schema file the dataset is checked against
    pub schema: String,
    /// Readable file size, e.g. "42Mb"
    pub size: String,
    pub available: bool,
}

/// One registered dataset
pub struct DatasetEntry {
    info: DatasetInfo,
    store: Option<Arc<DictionaryStore>>,
    report: ValidationReport,
}

impl DatasetEntry {
    pub fn info(&self) -> &DatasetInfo {
        &self.info
    }

    /// The store, `None` when the dataset couldn't be opened
    pub fn store(&self) -> Option<&Arc<DictionaryStore>> {
        self.store.as_ref()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }
}

/// All datasets, in configuration order
pub struct DatasetRegistry {
    entries: Vec<DatasetEntry>,
}

impl DatasetRegistry {
    /// Open and validate every configured dataset.
    ///
    /// Blocking startup gate: returns once all validation passes are done.
    pub async fn build(config: &ServiceConfig) -> Self {
        let total = config.datasets.len();
        let mut entries = Vec::with_capacity(total);
        for (i, dataset) in config.datasets.iter().enumerate() {
            crate::info!(
                "Loading dataset '{}' [{}/{}]",
                dataset.slug,
                i + 1,
                total
            );
            entries.push(open_entry(config, dataset).await);
        }
        crate::info!("Dataset registry ready ({} datasets)", entries.len());
        Self { entries }
    }

    /// First configured dataset
    pub fn primary(&self) -> Option<&DatasetEntry> {
        self.entries.first()
    }

    pub fn get(&self, slug: &str) -> Option<&DatasetEntry> {
        self.entries.iter().find(|entry| entry.info.slug == slug)
    }

    /// Metadata keyed by slug
    pub fn infos(&self) -> BTreeMap<String, DatasetInfo> {
        self.entries
            .iter()
            .map(|entry| (entry.info.slug.clone(), entry.info.clone()))
            .collect()
    }
}

async fn open_entry(config: &ServiceConfig, dataset: &DatasetConfig) -> DatasetEntry {
    let mut info = DatasetInfo {
        name: dataset.name.clone(),
        slug: dataset.slug.clone(),
        total: 0,
        hash: String::new(),
        valid: false,
        schema: dataset.schema.display().to_string(),
        size: readable_size(0),
        available: false,
    };

    let path = config.resolve(&dataset.file);
    crate::debug!("Opening {:?} as {:?}", path, dataset.variant);
    let store = match DictionaryStore::open(path, dataset.variant).await {
        Ok(store) => store,
        Err(e) => {
            crate::error!("Dataset '{}' is unavailable: {}", dataset.slug, e);
            return DatasetEntry {
                info,
                store: None,
                report: unchecked(&dataset.slug, e.to_string()),
            };
        }
    };

    info.available = true;
    info.total = store.dataset_size();
    info.hash = store
        .dataset_checksum()
        .chars()
        .take(SHORT_HASH_LEN)
        .collect();
    info.size = readable_size(store.dataset_byte_size());
    if info.total == 0 {
        crate::warn!("Dataset '{}' has no words", dataset.slug);
    }

    let report = match validation::load_schema(&config.resolve(&dataset.schema)) {
        Ok(schema) => validation::validate(&dataset.slug, &store, &schema).await,
        Err(e) => {
            crate::warn!("Skipping validation of '{}': {}", dataset.slug, e);
            unchecked(&dataset.slug, e.to_string())
        }
    };
    info.valid = report.valid;

    DatasetEntry {
        info,
        store: Some(Arc::new(store)),
        report,
    }
}

/// Failed report for a dataset that could not be checked at all
fn unchecked(slug: &str, reason: String) -> ValidationReport {
    ValidationReport {
        dataset: slug.to_string(),
        valid: false,
        checked: 0,
        skipped: 0,
        failure: Some(ValidationFailure {
            word: String::new(),
            reason,
        }),
    }
}

/// Whole megabytes, decimal.
fn readable_size(bytes: u64) -> String {
    format!("{}Mb", bytes / 1_000_000)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
