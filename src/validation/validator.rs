// Schema validator - checks every stored document against a JSON schema
//
// Empty documents (NULL, {}, [], "") are reserved rows and are skipped.
// The pass stops at the first non-conforming document.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::dictionary::{DictionaryError, DictionaryStore, Document};

/// Errors loading a schema file
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("Schema {path} is not valid JSON: {reason}")]
    Parse { path: String, reason: String },
}

/// The first offending row of a failed pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// Word key of the row, empty when the failure isn't tied to a row
    pub word: String,
    pub reason: String,
}

/// Outcome of validating one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub dataset: String,
    pub valid: bool,
    /// Documents checked against the schema
    pub checked: u64,
    /// Empty documents skipped
    pub skipped: u64,
    pub failure: Option<ValidationFailure>,
}

impl ValidationReport {
    fn failed(dataset: &str, checked: u64, skipped: u64, word: String, reason: String) -> Self {
        Self {
            dataset: dataset.to_string(),
            valid: false,
            checked,
            skipped,
            failure: Some(ValidationFailure { word, reason }),
        }
    }
}

/// Compiled schema
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile a schema document.
    pub fn new(schema: &Value) -> Result<Self, String> {
        jsonschema::validator_for(schema)
            .map(|validator| Self { validator })
            .map_err(|e| format!("Invalid schema: {}", e))
    }

    /// Check one document, returning the first violation as text.
    pub fn check(&self, document: &Value) -> Result<(), String> {
        match self.validator.iter_errors(document).next() {
            None => Ok(()),
            Some(e) => {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    Err(e.to_string())
                } else {
                    Err(format!("{}: {}", path, e))
                }
            }
        }
    }
}

/// Read and parse a schema file.
pub fn load_schema(path: &Path) -> Result<Value, SchemaError> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Running counters for one pass
struct Pass<'a> {
    dataset: &'a str,
    validator: SchemaValidator,
    checked: u64,
    skipped: u64,
}

impl<'a> Pass<'a> {
    /// Returns a failed report when `document` doesn't conform.
    fn visit(&mut self, document: &Document) -> Option<ValidationReport> {
        if document.is_absent() {
            self.skipped += 1;
            return None;
        }
        self.checked += 1;
        match self.validator.check(&document.payload) {
            Ok(()) => None,
            Err(reason) => Some(self.fail(document.word.clone(), reason)),
        }
    }

    fn fail(&self, word: String, reason: String) -> ValidationReport {
        crate::warn!(
            "Schema validation failed for dataset '{}' at '{}': {}",
            self.dataset,
            word,
            reason
        );
        ValidationReport::failed(self.dataset, self.checked, self.skipped, word, reason)
    }

    fn pass(self) -> ValidationReport {
        crate::info!(
            "Dataset '{}' conforms to its schema ({} checked, {} skipped)",
            self.dataset,
            self.checked,
            self.skipped
        );
        ValidationReport {
            dataset: self.dataset.to_string(),
            valid: true,
            checked: self.checked,
            skipped: self.skipped,
            failure: None,
        }
    }
}

fn start<'a>(dataset: &'a str, schema: &Value) -> Result<Pass<'a>, ValidationReport> {
    match SchemaValidator::new(schema) {
        Ok(validator) => Ok(Pass {
            dataset,
            validator,
            checked: 0,
            skipped: 0,
        }),
        Err(reason) => {
            crate::warn!("Cannot validate dataset '{}': {}", dataset, reason);
            Err(ValidationReport::failed(dataset, 0, 0, String::new(), reason))
        }
    }
}

/// Validate in-memory documents.
pub fn validate_documents<I>(dataset: &str, documents: I, schema: &Value) -> ValidationReport
where
    I: IntoIterator<Item = Document>,
{
    let mut pass = match start(dataset, schema) {
        Ok(pass) => pass,
        Err(report) => return report,
    };
    for document in documents {
        if let Some(report) = pass.visit(&document) {
            return report;
        }
    }
    pass.pass()
}

/// Validate every document stored in a dataset.
pub async fn validate(dataset: &str, store: &DictionaryStore, schema: &Value) -> ValidationReport {
    let mut pass = match start(dataset, schema) {
        Ok(pass) => pass,
        Err(report) => return report,
    };

    let mut cursor = match store.documents().await {
        Ok(cursor) => cursor,
        Err(e) => return pass.fail(String::new(), e.to_string()),
    };

    loop {
        match cursor.next().await {
            Ok(Some(document)) => {
                if let Some(report) = pass.visit(&document) {
                    return report;
                }
            }
            Ok(None) => return pass.pass(),
            Err(DictionaryError::InvalidDocument { word, reason }) => {
                return pass.fail(word, format!("not valid JSON: {}", reason));
            }
            Err(e) => return pass.fail(String::new(), e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
