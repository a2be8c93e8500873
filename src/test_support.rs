// Shared fixtures for tests: small dataset files in temp directories

use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::{DatasetConfig, ServiceConfig};
use crate::dictionary::DatasetWriter;
use crate::turso::DatasetVariant;

/// A minimal schema in the shape of a Remède entry
pub fn entry_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["ipa", "definitions"],
        "properties": {
            "ipa": { "type": "string" },
            "definitions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["definition"],
                    "properties": {
                        "definition": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    })
}

/// A document conforming to `entry_schema`
pub fn entry(ipa: &str, definition: &str) -> Value {
    json!({
        "ipa": ipa,
        "definitions": [{ "definition": definition, "tags": ["nom"] }]
    })
}

/// Write a dataset file named `file` under `dir`.
pub async fn write_dataset(
    dir: &TempDir,
    file: &str,
    variant: DatasetVariant,
    entries: &[(&str, Option<Value>)],
) -> PathBuf {
    let path = dir.path().join(file);
    let writer = DatasetWriter::create(path.clone(), variant)
        .await
        .expect("Failed to create dataset");
    writer
        .insert_all(entries.iter().map(|(word, doc)| (*word, doc.as_ref())))
        .await
        .expect("Failed to write dataset");
    path
}

/// A small French word list with conforming documents
pub fn sample_entries() -> Vec<(&'static str, Option<Value>)> {
    [
        ("abandon", "a.bɑ̃.dɔ̃"),
        ("abbé", "a.be"),
        ("abeille", "a.bɛj"),
        ("abri", "a.bʁi"),
        ("absent", "ap.sɑ̃"),
        ("absolu", "ap.sɔ.ly"),
        ("abstrait", "aps.tʁɛ"),
        ("café", "ka.fe"),
        ("cafetière", "kaf.tjɛʁ"),
        ("cafétéria", "ka.fe.te.ʁja"),
        ("chat", "ʃa"),
        ("été", "e.te"),
        ("arc-en-ciel", "aʁ.kɑ̃.sjɛl"),
        ("aujourd'hui", "o.ʒuʁ.dɥi"),
    ]
    .into_iter()
    .map(|(word, ipa)| (word, Some(entry(ipa, &format!("Définition de {}", word)))))
    .collect()
}

/// Config rooted at `dir` with `entry_schema()` written to `schema.json`.
pub fn config_for(dir: &TempDir, datasets: &[(&str, &str, DatasetVariant)]) -> ServiceConfig {
    std::fs::write(dir.path().join("schema.json"), entry_schema().to_string())
        .expect("Failed to write schema");
    ServiceConfig {
        data_dir: dir.path().to_path_buf(),
        datasets: datasets
            .iter()
            .map(|(slug, file, variant)| DatasetConfig {
                slug: slug.to_string(),
                name: format!("Dataset {}", slug),
                file: PathBuf::from(file),
                variant: *variant,
                schema: PathBuf::from("schema.json"),
            })
            .collect(),
    }
}
