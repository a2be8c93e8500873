// Dataset schema definitions
//
// A dataset file holds two tables: `dictionary` with the JSON payload per word,
// and `wordlist` with the precomputed indexed form used by prefix search.
// The payload column name depends on the dataset variant.

use serde::{Deserialize, Serialize};

use super::client::{TursoClient, TursoError};

/// Schema version tag of a dataset file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DatasetVariant {
    /// Current layout, payload in the `remede` column
    #[default]
    Current,
    /// 1.2.x layout, payload in the `document` column
    Legacy,
}

impl DatasetVariant {
    /// Column of the `dictionary` table that carries the JSON document
    pub fn payload_column(self) -> &'static str {
        match self {
            DatasetVariant::Current => "remede",
            DatasetVariant::Legacy => "document",
        }
    }
}

/// Build the CREATE statements for a variant (each as a separate string).
fn create_tables(variant: DatasetVariant) -> Vec<String> {
    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS dictionary (word TEXT PRIMARY KEY, {} TEXT)",
            variant.payload_column()
        ),
        r#"CREATE TABLE IF NOT EXISTS wordlist (
            word TEXT PRIMARY KEY,
            indexed TEXT NOT NULL
        )"#
        .to_string(),
        r#"CREATE INDEX IF NOT EXISTS idx_wordlist_indexed ON wordlist(indexed)"#.to_string(),
    ]
}

/// Create the dataset tables if they don't exist.
pub async fn initialize_schema(
    client: &TursoClient,
    variant: DatasetVariant,
) -> Result<(), TursoError> {
    crate::info!(
        "Initializing dataset schema ({:?}) at {:?}",
        variant,
        client.path()
    );
    for statement in create_tables(variant) {
        client.execute(&statement, ()).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
