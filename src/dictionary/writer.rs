// Dataset writer - builds a dataset file from (word, document) pairs
//
// Ingestion side only. The indexed form is computed with the same normalizer
// the query path uses, so prefix search and stored keys always agree.

use libsql::params;
use serde_json::Value;
use std::path::PathBuf;

use crate::normalize::normalize;
use crate::turso::{initialize_schema, DatasetVariant, TursoClient, TursoError};

/// Writes words into a dataset file of a given variant
pub struct DatasetWriter {
    client: TursoClient,
    variant: DatasetVariant,
}

impl DatasetWriter {
    /// Create (or reopen) a dataset file and make sure its tables exist.
    pub async fn create(db_path: PathBuf, variant: DatasetVariant) -> Result<Self, TursoError> {
        let client = TursoClient::new(db_path).await?;
        initialize_schema(&client, variant).await?;
        Ok(Self { client, variant })
    }

    /// Insert every entry in a single transaction.
    ///
    /// A `None` document stores a reserved word with a NULL payload.
    /// Returns the number of words written.
    pub async fn insert_all<'a, I>(&self, entries: I) -> Result<usize, TursoError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a Value>)>,
    {
        let conn = self.client.connect()?;
        let insert_document = format!(
            "INSERT INTO dictionary (word, {}) VALUES (?1, ?2)",
            self.variant.payload_column()
        );

        conn.execute("BEGIN", ())
            .await
            .map_err(|e| TursoError::Query(e.to_string()))?;

        let mut written = 0;
        for (word, document) in entries {
            let payload = document.map(Value::to_string);
            let result = async {
                conn.execute(&insert_document, params![word.to_string(), payload])
                    .await?;
                conn.execute(
                    "INSERT INTO wordlist (word, indexed) VALUES (?1, ?2)",
                    params![word.to_string(), normalize(word)],
                )
                .await
            }
            .await;

            if let Err(e) = result {
                let _ = conn.execute("ROLLBACK", ()).await;
                let message = e.to_string();
                return Err(if message.contains("constraint failed") {
                    TursoError::Constraint(format!("Word '{}': {}", word, message))
                } else {
                    TursoError::Query(message)
                });
            }
            written += 1;
        }

        conn.execute("COMMIT", ())
            .await
            .map_err(|e| TursoError::Query(e.to_string()))?;

        crate::debug!("Wrote {} words to {:?}", written, self.client.path());
        Ok(written)
    }

    /// Insert a single word.
    pub async fn insert(&self, word: &str, document: Option<&Value>) -> Result<(), TursoError> {
        self.insert_all([(word, document)]).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
