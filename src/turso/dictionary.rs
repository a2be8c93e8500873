// Dataset read queries using Turso/libsql
//
// Read-only operations over the `dictionary` and `wordlist` tables. Each call
// runs on its own connection (see client.rs).

use libsql::{params, Rows};

use super::client::{next_row, TursoClient, TursoError};
use super::schema::DatasetVariant;

/// A `dictionary` row with its payload still as stored text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub word: String,
    /// JSON text, `None` when the column is NULL
    pub payload: Option<String>,
}

/// Streaming cursor over every `dictionary` row, in word order
pub struct DocumentRows {
    rows: Rows,
}

impl DocumentRows {
    /// Next row, or `None` once the table is exhausted.
    pub async fn next(&mut self) -> Result<Option<RawDocument>, TursoError> {
        match next_row(&mut self.rows).await? {
            Some(row) => Ok(Some(read_document(&row)?)),
            None => Ok(None),
        }
    }
}

fn read_document(row: &libsql::Row) -> Result<RawDocument, TursoError> {
    let word: String = row.get(0).map_err(|e| TursoError::Query(e.to_string()))?;
    let payload: Option<String> = row.get(1).map_err(|e| TursoError::Query(e.to_string()))?;
    Ok(RawDocument { word, payload })
}

/// Escape LIKE wildcards so the prefix is matched literally.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl TursoClient {
    /// Fetch the row for an exact word.
    pub async fn fetch_document(
        &self,
        variant: DatasetVariant,
        word: &str,
    ) -> Result<Option<RawDocument>, TursoError> {
        let sql = format!(
            "SELECT word, {} FROM dictionary WHERE word = ?1",
            variant.payload_column()
        );
        let mut rows = self.query(&sql, params![word.to_string()]).await?;
        match next_row(&mut rows).await? {
            Some(row) => Ok(Some(read_document(&row)?)),
            None => Ok(None),
        }
    }

    /// Pick one word uniformly at random, `None` when the table is empty.
    pub async fn fetch_random_word(&self) -> Result<Option<String>, TursoError> {
        let mut rows = self
            .query("SELECT word FROM dictionary ORDER BY RANDOM() LIMIT 1", ())
            .await?;
        match next_row(&mut rows).await? {
            Some(row) => {
                let word: String = row.get(0).map_err(|e| TursoError::Query(e.to_string()))?;
                Ok(Some(word))
            }
            None => Ok(None),
        }
    }

    /// Words whose indexed form starts with `prefix`, ascending, windowed.
    pub async fn fetch_words_by_prefix(
        &self,
        prefix: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<String>, TursoError> {
        let mut rows = self
            .query(
                r#"SELECT word FROM wordlist
                   WHERE indexed LIKE ?1 ESCAPE '\'
                   ORDER BY word ASC
                   LIMIT ?2 OFFSET ?3"#,
                params![escape_like(prefix), i64::from(limit), offset as i64],
            )
            .await?;

        let mut words = Vec::new();
        while let Some(row) = next_row(&mut rows).await? {
            let word: String = row.get(0).map_err(|e| TursoError::Query(e.to_string()))?;
            words.push(word);
        }
        Ok(words)
    }

    /// Number of rows in the `dictionary` table.
    pub async fn count_words(&self) -> Result<u64, TursoError> {
        let mut rows = self.query("SELECT COUNT(*) FROM dictionary", ()).await?;
        match next_row(&mut rows).await? {
            Some(row) => {
                let count: i64 = row.get(0).map_err(|e| TursoError::Query(e.to_string()))?;
                Ok(count.max(0) as u64)
            }
            None => Ok(0),
        }
    }

    /// Open a cursor over every `dictionary` row.
    pub async fn scan_documents(&self, variant: DatasetVariant) -> Result<DocumentRows, TursoError> {
        let sql = format!(
            "SELECT word, {} FROM dictionary ORDER BY word ASC",
            variant.payload_column()
        );
        let rows = self.query(&sql, ()).await?;
        Ok(DocumentRows { rows })
    }
}

#[cfg(test)]
#[path = "dictionary_test.rs"]
mod tests;
