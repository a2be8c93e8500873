// Turso/libsql client wrapper
//
// Owns the libsql Database for one dataset file. Every call opens its own
// Connection, so concurrent readers never share a cursor and no lock is needed.

use libsql::{Builder, Connection, Database, OpenFlags, Rows};
use std::path::{Path, PathBuf};

/// Errors raised by the libsql layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TursoError {
    /// Database file could not be opened or connected to
    #[error("Connection error: {0}")]
    Connection(String),
    /// A statement failed to run or a row could not be decoded
    #[error("Query error: {0}")]
    Query(String),
    /// A constraint (UNIQUE, NOT NULL, ...) was violated
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl TursoError {
    fn from_libsql(error: libsql::Error) -> Self {
        let message = error.to_string();
        if message.contains("constraint failed") {
            TursoError::Constraint(message)
        } else {
            TursoError::Query(message)
        }
    }
}

/// Handle to one SQLite dataset file
pub struct TursoClient {
    db: Database,
    db_path: PathBuf,
}

impl TursoClient {
    /// Open (or create) a database file for reading and writing.
    ///
    /// Only the ingestion side uses this; the query path opens read-only.
    pub async fn new(db_path: PathBuf) -> Result<Self, TursoError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TursoError::Connection(format!("Failed to create directory: {}", e)))?;
        }

        crate::debug!("Opening Turso database at {:?}", db_path);
        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| TursoError::Connection(e.to_string()))?;

        Ok(Self { db, db_path })
    }

    /// Open an existing database file read-only.
    pub async fn open_read_only(db_path: PathBuf) -> Result<Self, TursoError> {
        if !db_path.is_file() {
            return Err(TursoError::Connection(format!(
                "Database file {:?} does not exist",
                db_path
            )));
        }

        crate::debug!("Opening Turso database read-only at {:?}", db_path);
        let db = Builder::new_local(&db_path)
            .flags(OpenFlags::SQLITE_OPEN_READ_ONLY)
            .build()
            .await
            .map_err(|e| TursoError::Connection(e.to_string()))?;

        let client = Self { db, db_path };
        // Surface a broken file at open time rather than on the first query
        client
            .query("SELECT name FROM sqlite_master LIMIT 1", ())
            .await
            .map_err(|e| TursoError::Connection(e.to_string()))?;
        Ok(client)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection on this database.
    pub fn connect(&self) -> Result<Connection, TursoError> {
        self.db
            .connect()
            .map_err(|e| TursoError::Connection(e.to_string()))
    }

    /// Run a statement on a fresh connection, returning the affected row count.
    pub async fn execute(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<u64, TursoError> {
        let conn = self.connect()?;
        conn.execute(sql, params)
            .await
            .map_err(TursoError::from_libsql)
    }

    /// Run a query on a fresh connection.
    ///
    /// The returned rows keep their statement (and connection) alive until dropped.
    pub async fn query(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Rows, TursoError> {
        let conn = self.connect()?;
        conn.query(sql, params)
            .await
            .map_err(TursoError::from_libsql)
    }
}

/// Pull the next row, mapping the libsql error.
pub(crate) async fn next_row(rows: &mut Rows) -> Result<Option<libsql::Row>, TursoError> {
    rows.next().await.map_err(|e| TursoError::Query(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
