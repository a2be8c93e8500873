// Turso/libsql storage layer for dataset files

mod client;
mod dictionary;
mod schema;

pub use client::{TursoClient, TursoError};
pub use dictionary::{DocumentRows, RawDocument};
pub use schema::{initialize_schema, DatasetVariant};

pub(crate) use client::next_row;
