// Dictionary module - read-only word store plus the dataset writer used by ingestion

mod document;
mod store;
mod writer;

pub use document::Document;
pub use store::{
    DictionaryError, DictionaryStore, DocumentCursor, AUTOCOMPLETE_LIMIT, SEARCH_PAGE_SIZE,
};
pub use writer::DatasetWriter;
