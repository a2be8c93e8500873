// Query service module - the in-process API consumed by the HTTP layer

mod service;

pub use service::{QueryError, QueryService, ServiceInfo, NOT_FOUND_MESSAGE, VERSION};
