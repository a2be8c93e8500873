//! Startup schema validation of dataset documents.
//!
//! Runs once per dataset before the service accepts traffic. The outcome is
//! a [`ValidationReport`] kept in the dataset registry for the info endpoint;
//! a failing dataset keeps serving.

mod validator;

pub use validator::{
    load_schema, validate, validate_documents, SchemaError, SchemaValidator, ValidationFailure,
    ValidationReport,
};
