use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum MealsplitError {
    #[error("No people found. Please add people first.")]
    NoPeopleRegistered,
    #[error("Person {0} not found")]
    PersonNotFound(String),
    #[error("Person {0} already exists")]
    PersonAlreadyExists(String),
    #[error("Archive {0} not found")]
    ArchiveNotFound(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("Malformed record in {file}: {reason}")]
    MalformedRecord { file: String, reason: String },
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl MealsplitError {
    pub(crate) fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        MealsplitError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }
}
