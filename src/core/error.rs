use crate::core::types::RecordId;
use crate::core::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Record '{0}' not found")]
    RecordNotFound(RecordId),

    #[error("Record '{0}' already exists")]
    DuplicateId(RecordId),

    #[error("An edit of record '{0}' is still in flight")]
    EditInFlight(RecordId),

    #[error("Edit ticket {0} is no longer pending")]
    StaleEdit(u64),

    #[error("Load failure: {0}")]
    LoadFailure(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GridError {
    /// Message shown to the user when the initial load fails
    pub const LOAD_FAILED_MESSAGE: &'static str = "Failed to load users. Please refresh.";

    /// Message shown when an optimistic edit was rolled back
    pub const ROLLBACK_MESSAGE: &'static str = "Failed to update user. Changes rolled back.";

    /// Check if the error is recovered automatically inside the engine
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GridError::LoadFailure(_) | GridError::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, GridError>;

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<ValidationErrors> for GridError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
