use crate::storage::StorageError;

use super::{autoreply::PolicyError, llm::LlmError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Other error: {0}")]
    Other(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}
