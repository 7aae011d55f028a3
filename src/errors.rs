use thiserror::Error;

use crate::calculator::CalculatorError;

/// Error type that captures engine and collaborator failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error(transparent)]
    Calculator(#[from] CalculatorError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
