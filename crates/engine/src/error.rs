//! The module contains the errors the engine can return.
//!
//! Validation problems are normally returned as data (see
//! [`ValidationErrors`]); they only become an [`EngineError::Invalid`] when a
//! caller asks to turn a form into a transaction.
//!
//! - [`Storage`] a persistence slot could not be read or written.
//! - [`Serialize`] the collection could not be encoded.
//! - [`Invalid`] a form payload did not pass validation.
//!
//!  [`Storage`]: EngineError::Storage
//!  [`Serialize`]: EngineError::Serialize
//!  [`Invalid`]: EngineError::Invalid
//!  [`ValidationErrors`]: crate::ValidationErrors
use thiserror::Error;

use crate::ValidationErrors;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("export error: {0}")]
    Export(String),
    #[error("invalid transaction: {0}")]
    Invalid(ValidationErrors),
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),
    #[error("\"{0}\" is not a known transaction kind")]
    UnknownKind(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Serialize(a), Self::Serialize(b)) => a.to_string() == b.to_string(),
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Invalid(a), Self::Invalid(b)) => a == b,
            (Self::UnknownCategory(a), Self::UnknownCategory(b)) => a == b,
            (Self::UnknownKind(a), Self::UnknownKind(b)) => a == b,
            _ => false,
        }
    }
}
