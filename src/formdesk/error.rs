use crate::model::RecordKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} is assigned at submit time and cannot be edited")]
    ReadOnlyField(String),

    #[error("Field {field} expects {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Record not found: {0}")]
    RecordNotFound(RecordKey),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
