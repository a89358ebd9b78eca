use thiserror::Error;

use crate::FieldKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid {expected} value '{value}' for {field}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: FieldKind,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
