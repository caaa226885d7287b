//! Error types for inference, classification and value access.

use crate::descriptor::TypeDescriptor;

/// No inference rule applies to a type descriptor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unsupported type '{descriptor}': {detail}")]
pub struct UnsupportedTypeError {
    pub descriptor: TypeDescriptor,
    pub detail: String,
}

impl UnsupportedTypeError {
    pub fn new(descriptor: TypeDescriptor, detail: impl Into<String>) -> Self {
        Self {
            descriptor,
            detail: detail.into(),
        }
    }
}

/// Every rule of a classifier chain declined a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no classification rule matches a value of type `{type_name}`")]
pub struct NoMatchError {
    pub type_name: &'static str,
}

/// Typed accessor called on a [`Value`](crate::Value) of another variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// A serialized schema could not be read back.
#[derive(Debug, thiserror::Error)]
pub enum SchemaJsonError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unknown data type '{name}'")]
    UnknownType { name: String },

    /// Only the system default decimal precision and scale are representable.
    #[error("unsupported decimal type '{name}'")]
    UnsupportedDecimal { name: String },

    #[error("duplicate struct field '{name}'")]
    DuplicateField { name: String },
}
