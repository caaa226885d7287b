use arrow::error::ArrowError;
use thiserror::Error;
use typerow_core::ValueTypeError;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    /// Only struct schemas map onto an Arrow schema / record batch.
    #[error("expected a struct schema, got {data_type}")]
    NotAStruct { data_type: String },
    #[error("row {index} is neither a row nor null")]
    RowShape { index: usize },
    #[error("value type mismatch: {0}")]
    ValueType(#[from] ValueTypeError),
    #[error("decimal {value} does not fit decimal({precision},{scale})")]
    DecimalOverflow {
        value: String,
        precision: u8,
        scale: i8,
    },
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
