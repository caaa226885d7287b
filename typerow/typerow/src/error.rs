//! Error types for the reflector facade.

use typerow_core::{NoMatchError, UnsupportedTypeError};

/// Errors produced by [`Reflector`](crate::Reflector).
#[derive(Debug, thiserror::Error)]
pub enum ReflectorError {
    /// The type has no schema rule.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    /// No configured classification rule accepted the value.
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),

    /// Schema or rows could not be exported to Arrow.
    #[cfg(feature = "arrow")]
    #[error(transparent)]
    Arrow(#[from] typerow_arrow::ArrowConvertError),
}
