//! Arrow integration layer for `typerow`.
//!
//! This crate has two responsibilities:
//! 1. Convert `typerow-core` schemas into Arrow data types and schemas.
//! 2. Convert canonical rows ([`CanonicalValue`](typerow_core::CanonicalValue))
//!    into Arrow `RecordBatch`.
//!
//! Conventions:
//! - `Decimal` is `Decimal128(38, 18)`.
//! - `Timestamp` is microsecond `Timestamp` with time zone `+00:00`.
//! - Array elements are named `element`; map entries are `entries` with
//!   non-nullable `key` and a `value` whose nullability follows
//!   `valueContainsNull`.
//!
//! # Typical Flow
//! ```rust
//! use typerow_arrow::{rows_to_record_batch, schema_to_arrow_schema};
//! use typerow_core::{convert, infer_type, ToValue};
//!
//! let schema = infer_type::<(i32, String)>().unwrap();
//! let rows = vec![convert(&(1, "a".to_string()).to_value(), &schema)];
//! let arrow_schema = schema_to_arrow_schema(&schema).unwrap();
//! let batch = rows_to_record_batch(&schema, &rows).unwrap();
//! assert_eq!(batch.schema().as_ref(), &arrow_schema);
//! ```
pub mod error;
pub mod row_convert;
pub mod schema_convert;

/// Re-export of [`error::ArrowConvertError`].
pub use error::ArrowConvertError;
/// Re-export of [`row_convert::rows_to_record_batch`].
pub use row_convert::rows_to_record_batch;
/// Re-exports from [`schema_convert`].
pub use schema_convert::{data_type_to_arrow, schema_to_arrow_field, schema_to_arrow_schema};

pub(crate) const TIMESTAMP_TZ: &str = "+00:00";
