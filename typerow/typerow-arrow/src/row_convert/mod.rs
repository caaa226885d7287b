//! Conversion from canonical rows to Arrow `RecordBatch`.
//!
//! Unlike the core row converter, this layer converts list and map contents
//! deeply: optional wrappers inside collections are unwrapped and records
//! inside collections fill struct builders.

mod append;
mod builder;
mod scalar;

use std::sync::Arc;

use arrow::array::ArrayBuilder;
use arrow::datatypes::{DataType, FieldRef};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use typerow_core::{CanonicalValue, Schema};

use crate::{ArrowConvertError, schema_convert::schema_to_arrow_schema};

/// Convert canonical rows of a struct schema into a `RecordBatch`.
///
/// Each row must be a [`CanonicalValue::Row`] (missing trailing entries are
/// null) or [`CanonicalValue::Null`], which yields nulls in every column.
pub fn rows_to_record_batch(
    schema: &Schema,
    rows: &[CanonicalValue],
) -> Result<RecordBatch, ArrowConvertError> {
    let arrow_schema = Arc::new(schema_to_arrow_schema(schema)?);
    let mut arrays = Vec::with_capacity(arrow_schema.fields().len());

    for (i, field) in arrow_schema.fields().iter().enumerate() {
        let mut builder = builder::make_builder(field.data_type(), rows.len())?;
        for (index, row) in rows.iter().enumerate() {
            let cell = extract_field(row, i, index)?;
            append::append_canonical(&mut builder, field.data_type(), cell)?;
        }
        arrays.push(builder.finish());
    }

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    Ok(RecordBatch::try_new_with_options(
        arrow_schema,
        arrays,
        &options,
    )?)
}

fn extract_field(
    row: &CanonicalValue,
    field_index: usize,
    row_index: usize,
) -> Result<&CanonicalValue, ArrowConvertError> {
    match row {
        CanonicalValue::Row(children) => {
            Ok(children.get(field_index).unwrap_or(&CanonicalValue::Null))
        }
        CanonicalValue::Null => Ok(&CanonicalValue::Null),
        CanonicalValue::Value(_) => Err(ArrowConvertError::RowShape { index: row_index }),
    }
}

fn map_entry_fields(entry_field: &FieldRef) -> Result<(&FieldRef, &FieldRef), ArrowConvertError> {
    match entry_field.data_type() {
        DataType::Struct(fields) if fields.len() == 2 => Ok((&fields[0], &fields[1])),
        other => Err(ArrowError::InvalidArgumentError(format!(
            "Map entry field must be Struct with 2 fields, got: {other:?}"
        ))
        .into()),
    }
}
