//! Conversion of structured values into canonical rows.

use crate::{
    schema::{DataType, Schema},
    value::Value,
};

/// Row-level representation of a value aligned with its schema.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    Null,
    /// Scalar, list or map carried over unchanged.
    Value(Value),
    /// One entry per struct field, in field order.
    Row(Vec<CanonicalValue>),
}

impl CanonicalValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }

    pub fn as_row(&self) -> Option<&[CanonicalValue]> {
        match self {
            CanonicalValue::Row(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            CanonicalValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Convert `value` into the canonical row form of `schema`.
pub fn convert(value: &Value, schema: &Schema) -> CanonicalValue {
    convert_as(value, &schema.data_type)
}

/// Convert `value` against a bare data type.
///
/// Records become nested rows, optionals are unwrapped, and everything else
/// (including the contents of lists and maps) passes through untouched. A
/// record with fewer members than the struct has fields is padded with nulls.
pub fn convert_as(value: &Value, data_type: &DataType) -> CanonicalValue {
    match (value, data_type) {
        (Value::Null | Value::Optional(None), _) => CanonicalValue::Null,
        (Value::Optional(Some(inner)), _) => convert_as(inner, data_type),
        (Value::Record(members), DataType::Struct(fields)) => {
            if members.len() > fields.len() {
                tracing::warn!(
                    members = members.len(),
                    fields = fields.len(),
                    "record has more members than its struct schema"
                );
            }
            CanonicalValue::Row(
                fields
                    .iter()
                    .enumerate()
                    .map(|(i, field)| match members.get(i) {
                        Some(member) => convert_as(member, &field.data_type),
                        None => CanonicalValue::Null,
                    })
                    .collect(),
            )
        }
        (Value::Record(_), other) => {
            tracing::warn!(data_type = %other, "record value under a non-struct schema");
            CanonicalValue::Value(value.clone())
        }
        (other, _) => CanonicalValue::Value(other.clone()),
    }
}
