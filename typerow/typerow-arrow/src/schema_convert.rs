use std::sync::Arc;

use arrow::datatypes::{DataType as ArrowDataType, Field, Schema as ArrowSchema, TimeUnit};
use typerow_core::{DECIMAL_PRECISION, DECIMAL_SCALE, DataType, Schema, StructField};

use crate::ArrowConvertError;

/// Converts a struct [`Schema`] into an Arrow schema, one column per field.
pub fn schema_to_arrow_schema(schema: &Schema) -> Result<ArrowSchema, ArrowConvertError> {
    match &schema.data_type {
        DataType::Struct(fields) => Ok(ArrowSchema::new(
            fields.iter().map(struct_field_to_arrow).collect::<Vec<_>>(),
        )),
        other => Err(ArrowConvertError::NotAStruct {
            data_type: other.to_string(),
        }),
    }
}

/// Converts any [`Schema`] into a single named Arrow field.
pub fn schema_to_arrow_field(name: &str, schema: &Schema) -> Field {
    Field::new(name, data_type_to_arrow(&schema.data_type), schema.nullable)
}

fn struct_field_to_arrow(f: &StructField) -> Field {
    Field::new(&f.name, data_type_to_arrow(&f.data_type), f.nullable)
}

pub fn data_type_to_arrow(data_type: &DataType) -> ArrowDataType {
    match data_type {
        DataType::Null => ArrowDataType::Null,
        DataType::Boolean => ArrowDataType::Boolean,
        DataType::Byte => ArrowDataType::Int8,
        DataType::Short => ArrowDataType::Int16,
        DataType::Integer => ArrowDataType::Int32,
        DataType::Long => ArrowDataType::Int64,
        DataType::Float => ArrowDataType::Float32,
        DataType::Double => ArrowDataType::Float64,
        DataType::String => ArrowDataType::Utf8,
        DataType::Binary => ArrowDataType::Binary,
        DataType::Decimal => ArrowDataType::Decimal128(DECIMAL_PRECISION, DECIMAL_SCALE),
        DataType::Timestamp => {
            ArrowDataType::Timestamp(TimeUnit::Microsecond, Some(Arc::from(crate::TIMESTAMP_TZ)))
        }
        DataType::Struct(fields) => {
            let arrow_fields: Vec<Field> = fields.iter().map(struct_field_to_arrow).collect();
            ArrowDataType::Struct(arrow_fields.into())
        }
        DataType::Array {
            element,
            contains_null,
        } => ArrowDataType::List(Arc::new(Field::new(
            "element",
            data_type_to_arrow(element),
            *contains_null,
        ))),
        DataType::Map {
            key,
            value,
            value_contains_null,
        } => {
            let key_field = Field::new("key", data_type_to_arrow(key), false);
            let val_field = Field::new("value", data_type_to_arrow(value), *value_contains_null);
            let entry_struct = ArrowDataType::Struct(vec![key_field, val_field].into());
            let entry_field = Field::new("entries", entry_struct, false);
            ArrowDataType::Map(Arc::new(entry_field), false)
        }
    }
}
