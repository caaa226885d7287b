use arrow::array::{
    ArrayBuilder, BinaryBuilder, BooleanBuilder, Decimal128Builder, Float32Builder,
    Float64Builder, Int16Builder, Int32Builder, Int64Builder, Int8Builder, ListBuilder, MapBuilder,
    MapFieldNames, NullBuilder, StringBuilder, StructBuilder, TimestampMicrosecondBuilder,
};
use arrow::datatypes::{DataType, Field, TimeUnit};
use arrow::error::ArrowError;

use crate::ArrowConvertError;

pub(super) fn make_builder(
    dt: &DataType,
    capacity: usize,
) -> Result<Box<dyn ArrayBuilder>, ArrowConvertError> {
    let builder: Box<dyn ArrayBuilder> = match dt {
        DataType::Null => Box::new(NullBuilder::new()),
        DataType::Boolean => Box::new(BooleanBuilder::with_capacity(capacity)),
        DataType::Int8 => Box::new(Int8Builder::with_capacity(capacity)),
        DataType::Int16 => Box::new(Int16Builder::with_capacity(capacity)),
        DataType::Int32 => Box::new(Int32Builder::with_capacity(capacity)),
        DataType::Int64 => Box::new(Int64Builder::with_capacity(capacity)),
        DataType::Float32 => Box::new(Float32Builder::with_capacity(capacity)),
        DataType::Float64 => Box::new(Float64Builder::with_capacity(capacity)),
        DataType::Utf8 => Box::new(StringBuilder::with_capacity(capacity, 64)),
        DataType::Binary => Box::new(BinaryBuilder::with_capacity(capacity, 64)),
        DataType::Decimal128(precision, scale) => Box::new(
            Decimal128Builder::with_capacity(capacity)
                .with_precision_and_scale(*precision, *scale)?,
        ),
        DataType::Timestamp(TimeUnit::Microsecond, tz) => Box::new(
            TimestampMicrosecondBuilder::with_capacity(capacity).with_timezone_opt(tz.clone()),
        ),
        DataType::List(field) => {
            let child = make_builder(field.data_type(), capacity)?;
            Box::new(ListBuilder::new(child).with_field(field.clone()))
        }
        DataType::Struct(fields) => {
            let child_builders = fields
                .iter()
                .map(|f| make_builder(f.data_type(), capacity))
                .collect::<Result<Vec<_>, _>>()?;
            let fields_vec: Vec<Field> = fields.iter().map(|f| f.as_ref().clone()).collect();
            Box::new(StructBuilder::new(fields_vec, child_builders))
        }
        DataType::Map(entry_field, _) => {
            let (key_field, value_field) = super::map_entry_fields(entry_field)?;
            let key_builder = make_builder(key_field.data_type(), capacity)?;
            let value_builder = make_builder(value_field.data_type(), capacity)?;
            Box::new(
                MapBuilder::new(
                    Some(MapFieldNames {
                        entry: entry_field.name().to_string(),
                        key: key_field.name().to_string(),
                        value: value_field.name().to_string(),
                    }),
                    key_builder,
                    value_builder,
                )
                .with_keys_field(key_field.clone())
                .with_values_field(value_field.clone()),
            )
        }
        other => {
            return Err(ArrowError::NotYetImplemented(format!(
                "no builder for Arrow data type {other:?}"
            ))
            .into());
        }
    };
    Ok(builder)
}
