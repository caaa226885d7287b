use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Decimal128Builder, Float32Builder,
        Float64Builder, Int16Builder, Int32Builder, Int64Builder, Int8Builder, ListBuilder,
        MapBuilder, NullBuilder, StringBuilder, StructBuilder, TimestampMicrosecondBuilder,
    },
    datatypes::{DataType, Field},
    error::ArrowError,
};
use typerow_core::{CanonicalValue, Value, ValueTypeError};

use super::scalar::{ScalarValue, scalar_value_for_datatype};
use crate::ArrowConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut().downcast_mut::<$T>().ok_or_else(|| {
            ArrowError::InvalidArgumentError(
                concat!("expected builder type: ", stringify!($T)).to_string(),
            )
        })?
    };
}

fn append_scalar_dyn(
    builder: &mut Box<dyn ArrayBuilder>,
    scalar: &ScalarValue<'_>,
) -> Result<(), ArrowConvertError> {
    match scalar {
        ScalarValue::Null => cast_builder!(builder, NullBuilder).append_null(),
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder).append_option(*v),
        ScalarValue::Int8(v) => cast_builder!(builder, Int8Builder).append_option(*v),
        ScalarValue::Int16(v) => cast_builder!(builder, Int16Builder).append_option(*v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder).append_option(*v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder).append_option(*v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder).append_option(*v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder).append_option(*v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder).append_option(*v),
        ScalarValue::Binary(v) => cast_builder!(builder, BinaryBuilder).append_option(*v),
        ScalarValue::Decimal128(v) => cast_builder!(builder, Decimal128Builder).append_option(*v),
        ScalarValue::TimestampMicrosecond(v) => {
            cast_builder!(builder, TimestampMicrosecondBuilder).append_option(*v)
        }
    }
    Ok(())
}

/// Arrow rejects nulls under a non-nullable child of a valid parent.
fn ensure_nullable(field: &Field, is_null: bool) -> Result<(), ArrowConvertError> {
    if is_null && !field.is_nullable() {
        return Err(ValueTypeError::new(format!("non-null '{}'", field.name()), "Null").into());
    }
    Ok(())
}

fn canonical_is_null(value: &CanonicalValue) -> bool {
    match value {
        CanonicalValue::Null => true,
        CanonicalValue::Value(v) => v.is_null(),
        CanonicalValue::Row(_) => false,
    }
}

/// Append one canonical cell; nested rows fill struct builders field by field.
pub(super) fn append_canonical(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &CanonicalValue,
) -> Result<(), ArrowConvertError> {
    match value {
        CanonicalValue::Null => append_value(builder, dt, &Value::Null),
        CanonicalValue::Value(v) => append_value(builder, dt, v),
        CanonicalValue::Row(children) => {
            let DataType::Struct(fields) = dt else {
                return Err(ValueTypeError::new(format!("{dt}"), "Row").into());
            };
            let b = cast_builder!(builder, StructBuilder);
            for (i, field) in fields.iter().enumerate() {
                let child = children.get(i).unwrap_or(&CanonicalValue::Null);
                ensure_nullable(field, canonical_is_null(child))?;
                append_canonical(&mut b.field_builders_mut()[i], field.data_type(), child)?;
            }
            b.append(true);
            Ok(())
        }
    }
}

/// Append one dynamic value, converting list and map contents deeply.
pub(super) fn append_value(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &Value,
) -> Result<(), ArrowConvertError> {
    let value = value.unwrap_optional();
    if let Some(scalar) = scalar_value_for_datatype(dt, value)? {
        return append_scalar_dyn(builder, &scalar);
    }

    match dt {
        DataType::List(field) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            let valid = append_list_elements(b.values(), field, value)?;
            b.append(valid);
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            match value {
                Value::Record(children) => {
                    for (i, field) in fields.iter().enumerate() {
                        let child = children.get(i).unwrap_or(&Value::Null);
                        ensure_nullable(field, child.is_null())?;
                        append_value(&mut b.field_builders_mut()[i], field.data_type(), child)?;
                    }
                    b.append(true);
                }
                v if v.is_null() => {
                    for (i, field) in fields.iter().enumerate() {
                        let child_builder = &mut b.field_builders_mut()[i];
                        append_value(child_builder, field.data_type(), &Value::Null)?;
                    }
                    b.append(false);
                }
                other => return Err(other.type_mismatch("Record").into()),
            }
        }
        DataType::Map(entry_field, _) => {
            let b = cast_builder!(
                builder,
                MapBuilder<Box<dyn ArrayBuilder>, Box<dyn ArrayBuilder>>
            );
            let (key_field, value_field) = super::map_entry_fields(entry_field)?;
            let valid = append_map_entries(b, key_field, value_field, value)?;
            b.append(valid)?;
        }
        other => {
            return Err(ArrowError::NotYetImplemented(format!(
                "cannot append to Arrow data type {other:?}"
            ))
            .into());
        }
    }
    Ok(())
}

fn append_list_elements(
    child_builder: &mut Box<dyn ArrayBuilder>,
    field: &Field,
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    match value {
        Value::List(items) => {
            for item in items {
                ensure_nullable(field, item.is_null())?;
                append_value(child_builder, field.data_type(), item)?;
            }
            Ok(true)
        }
        v if v.is_null() => Ok(false),
        other => Err(other.type_mismatch("List").into()),
    }
}

fn append_map_entries(
    map_builder: &mut MapBuilder<Box<dyn ArrayBuilder>, Box<dyn ArrayBuilder>>,
    key_field: &Field,
    value_field: &Field,
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    match value {
        Value::Map(entries) => {
            for (key, map_value) in entries {
                ensure_nullable(key_field, key.is_null())?;
                ensure_nullable(value_field, map_value.is_null())?;
                append_value(map_builder.keys(), key_field.data_type(), key)?;
                append_value(map_builder.values(), value_field.data_type(), map_value)?;
            }
            Ok(true)
        }
        v if v.is_null() => Ok(false),
        other => Err(other.type_mismatch("Map").into()),
    }
}
