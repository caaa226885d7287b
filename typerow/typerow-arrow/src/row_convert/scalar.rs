use arrow::datatypes::{DataType, TimeUnit};
use rust_decimal::Decimal;
use typerow_core::Value;

use crate::ArrowConvertError;

pub(super) enum ScalarValue<'a> {
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Utf8(Option<&'a str>),
    Binary(Option<&'a [u8]>),
    Decimal128(Option<i128>),
    TimestampMicrosecond(Option<i64>),
}

/// Scalar view of `value` for a primitive Arrow type, `None` for nested types.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: &'a Value,
) -> Result<Option<ScalarValue<'a>>, ArrowConvertError> {
    Ok(Some(match dt {
        DataType::Null => ScalarValue::Null,
        DataType::Boolean => ScalarValue::Boolean(value.try_bool()?),
        DataType::Int8 => ScalarValue::Int8(value.try_i8()?),
        DataType::Int16 => ScalarValue::Int16(value.try_i16()?),
        DataType::Int32 => ScalarValue::Int32(value.try_i32()?),
        DataType::Int64 => ScalarValue::Int64(value.try_i64()?),
        DataType::Float32 => ScalarValue::Float32(value.try_f32()?),
        DataType::Float64 => ScalarValue::Float64(value.try_f64()?),
        DataType::Utf8 => ScalarValue::Utf8(value.try_str()?),
        DataType::Binary => ScalarValue::Binary(value.try_bytes()?),
        DataType::Decimal128(precision, scale) => ScalarValue::Decimal128(
            value
                .try_decimal()?
                .map(|d| decimal_to_i128(d, *precision, *scale))
                .transpose()?,
        ),
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            ScalarValue::TimestampMicrosecond(value.try_timestamp()?.map(|t| t.timestamp_micros()))
        }
        _ => return Ok(None),
    }))
}

/// Unscaled `i128` of `d` at the target scale; extra fractional digits are truncated.
fn decimal_to_i128(d: Decimal, precision: u8, scale: i8) -> Result<i128, ArrowConvertError> {
    let overflow = || ArrowConvertError::DecimalOverflow {
        value: d.to_string(),
        precision,
        scale,
    };
    let target = u32::try_from(scale).map_err(|_| overflow())?;
    let current = d.scale();
    let mantissa = d.mantissa();
    let scaled = if current <= target {
        10i128
            .checked_pow(target - current)
            .and_then(|factor| mantissa.checked_mul(factor))
    } else {
        10i128
            .checked_pow(current - target)
            .map(|factor| mantissa / factor)
    };
    let limit = 10u128.checked_pow(u32::from(precision));
    match (scaled, limit) {
        (Some(v), Some(limit)) if v.unsigned_abs() < limit => Ok(v),
        _ => Err(overflow()),
    }
}
