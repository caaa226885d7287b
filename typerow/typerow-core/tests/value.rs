use std::collections::HashMap;

use bytes::Bytes;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use typerow_core::{ToValue, Value, ValueTypeError};

#[test]
fn value_string_creates_arc_str_value() {
    let value = Value::string("hello");
    match value {
        Value::String(s) => assert_eq!(&*s, "hello"),
        other => panic!("unexpected value variant: {:?}", other),
    }
}

#[test]
fn host_types_map_to_matching_variants() {
    assert_eq!(true.to_value(), Value::Boolean(true));
    assert_eq!(3i8.to_value(), Value::Byte(3));
    assert_eq!(3i16.to_value(), Value::Short(3));
    assert_eq!(3i32.to_value(), Value::Integer(3));
    assert_eq!(3i64.to_value(), Value::Long(3));
    assert_eq!("s".to_value(), Value::string("s"));
    assert_eq!(
        Bytes::from_static(b"\x01").to_value(),
        Value::Binary(Bytes::from_static(b"\x01"))
    );
    assert_eq!(Decimal::new(5, 1).to_value(), Value::Decimal(Decimal::new(5, 1)));

    let naive = NaiveDate::from_ymd_opt(2020, 2, 29)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date");
    assert_eq!(naive.to_value(), Value::Timestamp(naive.and_utc()));
}

#[test]
fn containers_keep_their_wrappers() {
    assert_eq!(Some(1i32).to_value(), Value::some(Value::Integer(1)));
    assert_eq!(None::<i32>.to_value(), Value::none());
    assert_eq!(
        vec![1i64, 2].to_value(),
        Value::List(vec![Value::Long(1), Value::Long(2)])
    );
    assert_eq!(
        HashMap::from([(1i32, true)]).to_value(),
        Value::Map(vec![(Value::Integer(1), Value::Boolean(true))])
    );
    assert_eq!(
        (1i32, "x").to_value(),
        Value::Record(vec![Value::Integer(1), Value::string("x")])
    );
}

#[test]
fn typed_accessors_see_through_optionals() -> Result<(), ValueTypeError> {
    assert_eq!(Value::some(Value::Integer(4)).try_i32()?, Some(4));
    assert_eq!(Value::none().try_i32()?, None);
    assert_eq!(Value::Null.try_str()?, None);
    assert_eq!(Value::some(Value::string("v")).try_str()?, Some("v"));
    assert_eq!(
        Value::Binary(Bytes::from_static(b"ab")).try_bytes()?,
        Some(&b"ab"[..])
    );
    Ok(())
}

#[test]
fn typed_accessor_reports_mismatch() {
    let err = Value::Long(1).try_i32().unwrap_err();
    assert_eq!(err, ValueTypeError::new("Integer", "Long"));
    assert_eq!(err.to_string(), "expected Integer, got Long");
}
