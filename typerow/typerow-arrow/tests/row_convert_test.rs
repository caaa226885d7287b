use std::collections::BTreeMap;

use arrow::array::{
    Array, BinaryArray, Decimal128Array, Int32Array, Int64Array, ListArray, MapArray,
    StringArray, StructArray, TimestampMicrosecondArray,
};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use typerow_arrow::{ArrowConvertError, rows_to_record_batch};
use typerow_core::{
    CanonicalValue, DataType, Schema, StructField, ToValue, Value, convert, infer_type,
    reflect_record,
};

struct Tag {
    key: String,
    weight: Option<i32>,
}

reflect_record!(Tag {
    key: String,
    weight: Option<i32>,
});

struct Event {
    id: i64,
    name: Option<String>,
    payload: Bytes,
    amount: Decimal,
    at: DateTime<Utc>,
    tags: Vec<Tag>,
    attrs: BTreeMap<String, Option<i64>>,
    parent: Option<Tag>,
}

reflect_record!(Event {
    id: i64,
    name: Option<String>,
    payload: Bytes,
    amount: Decimal,
    at: DateTime<Utc>,
    tags: Vec<Tag>,
    attrs: BTreeMap<String, Option<i64>>,
    parent: Option<Tag>,
});

fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: 1,
            name: Some("first".to_string()),
            payload: Bytes::from_static(b"\x00\x01"),
            amount: Decimal::new(1234, 2),
            at: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
            tags: vec![
                Tag {
                    key: "a".to_string(),
                    weight: Some(3),
                },
                Tag {
                    key: "b".to_string(),
                    weight: None,
                },
            ],
            attrs: BTreeMap::from([("x".to_string(), Some(10)), ("y".to_string(), None)]),
            parent: Some(Tag {
                key: "root".to_string(),
                weight: None,
            }),
        },
        Event {
            id: 2,
            name: None,
            payload: Bytes::new(),
            amount: Decimal::ZERO,
            at: Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap(),
            tags: vec![],
            attrs: BTreeMap::new(),
            parent: None,
        },
    ]
}

#[test]
fn rows_to_record_batch_converts_reflected_records() -> Result<(), Box<dyn std::error::Error>> {
    let schema = infer_type::<Event>()?;
    let rows: Vec<CanonicalValue> = sample_events()
        .iter()
        .map(|e| convert(&e.to_value(), &schema))
        .collect();

    let batch = rows_to_record_batch(&schema, &rows)?;
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 8);

    let id = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(id.value(0), 1);
    assert_eq!(id.value(1), 2);

    let name = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(name.value(0), "first");
    assert!(name.is_null(1));

    let payload = batch
        .column(2)
        .as_any()
        .downcast_ref::<BinaryArray>()
        .unwrap();
    assert_eq!(payload.value(0), b"\x00\x01");
    assert_eq!(payload.value(1), b"");

    let amount = batch
        .column(3)
        .as_any()
        .downcast_ref::<Decimal128Array>()
        .unwrap();
    assert_eq!(amount.value(0), 12_340_000_000_000_000_000);
    assert_eq!(amount.value(1), 0);

    let at = batch
        .column(4)
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .unwrap();
    assert_eq!(at.value(1), 1_000_000);

    let tags = batch
        .column(5)
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert_eq!(tags.value_offsets(), &[0, 2, 2]);
    let tag_structs = tags
        .values()
        .as_any()
        .downcast_ref::<StructArray>()
        .unwrap();
    let tag_keys = tag_structs
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    let tag_weights = tag_structs
        .column(1)
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    assert_eq!(tag_keys.value(0), "a");
    assert_eq!(tag_keys.value(1), "b");
    assert_eq!(tag_weights.value(0), 3);
    assert!(tag_weights.is_null(1));

    let attrs = batch
        .column(6)
        .as_any()
        .downcast_ref::<MapArray>()
        .unwrap();
    assert_eq!(attrs.value_offsets(), &[0, 2, 2]);
    let attr_values = attrs
        .values()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(attr_values.value(0), 10);
    assert!(attr_values.is_null(1));

    let parent = batch
        .column(7)
        .as_any()
        .downcast_ref::<StructArray>()
        .unwrap();
    assert!(parent.is_valid(0));
    assert!(parent.is_null(1));
    let parent_keys = parent
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(parent_keys.value(0), "root");
    Ok(())
}

fn two_column_schema() -> Schema {
    Schema::new(
        DataType::struct_of(vec![
            StructField::new("a", DataType::Integer, false),
            StructField::new("b", DataType::String, true),
        ]),
        true,
    )
}

#[test]
fn null_rows_and_short_rows_fill_with_nulls() -> Result<(), ArrowConvertError> {
    let schema = Schema::new(
        DataType::struct_of(vec![
            StructField::new("a", DataType::Integer, true),
            StructField::new("b", DataType::String, true),
        ]),
        true,
    );
    let rows = vec![
        CanonicalValue::Row(vec![CanonicalValue::Value(Value::Integer(5))]),
        CanonicalValue::Null,
    ];

    let batch = rows_to_record_batch(&schema, &rows)?;
    let a = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    assert_eq!(a.value(0), 5);
    assert!(a.is_null(1));
    assert_eq!(batch.column(1).null_count(), 2);
    Ok(())
}

#[test]
fn empty_rows_produce_an_empty_batch() -> Result<(), ArrowConvertError> {
    let batch = rows_to_record_batch(&two_column_schema(), &[])?;
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 2);
    Ok(())
}

#[test]
fn null_in_non_nullable_column_is_rejected() {
    let rows = vec![CanonicalValue::Row(vec![
        CanonicalValue::Null,
        CanonicalValue::Value(Value::string("b")),
    ])];
    assert!(rows_to_record_batch(&two_column_schema(), &rows).is_err());
}

#[test]
fn non_row_values_are_rejected() {
    let rows = vec![CanonicalValue::Value(Value::Integer(1))];
    let err = rows_to_record_batch(&two_column_schema(), &rows).unwrap_err();
    assert!(matches!(err, ArrowConvertError::RowShape { index: 0 }));
}

#[test]
fn mismatched_value_reports_type_error() {
    let rows = vec![CanonicalValue::Row(vec![
        CanonicalValue::Value(Value::string("not an int")),
        CanonicalValue::Null,
    ])];
    let err = rows_to_record_batch(&two_column_schema(), &rows).unwrap_err();
    assert!(matches!(err, ArrowConvertError::ValueType(_)));
}

#[test]
fn oversized_decimal_is_rejected() {
    let schema = Schema::new(
        DataType::struct_of(vec![StructField::new("d", DataType::Decimal, true)]),
        true,
    );
    let rows = vec![CanonicalValue::Row(vec![CanonicalValue::Value(
        Value::Decimal(Decimal::MAX),
    )])];
    let err = rows_to_record_batch(&schema, &rows).unwrap_err();
    assert!(matches!(err, ArrowConvertError::DecimalOverflow { .. }));
}
