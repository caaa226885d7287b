use std::{any::Any, sync::Arc};

use rust_decimal::Decimal;
use typerow::{
    Reflector, ReflectorError,
    core::{CanonicalValue, DataType, SchemaCache, TypeDescriptor, Value},
    reflect_record,
};

struct Reading {
    sensor: String,
    value: Option<f64>,
    calibrated: bool,
}

reflect_record!(Reading {
    sensor: String,
    value: Option<f64>,
    calibrated: bool,
});

fn readings() -> Vec<Reading> {
    vec![
        Reading {
            sensor: "t1".to_string(),
            value: Some(21.5),
            calibrated: true,
        },
        Reading {
            sensor: "t2".to_string(),
            value: None,
            calibrated: false,
        },
    ]
}

struct Temperature;

struct Unknown;

impl typerow::core::Reflect for Unknown {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::opaque("Unknown")
    }
}

#[test]
fn schema_of_infers_record_fields() -> Result<(), ReflectorError> {
    let reflector = Reflector::new();
    let schema = reflector.schema_of::<Reading>()?;
    assert!(schema.nullable);
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["sensor", "value", "calibrated"]);
    assert!(schema.fields()[1].nullable);
    assert!(!schema.fields()[2].nullable);
    Ok(())
}

#[test]
fn shared_cache_is_populated_on_first_use() -> Result<(), ReflectorError> {
    let cache = Arc::new(SchemaCache::new());
    let reflector = Reflector::builder().with_cache(cache.clone()).build();
    assert!(cache.is_empty());

    let first = reflector.schema_of::<Reading>()?;
    assert!(cache.contains::<Reading>());
    assert_eq!(reflector.schema_of::<Reading>()?, first);
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn uncached_reflector_infers_the_same_schema() -> Result<(), ReflectorError> {
    let cached = Reflector::new().schema_of::<Reading>()?;
    let uncached = Reflector::builder()
        .without_cache()
        .build()
        .schema_of::<Reading>()?;
    assert_eq!(cached, uncached);
    Ok(())
}

#[test]
fn unsupported_type_surfaces_as_reflector_error() {
    let err = Reflector::new().schema_of::<Unknown>().unwrap_err();
    assert!(matches!(err, ReflectorError::UnsupportedType(_)));
    assert!(err.to_string().contains("Unknown"));
}

#[test]
fn classify_uses_base_rules_then_extensions() -> Result<(), ReflectorError> {
    let reflector = Reflector::builder()
        .with_rule(|v: &dyn Any| v.is::<Temperature>().then_some(DataType::Double))
        .build();

    assert_eq!(reflector.classify(&7i32)?, DataType::Integer);
    assert_eq!(reflector.classify(&Decimal::ONE)?, DataType::Decimal);
    assert_eq!(reflector.classify(&Temperature)?, DataType::Double);
    assert_eq!(reflector.classify(&None::<i64>)?, DataType::Null);
    assert_eq!(reflector.classify(&Some(3i64))?, DataType::Long);
    Ok(())
}

#[test]
fn classify_without_matching_rule_fails() {
    let err = Reflector::new().classify(&Temperature).unwrap_err();
    assert!(matches!(err, ReflectorError::NoMatch(_)));
}

#[test]
fn with_classifier_appends_after_base_rules() -> Result<(), ReflectorError> {
    let extra = typerow::core::Classifier::empty()
        .with_type::<i32>(DataType::Long)
        .with_type::<Temperature>(DataType::Float);
    let reflector = Reflector::builder().with_classifier(extra).build();

    // base rule for i32 wins over the later extension
    assert_eq!(reflector.classify(&1i32)?, DataType::Integer);
    assert_eq!(reflector.classify(&Temperature)?, DataType::Float);
    Ok(())
}

#[test]
fn to_row_aligns_record_with_schema() -> Result<(), ReflectorError> {
    let reflector = Reflector::new();
    let rows = readings();

    let row = reflector.to_row(&rows[1])?;
    assert_eq!(
        row,
        CanonicalValue::Row(vec![
            CanonicalValue::Value(Value::string("t2")),
            CanonicalValue::Null,
            CanonicalValue::Value(Value::Boolean(false)),
        ])
    );
    Ok(())
}

#[cfg(feature = "arrow")]
#[test]
fn arrow_schema_of_record() -> Result<(), ReflectorError> {
    use arrow::datatypes::DataType as ArrowDataType;

    let schema = Reflector::new().arrow_schema_of::<Reading>()?;
    assert_eq!(schema.fields().len(), 3);
    assert_eq!(schema.field(0).data_type(), &ArrowDataType::Utf8);
    assert_eq!(schema.field(1).data_type(), &ArrowDataType::Float64);
    assert!(schema.field(1).is_nullable());
    assert_eq!(schema.field(2).data_type(), &ArrowDataType::Boolean);
    Ok(())
}

#[cfg(feature = "arrow")]
#[test]
fn arrow_schema_of_bare_collection_is_rejected() {
    let err = Reflector::new().arrow_schema_of::<Vec<i32>>().unwrap_err();
    assert!(matches!(err, ReflectorError::Arrow(_)));
}

#[cfg(feature = "arrow")]
#[test]
fn to_record_batch_collects_records() -> Result<(), ReflectorError> {
    use arrow::array::{Array, BooleanArray, Float64Array, StringArray};

    let batch = Reflector::new().to_record_batch(&readings())?;
    assert_eq!(batch.num_rows(), 2);

    let sensor = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(sensor.value(1), "t2");

    let value = batch
        .column(1)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(value.value(0), 21.5);
    assert!(value.is_null(1));

    let calibrated = batch
        .column(2)
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    assert!(calibrated.value(0));
    assert!(!calibrated.value(1));
    Ok(())
}
