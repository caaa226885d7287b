use std::{any::Any, sync::Arc};

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use typerow_core::{Classifier, DataType, NoMatchError, Null, Value, classify};

#[test]
fn base_rules_cover_the_primitive_vocabulary() -> Result<(), NoMatchError> {
    assert_eq!(classify(&Null)?, DataType::Null);
    assert_eq!(classify(&true)?, DataType::Boolean);
    assert_eq!(classify(&Bytes::from_static(b"ab"))?, DataType::Binary);
    assert_eq!(classify(&vec![1u8, 2, 3])?, DataType::Binary);
    assert_eq!(classify(&"text")?, DataType::String);
    assert_eq!(classify(&String::from("text"))?, DataType::String);
    assert_eq!(classify(&127i8)?, DataType::Byte);
    assert_eq!(classify(&1i16)?, DataType::Short);
    assert_eq!(classify(&1i32)?, DataType::Integer);
    assert_eq!(classify(&1i64)?, DataType::Long);
    assert_eq!(classify(&1.5f32)?, DataType::Float);
    assert_eq!(classify(&1.5f64)?, DataType::Double);
    assert_eq!(classify(&Decimal::new(12345, 2))?, DataType::Decimal);

    let naive = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 5))
        .expect("valid date");
    let utc: DateTime<Utc> = naive.and_utc();
    assert_eq!(classify(&naive)?, DataType::Timestamp);
    assert_eq!(classify(&utc)?, DataType::Timestamp);
    Ok(())
}

#[test]
fn dynamic_values_classify_like_host_values() -> Result<(), NoMatchError> {
    assert_eq!(classify(&Value::Null)?, DataType::Null);
    assert_eq!(classify(&Value::none())?, DataType::Null);
    assert_eq!(classify(&Value::Boolean(false))?, DataType::Boolean);
    assert_eq!(classify(&Value::string("x"))?, DataType::String);
    assert_eq!(classify(&Value::some(Value::Long(3)))?, DataType::Long);
    Ok(())
}

#[test]
fn unrecognized_values_fail_with_no_match() {
    let err = classify(&42u64).unwrap_err();
    assert_eq!(err.type_name, "u64");

    assert!(classify(&Value::List(vec![])).is_err());
    assert!(classify(&Some(1u64)).is_err());
}

#[test]
fn host_options_classify_as_null_or_their_contents() -> Result<(), NoMatchError> {
    assert_eq!(classify(&None::<String>)?, DataType::Null);
    assert_eq!(classify(&None::<i32>)?, DataType::Null);
    assert_eq!(classify(&None::<Decimal>)?, DataType::Null);
    assert_eq!(classify(&Some(1i32))?, DataType::Integer);
    assert_eq!(classify(&Some(String::from("s")))?, DataType::String);
    assert_eq!(classify(&Some(Bytes::new()))?, DataType::Binary);
    assert_eq!(classify(&Some(Value::Long(1)))?, DataType::Long);

    let value: Box<dyn Any> = Box::new(Some(2.5f64));
    assert_eq!(Classifier::base().classify_dyn(value.as_ref())?, DataType::Double);
    Ok(())
}

#[test]
fn type_erased_values_can_be_classified() -> Result<(), NoMatchError> {
    let values: Vec<Box<dyn Any>> = vec![Box::new(1i32), Box::new("s"), Box::new(())];
    let classifier = Classifier::base();
    let types = values
        .iter()
        .map(|v| classifier.classify_dyn(v.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(types, vec![DataType::Integer, DataType::String, DataType::Null]);

    let err = classifier.classify_dyn(&Arc::new(1i32)).unwrap_err();
    assert_eq!(err.type_name, "dyn Any");
    Ok(())
}

#[test]
fn chained_rules_run_only_after_base_exhaustion() -> Result<(), NoMatchError> {
    let classifier = Classifier::base()
        .with_type::<i128>(DataType::Decimal)
        .with_type::<i32>(DataType::String);

    // Base rule still wins for values it already matches.
    assert_eq!(classifier.classify(&5i32)?, DataType::Integer);
    assert_eq!(classifier.classify(&5i128)?, DataType::Decimal);
    assert!(classifier.classify(&5u32).is_err());
    Ok(())
}

#[test]
fn chained_extensions_keep_declared_order() -> Result<(), NoMatchError> {
    let first = Classifier::empty().with_rule(|v: &dyn Any| {
        v.downcast_ref::<u64>()
            .filter(|n| **n > 1000)
            .map(|_| DataType::Decimal)
    });
    let second = Classifier::empty()
        .with_type::<u64>(DataType::Long)
        .with_type::<u128>(DataType::Decimal);

    let classifier = Classifier::base().chain(first).chain(second);
    assert_eq!(classifier.len(), Classifier::base().len() + 3);
    assert_eq!(classifier.classify(&5000u64)?, DataType::Decimal);
    assert_eq!(classifier.classify(&5u64)?, DataType::Long);
    assert_eq!(classifier.classify(&5u128)?, DataType::Decimal);
    assert_eq!(classifier.classify(&5i64)?, DataType::Long);
    Ok(())
}

#[test]
fn explicit_fallback_makes_classification_total() -> Result<(), NoMatchError> {
    let classifier = Classifier::base().with_rule(|_: &dyn Any| Some(DataType::String));
    assert_eq!(classifier.classify(&[1u16, 2])?, DataType::String);
    assert_eq!(classifier.classify(&true)?, DataType::Boolean);
    Ok(())
}

#[test]
fn empty_chain_matches_nothing() {
    let classifier = Classifier::empty();
    assert!(classifier.is_empty());
    assert!(classifier.classify(&Null).is_err());
}
