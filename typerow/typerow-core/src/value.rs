//! Dynamic runtime representation of typed host values.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    sync::Arc,
};

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::error::ValueTypeError;

/// Value of a reflected type.
///
/// Scalar variants mirror [`DataType`](crate::DataType). `Optional` keeps the
/// wrapper visible so row conversion can unwrap it; `Record` holds members in
/// declaration order and is used for both structs and tuples.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Arc<str>),
    Binary(Bytes),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
    Optional(Option<Box<Value>>),
    Record(Vec<Value>),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

macro_rules! typed_accessor {
    ($($fn_name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $fn_name(&self) -> Result<Option<$ty>, ValueTypeError> {
                match self {
                    Value::$variant(v) => Ok(Some(*v)),
                    Value::Null | Value::Optional(None) => Ok(None),
                    Value::Optional(Some(inner)) => inner.$fn_name(),
                    _ => Err(self.type_mismatch(stringify!($variant))),
                }
            }
        )*
    };
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn some(inner: Value) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Self::Optional(None)
    }

    /// True for `Null` and for an empty optional.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::Optional(None))
    }

    /// Strip any number of optional wrappers.
    pub fn unwrap_optional(&self) -> &Value {
        match self {
            Value::Optional(Some(inner)) => inner.unwrap_optional(),
            other => other,
        }
    }

    typed_accessor!(
        try_bool => Boolean: bool,
        try_i8 => Byte: i8,
        try_i16 => Short: i16,
        try_i32 => Integer: i32,
        try_i64 => Long: i64,
        try_f32 => Float: f32,
        try_f64 => Double: f64,
        try_decimal => Decimal: Decimal,
        try_timestamp => Timestamp: DateTime<Utc>,
    );

    pub fn try_str(&self) -> Result<Option<&str>, ValueTypeError> {
        match self.unwrap_optional() {
            Value::String(v) => Ok(Some(v.as_ref())),
            Value::Null | Value::Optional(None) => Ok(None),
            other => Err(other.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<Option<&[u8]>, ValueTypeError> {
        match self.unwrap_optional() {
            Value::Binary(v) => Ok(Some(v.as_ref())),
            Value::Null | Value::Optional(None) => Ok(None),
            other => Err(other.type_mismatch("Binary")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Integer(_) => "Integer",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::String(_) => "String",
            Value::Binary(_) => "Binary",
            Value::Decimal(_) => "Decimal",
            Value::Timestamp(_) => "Timestamp",
            Value::Optional(_) => "Optional",
            Value::Record(_) => "Record",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }
}

/// Converts a host value into its [`Value`] form.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

macro_rules! scalar_to_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

scalar_to_value!(
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
    DateTime<Utc> => Timestamp,
);

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.and_utc())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::string(self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::string(self)
    }
}

impl ToValue for Bytes {
    fn to_value(&self) -> Value {
        Value::Binary(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
}

macro_rules! tuple_to_value {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ToValue),+> ToValue for ($($name,)+) {
            fn to_value(&self) -> Value {
                Value::Record(vec![$(self.$idx.to_value()),+])
            }
        }
    };
}

tuple_to_value!(A: 0);
tuple_to_value!(A: 0, B: 1);
tuple_to_value!(A: 0, B: 1, C: 2);
tuple_to_value!(A: 0, B: 1, C: 2, D: 3);
tuple_to_value!(A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_to_value!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
