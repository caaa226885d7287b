//! Ordered, chainable classification of untyped runtime values.
//!
//! A [`Classifier`] is a list of [`ClassifyRule`]s tried in order; the first
//! rule returning `Some` wins. Chaining concatenates rule lists, so the rules
//! of the receiver always run before the rules appended to it. Declining a
//! value is an ordinary `None`; [`NoMatchError`] is produced only by
//! [`Classifier::classify`] once the whole chain is exhausted.

use std::{
    any::{Any, type_name},
    fmt::{Debug, Formatter},
    marker::PhantomData,
    sync::{Arc, LazyLock},
};

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::{error::NoMatchError, schema::DataType, value::Value};

/// Marker for an explicit null host value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

/// One link of a classifier chain.
pub trait ClassifyRule: Send + Sync {
    fn try_classify(&self, value: &dyn Any) -> Option<DataType>;
}

impl<F> ClassifyRule for F
where
    F: Fn(&dyn Any) -> Option<DataType> + Send + Sync,
{
    fn try_classify(&self, value: &dyn Any) -> Option<DataType> {
        self(value)
    }
}

/// Rule matching every value of host type `T`.
pub struct TypeRule<T> {
    data_type: DataType,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeRule<T> {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            _marker: PhantomData,
        }
    }
}

impl<T: Any> ClassifyRule for TypeRule<T> {
    fn try_classify(&self, value: &dyn Any) -> Option<DataType> {
        value.is::<T>().then(|| self.data_type.clone())
    }
}

/// A predicate paired with the data type it yields.
struct PredicateRule {
    data_type: DataType,
    predicate: fn(&dyn Any) -> bool,
}

impl ClassifyRule for PredicateRule {
    fn try_classify(&self, value: &dyn Any) -> Option<DataType> {
        let value = match host_option(value) {
            Some(Some(inner)) => inner,
            _ => value,
        };
        (self.predicate)(value).then(|| self.data_type.clone())
    }
}

/// Looks through `Option<T>` for the host types the base rules know.
///
/// `Some(None)` is an empty option, `Some(Some(inner))` a present one and
/// `None` means `value` is not one of these options.
fn host_option(value: &dyn Any) -> Option<Option<&dyn Any>> {
    macro_rules! try_option {
        ($($ty:ty),+ $(,)?) => {
            $(
                if let Some(option) = value.downcast_ref::<Option<$ty>>() {
                    return Some(option.as_ref().map(|inner| inner as &dyn Any));
                }
            )+
        };
    }

    try_option!(
        Null,
        bool,
        Bytes,
        Vec<u8>,
        String,
        &'static str,
        i8,
        i16,
        i32,
        i64,
        f32,
        f64,
        Decimal,
        DateTime<Utc>,
        NaiveDateTime,
        Value,
    );
    None
}

fn as_value(value: &dyn Any) -> Option<&Value> {
    value.downcast_ref::<Value>().map(Value::unwrap_optional)
}

macro_rules! is_any_of {
    ($value:expr, $($ty:ty),+) => {
        $($value.is::<$ty>())||+
    };
}

fn is_null(v: &dyn Any) -> bool {
    is_any_of!(v, Null, ())
        || matches!(host_option(v), Some(None))
        || as_value(v).is_some_and(Value::is_null)
}

fn is_boolean(v: &dyn Any) -> bool {
    v.is::<bool>() || matches!(as_value(v), Some(Value::Boolean(_)))
}

fn is_binary(v: &dyn Any) -> bool {
    is_any_of!(v, Bytes, Vec<u8>, Box<[u8]>, Arc<[u8]>, &'static [u8])
        || matches!(as_value(v), Some(Value::Binary(_)))
}

fn is_string(v: &dyn Any) -> bool {
    is_any_of!(v, String, &'static str, Box<str>, Arc<str>)
        || matches!(as_value(v), Some(Value::String(_)))
}

fn is_byte(v: &dyn Any) -> bool {
    v.is::<i8>() || matches!(as_value(v), Some(Value::Byte(_)))
}

fn is_short(v: &dyn Any) -> bool {
    v.is::<i16>() || matches!(as_value(v), Some(Value::Short(_)))
}

fn is_integer(v: &dyn Any) -> bool {
    v.is::<i32>() || matches!(as_value(v), Some(Value::Integer(_)))
}

fn is_long(v: &dyn Any) -> bool {
    v.is::<i64>() || matches!(as_value(v), Some(Value::Long(_)))
}

fn is_float(v: &dyn Any) -> bool {
    v.is::<f32>() || matches!(as_value(v), Some(Value::Float(_)))
}

fn is_double(v: &dyn Any) -> bool {
    v.is::<f64>() || matches!(as_value(v), Some(Value::Double(_)))
}

fn is_decimal(v: &dyn Any) -> bool {
    v.is::<Decimal>() || matches!(as_value(v), Some(Value::Decimal(_)))
}

fn is_timestamp(v: &dyn Any) -> bool {
    is_any_of!(v, DateTime<Utc>, NaiveDateTime) || matches!(as_value(v), Some(Value::Timestamp(_)))
}

static BASE: LazyLock<Classifier> = LazyLock::new(Classifier::build_base);

/// Ordered chain of classification rules.
#[derive(Clone, Default)]
pub struct Classifier {
    rules: Vec<Arc<dyn ClassifyRule>>,
}

impl Classifier {
    /// The base chain: null, boolean, binary, string, the four integer
    /// widths, the two float widths, decimal and timestamp, in that order.
    /// An empty `Option` of a known host type is null and a present one is
    /// classified by its contents.
    pub fn base() -> Self {
        BASE.clone()
    }

    /// A chain with no rules; every value fails to classify.
    pub fn empty() -> Self {
        Self::default()
    }

    fn build_base() -> Self {
        let table: [(DataType, fn(&dyn Any) -> bool); 12] = [
            (DataType::Null, is_null),
            (DataType::Boolean, is_boolean),
            (DataType::Binary, is_binary),
            (DataType::String, is_string),
            (DataType::Byte, is_byte),
            (DataType::Short, is_short),
            (DataType::Integer, is_integer),
            (DataType::Long, is_long),
            (DataType::Float, is_float),
            (DataType::Double, is_double),
            (DataType::Decimal, is_decimal),
            (DataType::Timestamp, is_timestamp),
        ];
        Self {
            rules: table
                .into_iter()
                .map(|(data_type, predicate)| {
                    Arc::new(PredicateRule {
                        data_type,
                        predicate,
                    }) as Arc<dyn ClassifyRule>
                })
                .collect(),
        }
    }

    /// Append a rule tried after every rule already in the chain.
    pub fn with_rule(mut self, rule: impl ClassifyRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append a rule matching every value of host type `T`.
    pub fn with_type<T: Any>(self, data_type: DataType) -> Self {
        self.with_rule(TypeRule::<T>::new(data_type))
    }

    /// Append all rules of `next`, keeping their order.
    pub fn chain(mut self, next: Classifier) -> Self {
        self.rules.extend(next.rules);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First matching rule's data type, or `None` once the chain is exhausted.
    pub fn try_classify(&self, value: &dyn Any) -> Option<DataType> {
        let (index, data_type) = self
            .rules
            .iter()
            .enumerate()
            .find_map(|(i, rule)| rule.try_classify(value).map(|dt| (i, dt)))?;
        tracing::trace!(rule = index, data_type = %data_type, "classified value");
        Some(data_type)
    }

    pub fn classify<T: Any>(&self, value: &T) -> Result<DataType, NoMatchError> {
        self.try_classify(value).ok_or(NoMatchError {
            type_name: type_name::<T>(),
        })
    }

    /// Like [`classify`](Self::classify) for an already type-erased value.
    pub fn classify_dyn(&self, value: &dyn Any) -> Result<DataType, NoMatchError> {
        self.try_classify(value).ok_or(NoMatchError {
            type_name: "dyn Any",
        })
    }
}

impl ClassifyRule for Classifier {
    fn try_classify(&self, value: &dyn Any) -> Option<DataType> {
        Classifier::try_classify(self, value)
    }
}

impl Debug for Classifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Classify with the base chain.
pub fn classify<T: Any>(value: &T) -> Result<DataType, NoMatchError> {
    BASE.classify(value)
}
