//! Configured entry point combining inference, classification and rows.

use std::{any::Any, sync::Arc};

#[cfg(feature = "arrow")]
use arrow::{datatypes::Schema as ArrowSchema, record_batch::RecordBatch};
use typerow_core::{
    CanonicalValue, Classifier, ClassifyRule, DataType, Reflect, Schema, SchemaCache, ToValue,
    convert, infer,
};

use crate::error::ReflectorError;

/// Where inferred schemas are memoized.
#[derive(Debug, Clone)]
enum CacheMode {
    Global,
    Shared(Arc<SchemaCache>),
    Disabled,
}

/// Reflection engine with a fixed classifier chain and schema cache.
#[derive(Debug, Clone)]
pub struct Reflector {
    classifier: Classifier,
    cache: CacheMode,
}

/// Builder for configuring [`Reflector`].
pub struct ReflectorBuilder {
    classifier: Classifier,
    cache: CacheMode,
}

impl Reflector {
    /// Create a builder for [`Reflector`].
    pub fn builder() -> ReflectorBuilder {
        ReflectorBuilder {
            classifier: Classifier::base(),
            cache: CacheMode::Global,
        }
    }

    /// Base classifier and the process-wide schema cache.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn schema_of<T: Reflect>(&self) -> Result<Schema, ReflectorError> {
        let schema = match &self.cache {
            CacheMode::Global => SchemaCache::global().get_or_infer::<T>()?,
            CacheMode::Shared(cache) => cache.get_or_infer::<T>()?,
            CacheMode::Disabled => infer(&T::type_descriptor())?,
        };
        Ok(schema)
    }

    pub fn classify<V: Any>(&self, value: &V) -> Result<DataType, ReflectorError> {
        Ok(self.classifier.classify(value)?)
    }

    /// Canonical row of `value` against the schema of `T`.
    pub fn to_row<T: Reflect + ToValue>(&self, value: &T) -> Result<CanonicalValue, ReflectorError> {
        let schema = self.schema_of::<T>()?;
        Ok(convert(&value.to_value(), &schema))
    }

    #[cfg(feature = "arrow")]
    pub fn arrow_schema_of<T: Reflect>(&self) -> Result<ArrowSchema, ReflectorError> {
        let schema = self.schema_of::<T>()?;
        Ok(typerow_arrow::schema_to_arrow_schema(&schema)?)
    }

    /// Convert a slice of records into one `RecordBatch`.
    #[cfg(feature = "arrow")]
    pub fn to_record_batch<T: Reflect + ToValue>(
        &self,
        values: &[T],
    ) -> Result<RecordBatch, ReflectorError> {
        let schema = self.schema_of::<T>()?;
        let rows: Vec<CanonicalValue> = values
            .iter()
            .map(|v| convert(&v.to_value(), &schema))
            .collect();
        tracing::debug!(rows = rows.len(), "building record batch");
        Ok(typerow_arrow::rows_to_record_batch(&schema, &rows)?)
    }
}

impl Default for Reflector {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflectorBuilder {
    /// Append a classification rule tried after the base rules and any rule
    /// added before it.
    pub fn with_rule(mut self, rule: impl ClassifyRule + 'static) -> Self {
        self.classifier = self.classifier.with_rule(rule);
        self
    }

    /// Append every rule of `classifier`, keeping its order.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = self.classifier.chain(classifier);
        self
    }

    /// Memoize schemas in `cache` instead of the process-wide cache.
    pub fn with_cache(mut self, cache: Arc<SchemaCache>) -> Self {
        self.cache = CacheMode::Shared(cache);
        self
    }

    /// Infer on every call.
    pub fn without_cache(mut self) -> Self {
        self.cache = CacheMode::Disabled;
        self
    }

    pub fn build(self) -> Reflector {
        Reflector {
            classifier: self.classifier,
            cache: self.cache,
        }
    }
}
