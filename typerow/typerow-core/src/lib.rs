//! Type-and-value reflection core for `typerow`.
//!
//! This crate maps structural type descriptions ([`TypeDescriptor`]) onto a
//! closed schema algebra ([`DataType`] / [`Schema`]), classifies untyped
//! runtime values into that algebra ([`Classifier`]), and converts structured
//! [`Value`]s into canonical rows aligned with a schema ([`CanonicalValue`]).
//! It has no Arrow or storage dependency.

mod classify;
mod descriptor;
mod error;
mod infer;
mod macros;
mod row;
mod schema;
mod value;

pub use classify::{Classifier, ClassifyRule, Null, TypeRule, classify};
pub use descriptor::{Member, PrimitiveKind, Reflect, TypeBindings, TypeDescriptor, TypeKind};
pub use error::{NoMatchError, SchemaJsonError, UnsupportedTypeError, ValueTypeError};
pub use infer::{SchemaCache, infer, infer_type, infer_with_bindings};
pub use row::{CanonicalValue, convert, convert_as};
pub use schema::{
    DECIMAL_PRECISION, DECIMAL_SCALE, DataType, Schema, StructField, StructFields, tree_string,
};
pub use value::{ToValue, Value};
