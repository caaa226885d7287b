//! Schema algebra: [`DataType`], [`StructField`] and [`Schema`].

mod format;
pub(crate) mod json;
mod types;

pub use format::tree_string;
pub use types::{DECIMAL_PRECISION, DECIMAL_SCALE, DataType, Schema, StructField, StructFields};
