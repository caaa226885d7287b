use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

use serde::{Deserialize, Serialize};

/// Precision used when a [`DataType::Decimal`] is rendered or exported.
pub const DECIMAL_PRECISION: u8 = 38;
/// Scale used when a [`DataType::Decimal`] is rendered or exported.
pub const DECIMAL_SCALE: i8 = 18;

/// Closed schema type algebra.
///
/// Composite variants are structurally recursive but always finite: they are
/// built from a type descriptor graph, never from runtime data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "super::json::RawType", into = "super::json::JsonType")]
pub enum DataType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    Binary,
    Decimal,
    Timestamp,
    Null,
    Array {
        element: Box<DataType>,
        contains_null: bool,
    },
    Map {
        key: Box<DataType>,
        value: Box<DataType>,
        value_contains_null: bool,
    },
    Struct(StructFields),
}

impl DataType {
    /// `Array` whose elements may be null.
    ///
    /// Used for heterogeneous runtime sequences where element nullability is
    /// not known statically.
    pub fn array(element: DataType) -> Self {
        Self::array_of(element, true)
    }

    pub fn array_of(element: DataType, contains_null: bool) -> Self {
        Self::Array {
            element: Box::new(element),
            contains_null,
        }
    }

    pub fn map(key: DataType, value: DataType, value_contains_null: bool) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
            value_contains_null,
        }
    }

    pub fn struct_of(fields: impl Into<StructFields>) -> Self {
        Self::Struct(fields.into())
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            DataType::Array { .. } | DataType::Map { .. } | DataType::Struct(_)
        )
    }

    /// Name used by the tree and JSON renderings.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Byte => "byte",
            DataType::Short => "short",
            DataType::Integer => "integer",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::Binary => "binary",
            DataType::Decimal => "decimal",
            DataType::Timestamp => "timestamp",
            DataType::Null => "null",
            DataType::Array { .. } => "array",
            DataType::Map { .. } => "map",
            DataType::Struct(_) => "struct",
        }
    }

    /// Compact one-line rendering, e.g. `struct<id:int,tags:array<string>>`.
    pub fn simple_string(&self) -> String {
        match self {
            DataType::Byte => "tinyint".to_string(),
            DataType::Short => "smallint".to_string(),
            DataType::Integer => "int".to_string(),
            DataType::Long => "bigint".to_string(),
            DataType::Null => "void".to_string(),
            DataType::Decimal => format!("decimal({DECIMAL_PRECISION},{DECIMAL_SCALE})"),
            DataType::Array { element, .. } => format!("array<{}>", element.simple_string()),
            DataType::Map { key, value, .. } => {
                format!("map<{},{}>", key.simple_string(), value.simple_string())
            }
            DataType::Struct(fields) => {
                let members: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{}:{}", f.name, f.data_type.simple_string()))
                    .collect();
                format!("struct<{}>", members.join(","))
            }
            other => other.type_name().to_string(),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.simple_string())
    }
}

/// Ordered collection of [`StructField`] used as the body of a `Struct`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructFields(pub Vec<StructField>);

impl StructFields {
    pub fn new(fields: Vec<StructField>) -> Self {
        Self(fields)
    }

    pub fn as_slice(&self) -> &[StructField] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructField> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&StructField> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }
}

impl From<Vec<StructField>> for StructFields {
    fn from(value: Vec<StructField>) -> Self {
        Self(value)
    }
}

impl From<StructFields> for Vec<StructField> {
    fn from(value: StructFields) -> Self {
        value.0
    }
}

impl AsRef<[StructField]> for StructFields {
    fn as_ref(&self) -> &[StructField] {
        self.as_slice()
    }
}

impl Deref for StructFields {
    type Target = [StructField];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl FromIterator<StructField> for StructFields {
    fn from_iter<I: IntoIterator<Item = StructField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Named, typed member of a `Struct`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub nullable: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

/// Inferred shape of a type plus whether a value of it may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub data_type: DataType,
    pub nullable: bool,
}

impl Schema {
    pub fn new(data_type: DataType, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }

    /// Struct fields of the schema, empty for non-struct types.
    pub fn fields(&self) -> &[StructField] {
        match &self.data_type {
            DataType::Struct(fields) => fields.as_slice(),
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&super::tree_string(self)?)
    }
}
