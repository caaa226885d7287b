//! JSON form of the schema algebra.
//!
//! Primitive types are plain strings (`"integer"`), composite types are
//! objects tagged by `"type"`:
//!
//! ```json
//! {"type": "array", "elementType": "string", "containsNull": true}
//! {"type": "map", "keyType": "string", "valueType": "long", "valueContainsNull": false}
//! {"type": "struct", "fields": [{"name": "id", "type": "long", "nullable": false}]}
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::{DECIMAL_PRECISION, DECIMAL_SCALE, DataType, Schema, StructField};
use crate::error::SchemaJsonError;

#[derive(Serialize)]
#[serde(untagged)]
pub(crate) enum JsonType {
    Name(String),
    Composite(JsonComposite),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum JsonComposite {
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<DataType>,
        #[serde(rename = "containsNull")]
        contains_null: bool,
    },
    Map {
        #[serde(rename = "keyType")]
        key_type: Box<DataType>,
        #[serde(rename = "valueType")]
        value_type: Box<DataType>,
        #[serde(rename = "valueContainsNull")]
        value_contains_null: bool,
    },
    Struct { fields: Vec<StructField> },
}

/// Parsed but not yet validated type; names are checked by [`resolve`].
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawType {
    Name(String),
    Composite(RawComposite),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum RawComposite {
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<RawType>,
        #[serde(rename = "containsNull")]
        contains_null: bool,
    },
    Map {
        #[serde(rename = "keyType")]
        key_type: Box<RawType>,
        #[serde(rename = "valueType")]
        value_type: Box<RawType>,
        #[serde(rename = "valueContainsNull")]
        value_contains_null: bool,
    },
    Struct { fields: Vec<RawField> },
}

#[derive(Deserialize)]
pub(crate) struct RawField {
    name: String,
    #[serde(rename = "type")]
    data_type: RawType,
    nullable: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    data_type: RawType,
    nullable: bool,
}

impl From<DataType> for JsonType {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Array {
                element,
                contains_null,
            } => JsonType::Composite(JsonComposite::Array {
                element_type: element,
                contains_null,
            }),
            DataType::Map {
                key,
                value,
                value_contains_null,
            } => JsonType::Composite(JsonComposite::Map {
                key_type: key,
                value_type: value,
                value_contains_null,
            }),
            DataType::Struct(fields) => JsonType::Composite(JsonComposite::Struct {
                fields: fields.into(),
            }),
            DataType::Decimal => {
                JsonType::Name(format!("decimal({DECIMAL_PRECISION},{DECIMAL_SCALE})"))
            }
            primitive => JsonType::Name(primitive.type_name().to_string()),
        }
    }
}

impl TryFrom<RawType> for DataType {
    type Error = SchemaJsonError;

    fn try_from(value: RawType) -> Result<Self, Self::Error> {
        resolve(value)
    }
}

fn resolve(raw: RawType) -> Result<DataType, SchemaJsonError> {
    match raw {
        RawType::Name(name) => primitive_from_name(&name),
        RawType::Composite(RawComposite::Array {
            element_type,
            contains_null,
        }) => Ok(DataType::array_of(resolve(*element_type)?, contains_null)),
        RawType::Composite(RawComposite::Map {
            key_type,
            value_type,
            value_contains_null,
        }) => Ok(DataType::map(
            resolve(*key_type)?,
            resolve(*value_type)?,
            value_contains_null,
        )),
        RawType::Composite(RawComposite::Struct { fields }) => {
            let mut seen = HashSet::with_capacity(fields.len());
            let mut resolved = Vec::with_capacity(fields.len());
            for field in fields {
                if !seen.insert(field.name.clone()) {
                    return Err(SchemaJsonError::DuplicateField { name: field.name });
                }
                resolved.push(StructField::new(
                    field.name,
                    resolve(field.data_type)?,
                    field.nullable,
                ));
            }
            Ok(DataType::struct_of(resolved))
        }
    }
}

fn primitive_from_name(name: &str) -> Result<DataType, SchemaJsonError> {
    let data_type = match name {
        "boolean" => DataType::Boolean,
        "byte" => DataType::Byte,
        "short" => DataType::Short,
        "integer" => DataType::Integer,
        "long" => DataType::Long,
        "float" => DataType::Float,
        "double" => DataType::Double,
        "string" => DataType::String,
        "binary" => DataType::Binary,
        "timestamp" => DataType::Timestamp,
        "null" => DataType::Null,
        "decimal" => DataType::Decimal,
        v if v.starts_with("decimal(") => {
            let params: Vec<&str> = v
                .trim_start_matches("decimal(")
                .trim_end_matches(')')
                .split(',')
                .map(str::trim)
                .collect();
            let expected = [DECIMAL_PRECISION.to_string(), DECIMAL_SCALE.to_string()];
            if params != expected {
                return Err(SchemaJsonError::UnsupportedDecimal {
                    name: v.to_string(),
                });
            }
            DataType::Decimal
        }
        other => {
            return Err(SchemaJsonError::UnknownType {
                name: other.to_string(),
            });
        }
    };
    Ok(data_type)
}

impl DataType {
    pub fn to_json(&self) -> Result<String, SchemaJsonError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate; invalid type names and duplicate fields are
    /// reported as their own [`SchemaJsonError`] variants.
    pub fn from_json(json: &str) -> Result<Self, SchemaJsonError> {
        resolve(serde_json::from_str(json)?)
    }
}

impl Schema {
    pub fn to_json(&self) -> Result<String, SchemaJsonError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaJsonError> {
        let raw: RawSchema = serde_json::from_str(json)?;
        Ok(Schema::new(resolve(raw.data_type)?, raw.nullable))
    }
}
