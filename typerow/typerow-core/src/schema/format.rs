use std::fmt::{Error, Result, Write as _};

use super::{DataType, Schema, StructField};

/// Render a schema as an indented tree:
///
/// ```text
/// root
///  |-- id: long (nullable = false)
///  |-- tags: array (nullable = true)
///  |    |-- element: string (containsNull = true)
/// ```
///
/// A non-struct schema is rendered as a single `value` entry under `root`.
pub fn tree_string(schema: &Schema) -> std::result::Result<String, Error> {
    let mut out = String::from("root\n");
    write_root(schema, &mut out)?;
    Ok(out)
}

fn write_root(schema: &Schema, out: &mut String) -> Result {
    match &schema.data_type {
        DataType::Struct(fields) => {
            for field in fields.iter() {
                write_field(field, 1, out)?;
            }
            Ok(())
        }
        other => write_entry(
            "value",
            other,
            Some(("nullable", schema.nullable)),
            1,
            out,
        ),
    }
}

fn write_field(field: &StructField, depth: usize, out: &mut String) -> Result {
    write_entry(
        &field.name,
        &field.data_type,
        Some(("nullable", field.nullable)),
        depth,
        out,
    )
}

fn write_entry(
    label: &str,
    data_type: &DataType,
    flag: Option<(&str, bool)>,
    depth: usize,
    out: &mut String,
) -> Result {
    let prefix = " |   ".repeat(depth - 1);
    write!(out, "{prefix} |-- {label}: {}", data_type.type_name())?;
    if let Some((name, value)) = flag {
        write!(out, " ({name} = {value})")?;
    }
    out.push('\n');
    write_children(data_type, depth + 1, out)
}

fn write_children(data_type: &DataType, depth: usize, out: &mut String) -> Result {
    match data_type {
        DataType::Struct(fields) => {
            for field in fields.iter() {
                write_field(field, depth, out)?;
            }
        }
        DataType::Array {
            element,
            contains_null,
        } => {
            write_entry(
                "element",
                element,
                Some(("containsNull", *contains_null)),
                depth,
                out,
            )?;
        }
        DataType::Map {
            key,
            value,
            value_contains_null,
        } => {
            write_entry("key", key, None, depth, out)?;
            write_entry(
                "value",
                value,
                Some(("valueContainsNull", *value_contains_null)),
                depth,
                out,
            )?;
        }
        _ => {}
    }
    Ok(())
}
