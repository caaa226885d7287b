//! Type-driven schema inference.
//!
//! Nullability is decided per position: unboxed primitives are never null,
//! everything else may be. A struct field, array element or map value takes
//! the nullability of its own inference result, while an optional wrapper
//! forces `true` at its level and delegates the shape to its inner type.
//! The top level of every inferred [`Schema`] is nullable.

use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
    sync::{LazyLock, RwLock},
};

use crate::{
    descriptor::{PrimitiveKind, Reflect, TypeBindings, TypeDescriptor, TypeKind},
    error::UnsupportedTypeError,
    schema::{DataType, Schema, StructField},
};

/// Infer the schema of a concrete type descriptor.
///
/// A type parameter anywhere in the descriptor is rejected; use
/// [`infer_with_bindings`] to supply its arguments.
pub fn infer(descriptor: &TypeDescriptor) -> Result<Schema, UnsupportedTypeError> {
    infer_with_bindings(descriptor, &TypeBindings::new())
}

/// Infer a schema, resolving type parameters through `bindings`.
pub fn infer_with_bindings(
    descriptor: &TypeDescriptor,
    bindings: &TypeBindings,
) -> Result<Schema, UnsupportedTypeError> {
    let position = infer_position(descriptor, bindings)?;
    Ok(Schema::new(position.data_type, true))
}

/// Infer the schema of a [`Reflect`] type, memoized in the global cache.
pub fn infer_type<T: Reflect>() -> Result<Schema, UnsupportedTypeError> {
    SchemaCache::global().get_or_infer::<T>()
}

/// Shape and nullability of a single position (field, element or value).
struct Position {
    data_type: DataType,
    nullable: bool,
}

impl Position {
    fn new(data_type: DataType, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }
}

fn infer_position(
    descriptor: &TypeDescriptor,
    bindings: &TypeBindings,
) -> Result<Position, UnsupportedTypeError> {
    let position = match &descriptor.kind {
        TypeKind::Primitive(kind) => Position::new(primitive_data_type(*kind), false),
        TypeKind::Boxed(kind) => Position::new(primitive_data_type(*kind), true),
        TypeKind::String => Position::new(DataType::String, true),
        TypeKind::Decimal => Position::new(DataType::Decimal, true),
        TypeKind::Timestamp => Position::new(DataType::Timestamp, true),
        TypeKind::Binary => Position::new(DataType::Binary, true),
        TypeKind::Optional(inner) => {
            let inner = infer_position(inner, bindings)?;
            Position::new(inner.data_type, true)
        }
        TypeKind::Sequence(element) => {
            let element = infer_position(element, bindings)?;
            Position::new(DataType::array_of(element.data_type, element.nullable), true)
        }
        TypeKind::Map { key, value } => {
            let key = infer_position(key, bindings)?;
            let value = infer_position(value, bindings)?;
            Position::new(
                DataType::map(key.data_type, value.data_type, value.nullable),
                true,
            )
        }
        TypeKind::Record(members) => {
            let mut seen = HashSet::with_capacity(members.len());
            let mut fields = Vec::with_capacity(members.len());
            for member in members {
                if !seen.insert(member.name.as_str()) {
                    return Err(UnsupportedTypeError::new(
                        descriptor.clone(),
                        format!("duplicate member name '{}'", member.name),
                    ));
                }
                let position = infer_position(&member.descriptor, bindings)?;
                fields.push(StructField::new(
                    member.name.clone(),
                    position.data_type,
                    position.nullable,
                ));
            }
            Position::new(DataType::struct_of(fields), true)
        }
        TypeKind::Tuple(elements) => {
            let fields = elements
                .iter()
                .enumerate()
                .map(|(i, element)| {
                    let position = infer_position(element, bindings)?;
                    Ok(StructField::new(
                        format!("_{}", i + 1),
                        position.data_type,
                        position.nullable,
                    ))
                })
                .collect::<Result<Vec<_>, UnsupportedTypeError>>()?;
            Position::new(DataType::struct_of(fields), true)
        }
        // Arguments are concrete, so a bound type is inferred without bindings.
        TypeKind::TypeParameter(param) => match bindings.get(param) {
            Some(bound) => return infer_position(bound, &TypeBindings::new()),
            None => {
                return Err(UnsupportedTypeError::new(
                    descriptor.clone(),
                    format!("type parameter '{param}' is not bound to a concrete type"),
                ));
            }
        },
        TypeKind::Opaque => {
            return Err(UnsupportedTypeError::new(
                descriptor.clone(),
                "no schema rule for this type",
            ));
        }
    };
    Ok(position)
}

fn primitive_data_type(kind: PrimitiveKind) -> DataType {
    match kind {
        PrimitiveKind::Boolean => DataType::Boolean,
        PrimitiveKind::Byte => DataType::Byte,
        PrimitiveKind::Short => DataType::Short,
        PrimitiveKind::Integer => DataType::Integer,
        PrimitiveKind::Long => DataType::Long,
        PrimitiveKind::Float => DataType::Float,
        PrimitiveKind::Double => DataType::Double,
    }
}

static GLOBAL_CACHE: LazyLock<SchemaCache> = LazyLock::new(SchemaCache::new);

/// Inferred schemas keyed by type identity.
///
/// Reads share a lock; a miss infers outside any lock and then publishes.
/// Two racing misses for the same type both infer and the first insert wins,
/// which is harmless because inference is deterministic.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<TypeId, Schema>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by [`infer_type`].
    pub fn global() -> &'static SchemaCache {
        &GLOBAL_CACHE
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get_or_infer<T: Reflect>(&self) -> Result<Schema, UnsupportedTypeError> {
        let key = TypeId::of::<T>();
        if let Some(schema) = self
            .entries
            .read()
            .expect("schema cache poisoned")
            .get(&key)
        {
            return Ok(schema.clone());
        }

        let descriptor = T::type_descriptor();
        tracing::debug!(type_name = %descriptor, "schema cache miss");
        let schema = infer(&descriptor)?;

        let mut entries = self.entries.write().expect("schema cache poisoned");
        Ok(entries.entry(key).or_insert(schema).clone())
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn contains<T: Reflect>(&self) -> bool {
        self.entries
            .read()
            .expect("schema cache poisoned")
            .contains_key(&TypeId::of::<T>())
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().expect("schema cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.entries.write().expect("schema cache poisoned").clear();
    }
}
