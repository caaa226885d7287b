//! Structural type descriptors consumed by schema inference.
//!
//! A [`TypeDescriptor`] is the read-only view of a static type the inference
//! walk operates on: its structural [`TypeKind`] plus member descriptors or
//! type arguments. How descriptors are obtained does not matter to the
//! engine; the [`Reflect`] trait is the in-crate provider, implemented for
//! std and ecosystem types and by [`reflect_record!`](crate::reflect_record)
//! for user structs. Descriptors may also be assembled by hand.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    fmt::{Display, Formatter},
};

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

/// Unboxed numeric and boolean kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
}

/// Structural kind of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Unboxed numeric/boolean; can never be absent.
    Primitive(PrimitiveKind),
    /// Reference-typed numeric/boolean; may be absent.
    Boxed(PrimitiveKind),
    String,
    Decimal,
    Timestamp,
    Binary,
    Optional(Box<TypeDescriptor>),
    Sequence(Box<TypeDescriptor>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// Named members in declaration order.
    Record(Vec<Member>),
    /// Positional members; named `_1`, `_2`, ... by inference.
    Tuple(Vec<TypeDescriptor>),
    /// Generic parameter to be bound at the call site.
    TypeParameter(String),
    /// Known to the provider but without a structural rule.
    Opaque,
}

/// Structural description of a type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
}

/// A named member of a record descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

impl Member {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }
}

/// Concrete type arguments keyed by parameter name.
pub type TypeBindings = HashMap<String, TypeDescriptor>;

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.rust_name(), TypeKind::Primitive(kind))
    }

    pub fn boxed(kind: PrimitiveKind) -> Self {
        Self::new(kind.boxed_name(), TypeKind::Boxed(kind))
    }

    pub fn string() -> Self {
        Self::new("String", TypeKind::String)
    }

    pub fn decimal() -> Self {
        Self::new("Decimal", TypeKind::Decimal)
    }

    pub fn timestamp() -> Self {
        Self::new("Timestamp", TypeKind::Timestamp)
    }

    pub fn binary() -> Self {
        Self::new("Bytes", TypeKind::Binary)
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::new(
            format!("Option<{}>", inner.name),
            TypeKind::Optional(Box::new(inner)),
        )
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        Self::new(
            format!("Vec<{}>", element.name),
            TypeKind::Sequence(Box::new(element)),
        )
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(
            format!("Map<{}, {}>", key.name, value.name),
            TypeKind::Map {
                key: Box::new(key),
                value: Box::new(value),
            },
        )
    }

    pub fn record(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self::new(name, TypeKind::Record(members))
    }

    pub fn tuple(elements: Vec<TypeDescriptor>) -> Self {
        let names: Vec<&str> = elements.iter().map(|e| e.name.as_str()).collect();
        let name = format!("({})", names.join(", "));
        Self::new(name, TypeKind::Tuple(elements))
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), TypeKind::TypeParameter(name))
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Opaque)
    }

    /// Replace every bound type parameter with its argument.
    ///
    /// Unbound parameters are left in place.
    pub fn substitute(&self, bindings: &TypeBindings) -> TypeDescriptor {
        let kind = match &self.kind {
            TypeKind::TypeParameter(param) => {
                return match bindings.get(param) {
                    Some(bound) => bound.clone(),
                    None => self.clone(),
                };
            }
            TypeKind::Optional(inner) => TypeKind::Optional(Box::new(inner.substitute(bindings))),
            TypeKind::Sequence(element) => {
                TypeKind::Sequence(Box::new(element.substitute(bindings)))
            }
            TypeKind::Map { key, value } => TypeKind::Map {
                key: Box::new(key.substitute(bindings)),
                value: Box::new(value.substitute(bindings)),
            },
            TypeKind::Record(members) => TypeKind::Record(
                members
                    .iter()
                    .map(|m| Member::new(m.name.clone(), m.descriptor.substitute(bindings)))
                    .collect(),
            ),
            TypeKind::Tuple(elements) => {
                TypeKind::Tuple(elements.iter().map(|e| e.substitute(bindings)).collect())
            }
            other => other.clone(),
        };
        TypeDescriptor::new(self.name.clone(), kind)
    }

    /// True when no type parameter remains anywhere in the descriptor.
    pub fn is_concrete(&self) -> bool {
        match &self.kind {
            TypeKind::TypeParameter(_) => false,
            TypeKind::Optional(inner) | TypeKind::Sequence(inner) => inner.is_concrete(),
            TypeKind::Map { key, value } => key.is_concrete() && value.is_concrete(),
            TypeKind::Record(members) => members.iter().all(|m| m.descriptor.is_concrete()),
            TypeKind::Tuple(elements) => elements.iter().all(TypeDescriptor::is_concrete),
            _ => true,
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl PrimitiveKind {
    fn rust_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Byte => "i8",
            PrimitiveKind::Short => "i16",
            PrimitiveKind::Integer => "i32",
            PrimitiveKind::Long => "i64",
            PrimitiveKind::Float => "f32",
            PrimitiveKind::Double => "f64",
        }
    }

    fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Integer => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }
}

/// Provides the structural descriptor of a static type.
pub trait Reflect: 'static {
    fn type_descriptor() -> TypeDescriptor;
}

macro_rules! reflect_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::primitive(PrimitiveKind::$kind)
                }
            }
        )*
    };
}

reflect_primitive!(
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
);

impl Reflect for String {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::string()
    }
}

impl Reflect for Bytes {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::binary()
    }
}

impl Reflect for Decimal {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::decimal()
    }
}

impl Reflect for DateTime<Utc> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new("DateTime<Utc>", TypeKind::Timestamp)
    }
}

impl Reflect for NaiveDateTime {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new("NaiveDateTime", TypeKind::Timestamp)
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::type_descriptor())
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_descriptor() -> TypeDescriptor {
        T::type_descriptor()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence(T::type_descriptor())
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence(T::type_descriptor())
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence(T::type_descriptor())
    }
}

impl<K: Reflect, V: Reflect, S: 'static> Reflect for HashMap<K, V, S> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::type_descriptor(), V::type_descriptor())
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::type_descriptor(), V::type_descriptor())
    }
}

macro_rules! reflect_tuple {
    ($($name:ident),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            fn type_descriptor() -> TypeDescriptor {
                TypeDescriptor::tuple(vec![$($name::type_descriptor()),+])
            }
        }
    };
}

reflect_tuple!(A);
reflect_tuple!(A, B);
reflect_tuple!(A, B, C);
reflect_tuple!(A, B, C, D);
reflect_tuple!(A, B, C, D, E);
reflect_tuple!(A, B, C, D, E, F);
