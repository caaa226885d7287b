/// Implements [`Reflect`](crate::Reflect) and [`ToValue`](crate::ToValue)
/// for a struct by listing its fields in declaration order.
///
/// ```rust
/// use typerow_core::{infer_type, reflect_record, DataType};
///
/// struct Point {
///     x: i32,
///     label: Option<String>,
/// }
///
/// reflect_record!(Point { x: i32, label: Option<String> });
///
/// let schema = infer_type::<Point>().unwrap();
/// assert_eq!(schema.fields()[0].data_type, DataType::Integer);
/// assert!(schema.fields()[1].nullable);
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn type_descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::record(
                    stringify!($ty),
                    vec![$(
                        $crate::Member::new(
                            stringify!($field),
                            <$fty as $crate::Reflect>::type_descriptor(),
                        )
                    ),*],
                )
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record(vec![$(
                    <$fty as $crate::ToValue>::to_value(&self.$field)
                ),*])
            }
        }
    };
}
