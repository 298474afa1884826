use sluice_core::{schema::ColumnType, stmt::Value};

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// A Rust type that maps onto a single column.
pub trait Primitive: Sized {
    const TYPE: ColumnType;
    const NULLABLE: bool = false;

    fn into_value(self) -> Value;
}

macro_rules! impl_primitive {
    ( $( $ty:ty => $column_ty:ident ;)* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: ColumnType = ColumnType::$column_ty;

                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_primitive! {
    i8 => Int;
    i16 => Int;
    i32 => Int;
    i64 => Int;
    u8 => Int;
    u16 => Int;
    u32 => Int;
    f32 => Float;
    f64 => Float;
    bool => Bool;
    String => Text;
    NaiveDateTime => DateTime;
    DateTime<Utc> => DateTime;
    Uuid => Guid;
    Vec<u8> => Blob;
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: ColumnType = T::TYPE;
    const NULLABLE: bool = true;

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}

/// Marker for types that take part in arithmetic.
pub trait Numeric: Primitive {}

/// Numeric types that also support bitwise operators.
pub trait Integer: Numeric {}

/// Marker for text columns.
pub trait Text: Primitive {}

/// Marker for date and time columns.
pub trait Temporal: Primitive {}

macro_rules! impl_marker {
    ( $marker:ident: $( $ty:ty ),* ) => {
        $(
            impl $marker for $ty {}
        )*
        impl<T: $marker> $marker for Option<T> {}
    };
}

impl_marker!(Numeric: i8, i16, i32, i64, u8, u16, u32, f32, f64);
impl_marker!(Integer: i8, i16, i32, i64, u8, u16, u32);
impl_marker!(Text: String);
impl_marker!(Temporal: NaiveDateTime, DateTime<Utc>);
