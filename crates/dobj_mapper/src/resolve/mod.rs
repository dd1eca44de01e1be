//! Static classification of field types.
//!
//! Every type usable as a data-object field implements [`FieldType`], which
//! names its [`TypeTag`] and converts a [`Resolved`] value into the field.
//!
//! | Rust type                                  | tag                  |
//! |--------------------------------------------|----------------------|
//! | `i8`..`i64`, `u8`..`u64`, `isize`, `usize` | `Scalar(Int)`        |
//! | `f32`, `f64`                               | `Scalar(Float)`      |
//! | `String`                                   | `Scalar(String)`     |
//! | `bool`                                     | `Scalar(Bool)`       |
//! | `DateTime<FixedOffset>`                    | `Temporal`           |
//! | `#[derive(DataObject)]` types              | `NestedObject`       |
//! | `Vec<T>` of data objects                   | `NestedObjectList`   |
//! | [`impl_opaque_field!`] types               | `Opaque`             |
//! | `serde_json::Value`                        | `Unknown`            |
//!
//! `Option<T>` has the tag of `T` and is nullable. A field whose type
//! implements none of these is rejected at compile time.
//!
//! [`impl_opaque_field!`]: crate::impl_opaque_field

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use crate::error::{Error, Result};
use crate::hydrate::{self, Resolved};
use crate::info::{Field, ObjectRef, TypeTag};
use crate::record::value_kind;
use crate::ser::FieldValue;
use crate::{DataObject, Record, Value};

// -----------------------------------------------------------------------------
// Modules

mod opaque;
mod scalar;
mod temporal;

// -----------------------------------------------------------------------------
// Exports

pub use opaque::{OpaqueValue, opaque_from_resolved};
pub use scalar::coerce;
pub use temporal::parse_temporal;

// -----------------------------------------------------------------------------
// FieldType

/// A type that can be declared as a data-object field.
pub trait FieldType: FieldValue + Sized + Send + 'static {
    /// The classification of this type.
    fn type_tag() -> TypeTag;

    /// Returns `true` if a null value is a legal value of this type.
    #[inline]
    fn nullable() -> bool {
        false
    }

    /// Converts the value produced by the hydrator into `Self`.
    fn from_resolved(resolved: Resolved) -> Result<Self>;
}

/// Builds the descriptor of a field of type `T` declared as `name`.
///
/// ```
/// use dobj_mapper::info::{ScalarKind, TypeTag};
/// use dobj_mapper::resolve::classify;
///
/// let field = classify::<Option<i32>>("parentId");
/// assert_eq!(field.tag(), &TypeTag::Scalar(ScalarKind::Int));
/// assert!(field.nullable());
/// assert_eq!(field.snake_name(), "parent_id");
/// ```
#[inline]
pub fn classify<T: FieldType>(name: &'static str) -> Field {
    Field::new(name, T::type_tag(), T::nullable(), type_name::<T>())
}

// -----------------------------------------------------------------------------
// Option

impl<T: FieldType> FieldType for Option<T> {
    #[inline]
    fn type_tag() -> TypeTag {
        T::type_tag()
    }

    #[inline]
    fn nullable() -> bool {
        true
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        match resolved {
            Resolved::Null => Ok(None),
            resolved => T::from_resolved(resolved).map(Some),
        }
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T: DataObject> FieldType for Vec<T> {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::NestedObjectList(ObjectRef::of::<T>())
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        match resolved {
            Resolved::Null => Ok(Vec::new()),
            Resolved::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| downcast::<T>(item).map_err(|e| e.at_index(index)))
                .collect(),
            Resolved::Value(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    object_from_resolved::<T>(Resolved::Value(item)).map_err(|e| e.at_index(index))
                })
                .collect(),
            other => Err(Error::mismatch(format!(
                "expected a list of `{}`, found {}",
                type_name::<T>(),
                other.kind()
            ))),
        }
    }
}

// -----------------------------------------------------------------------------
// Value

impl FieldType for Value {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Unknown
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        Ok(match resolved {
            Resolved::Null => Value::Null,
            Resolved::Value(value) => value,
            Resolved::Temporal(dt) => Value::String(dt.to_rfc3339()),
            other => {
                return Err(Error::mismatch(format!(
                    "cannot pass {} through as a raw value",
                    other.kind()
                )));
            }
        })
    }
}

// -----------------------------------------------------------------------------
// Nested objects

/// Converts a resolved nested value into the data-object type `T`.
///
/// Used by the generated [`FieldType`] impl of every data-object type.
/// A `null` value hydrates `T` from an empty record, so that all of its
/// own defaults apply.
pub fn object_from_resolved<T: DataObject>(resolved: Resolved) -> Result<T> {
    match resolved {
        Resolved::Object(object) => downcast::<T>(object),
        Resolved::Null | Resolved::Value(Value::Null) => hydrate::hydrate::<T>(Record::new()),
        Resolved::Value(Value::Object(record)) => hydrate::hydrate::<T>(record),
        Resolved::Value(value) => Err(Error::mismatch(format!(
            "expected a mapping for `{}`, found {}",
            type_name::<T>(),
            value_kind(&value)
        ))),
        other => Err(Error::mismatch(format!(
            "expected a mapping for `{}`, found {}",
            type_name::<T>(),
            other.kind()
        ))),
    }
}

fn downcast<T: Any>(object: Box<dyn Any + Send>) -> Result<T> {
    object.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        Error::mismatch(format!("hydrated object is not a `{}`", type_name::<T>()))
    })
}

#[cfg(test)]
mod tests {
    use super::{FieldType, classify};
    use crate::Value;
    use crate::hydrate::Resolved;
    use crate::info::{ScalarKind, TypeTag};

    #[test]
    fn option_wraps_tag() {
        assert_eq!(<Option<String>>::type_tag(), TypeTag::Scalar(ScalarKind::String));
        assert!(<Option<String>>::nullable());
        assert!(!String::nullable());

        assert_eq!(<Option<u8>>::from_resolved(Resolved::Null).unwrap(), None);
        assert_eq!(
            <Option<u8>>::from_resolved(Resolved::Value(Value::from(7))).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn raw_values_pass_through() {
        let field = classify::<Value>("payload");
        assert_eq!(field.tag(), &TypeTag::Unknown);

        let raw = serde_json::json!({"a": [1, 2]});
        assert_eq!(Value::from_resolved(Resolved::Value(raw.clone())).unwrap(), raw);
        assert_eq!(Value::from_resolved(Resolved::Null).unwrap(), Value::Null);
    }
}
