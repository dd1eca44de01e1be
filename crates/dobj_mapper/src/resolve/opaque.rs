use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use core::any::type_name;
use core::error::Error as StdError;

use chrono::NaiveDate;

use crate::Value;
use crate::error::{Error, Result};
use crate::hydrate::Resolved;

/// A field type built from the raw value by its own constructor.
///
/// Register an implementor as a field type with
/// [`impl_opaque_field!`](crate::impl_opaque_field). A failing constructor
/// surfaces as [`Error::TypeMismatch`].
///
/// # Examples
///
/// ```
/// use dobj_mapper::resolve::OpaqueValue;
/// use dobj_mapper::{DataObject, Value, impl_opaque_field};
///
/// #[derive(Debug, PartialEq)]
/// struct Email(String);
///
/// impl OpaqueValue for Email {
///     fn from_value(value: Value) -> Result<Self, Box<dyn core::error::Error + Send + Sync>> {
///         match value.as_str() {
///             Some(s) if s.contains('@') => Ok(Email(s.to_owned())),
///             _ => Err(format!("`{value}` is not an email address").into()),
///         }
///     }
///
///     fn to_value(&self) -> Value {
///         Value::from(self.0.as_str())
///     }
/// }
///
/// impl_opaque_field!(Email);
///
/// #[derive(DataObject, Debug)]
/// struct Developer {
///     name: String,
///     email: Email,
/// }
///
/// let dev = Developer::from_json(r#"{"name": "Ali", "email": "ali@example.com"}"#).unwrap();
/// assert_eq!(dev.email, Email("ali@example.com".into()));
///
/// assert!(Developer::from_json(r#"{"name": "Ali", "email": "nope"}"#).is_err());
/// ```
pub trait OpaqueValue: Sized + Send + 'static {
    /// Constructs the value from a raw value, `null` included.
    fn from_value(value: Value) -> Result<Self, Box<dyn StdError + Send + Sync>>;

    /// Converts the value back to its raw form.
    fn to_value(&self) -> Value;
}

/// Runs the constructor of an opaque type on a resolved value.
#[doc(hidden)]
pub fn opaque_from_resolved<T: OpaqueValue>(resolved: Resolved) -> Result<T> {
    let raw = match resolved {
        Resolved::Null => Value::Null,
        Resolved::Value(raw) => raw,
        Resolved::Temporal(dt) => Value::String(dt.to_rfc3339()),
        other => {
            return Err(Error::mismatch(format!(
                "cannot construct `{}` from {}",
                type_name::<T>(),
                other.kind()
            )));
        }
    };

    T::from_value(raw)
        .map_err(|err| Error::mismatch(format!("cannot construct `{}`: {err}", type_name::<T>())))
}

/// Registers an [`OpaqueValue`] implementor as a data-object field type.
///
/// The type is classified as
/// [`TypeTag::Opaque`](crate::info::TypeTag::Opaque): the hydrator hands the
/// raw value to [`OpaqueValue::from_value`] and the serializer writes
/// [`OpaqueValue::to_value`].
#[macro_export]
macro_rules! impl_opaque_field {
    ($ty:ty) => {
        impl $crate::resolve::FieldType for $ty {
            #[inline]
            fn type_tag() -> $crate::info::TypeTag {
                $crate::info::TypeTag::Opaque($crate::info::OpaqueRef::of::<$ty>())
            }

            fn from_resolved(resolved: $crate::hydrate::Resolved) -> $crate::Result<Self> {
                $crate::resolve::opaque_from_resolved::<$ty>(resolved)
            }
        }

        impl $crate::ser::FieldValue for $ty {
            #[inline]
            fn to_value(&self, _options: $crate::ser::SerializeOptions) -> $crate::Value {
                <$ty as $crate::resolve::OpaqueValue>::to_value(self)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Built-in opaque types

const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

impl OpaqueValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        match &value {
            Value::String(s) => Ok(NaiveDate::parse_from_str(s.trim(), NAIVE_DATE_FORMAT)?),
            _ => Err(format!("expected a `YYYY-MM-DD` string, found `{value}`").into()),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.format(NAIVE_DATE_FORMAT).to_string())
    }
}

crate::impl_opaque_field!(NaiveDate);

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::OpaqueValue;
    use crate::hydrate::Resolved;
    use crate::info::TypeTag;
    use crate::resolve::FieldType;
    use crate::ser::{FieldValue, SerializeOptions};
    use crate::{DataObject, Error, Value};

    #[derive(Debug, PartialEq)]
    struct Sku(String);

    impl OpaqueValue for Sku {
        fn from_value(value: Value) -> Result<Self, Box<dyn core::error::Error + Send + Sync>> {
            match value.as_str() {
                Some(s) if s.starts_with("SKU-") => Ok(Sku(s.to_owned())),
                _ => Err(format!("`{value}` is not a stock keeping unit").into()),
            }
        }

        fn to_value(&self) -> Value {
            Value::from(self.0.as_str())
        }
    }

    crate::impl_opaque_field!(Sku);

    #[derive(DataObject, Debug, PartialEq)]
    struct Item {
        sku: Sku,
        replaced_by: Option<Sku>,
        released: Option<NaiveDate>,
    }

    #[test]
    fn opaque_fields_in_data_objects() {
        assert!(matches!(Sku::type_tag(), TypeTag::Opaque(r) if r.is::<Sku>()));

        let item = Item::from_value(json!({ "sku": "SKU-1", "released": "2024-01-31" })).unwrap();
        assert_eq!(item.sku, Sku("SKU-1".into()));
        assert_eq!(item.replaced_by, None);
        assert_eq!(
            serde_json::Value::Object(item.to_array(true)),
            json!({ "sku": "SKU-1", "released": "2024-01-31" })
        );

        let err = Item::from_value(json!({ "sku": "SKU-1", "replacedBy": 7 })).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { type_name: "Item", .. }));
        assert_eq!(err.field_path(), Some("replacedBy"));
    }

    #[test]
    fn naive_date() {
        assert!(matches!(NaiveDate::type_tag(), TypeTag::Opaque(r) if r.is::<NaiveDate>()));

        let date = NaiveDate::from_resolved(Resolved::Value(json!("2024-01-31"))).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(
            FieldValue::to_value(&date, SerializeOptions::new()),
            json!("2024-01-31")
        );

        assert!(NaiveDate::from_resolved(Resolved::Value(json!("31.01.2024"))).is_err());
        assert!(NaiveDate::from_resolved(Resolved::Null).is_err());
        assert_eq!(<Option<NaiveDate>>::from_resolved(Resolved::Null).unwrap(), None);
    }
}
