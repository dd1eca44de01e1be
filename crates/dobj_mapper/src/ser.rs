//! Serialization of data objects back to raw records.
//!
//! Fields are written in declaration order under their declared name, or
//! under the snake_case name with [`SerializeOptions::snake_case`]. Nested
//! data objects are written as nested mappings with the same options.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{DataObject, Record, Value};

// -----------------------------------------------------------------------------
// SerializeOptions

/// Options of [`serialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Omit fields whose value is `null`.
    pub trim_nulls: bool,
    /// Write snake_case keys instead of the declared names.
    pub snake_case: bool,
}

impl SerializeOptions {
    /// Declared names, nulls kept.
    #[inline]
    pub const fn new() -> Self {
        Self {
            trim_nulls: false,
            snake_case: false,
        }
    }

    #[inline]
    pub const fn with_trim_nulls(mut self, trim_nulls: bool) -> Self {
        self.trim_nulls = trim_nulls;
        self
    }

    #[inline]
    pub const fn with_snake_case(mut self, snake_case: bool) -> Self {
        self.snake_case = snake_case;
        self
    }
}

// -----------------------------------------------------------------------------
// FieldValue

/// Read access to a field value for serialization.
///
/// Implemented by every [`FieldType`](crate::resolve::FieldType).
pub trait FieldValue {
    fn to_value(&self, options: SerializeOptions) -> Value;
}

impl<T: FieldValue> FieldValue for Option<T> {
    #[inline]
    fn to_value(&self, options: SerializeOptions) -> Value {
        match self {
            Some(value) => value.to_value(options),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self, options: SerializeOptions) -> Value {
        Value::Array(self.iter().map(|item| item.to_value(options)).collect())
    }
}

impl FieldValue for Value {
    #[inline]
    fn to_value(&self, _options: SerializeOptions) -> Value {
        self.clone()
    }
}

// -----------------------------------------------------------------------------
// serialize

/// Serializes `object` into a record.
///
/// Never fails: every field value has a raw representation.
///
/// # Examples
///
/// ```
/// use dobj_mapper::DataObject;
/// use dobj_mapper::ser::{SerializeOptions, serialize};
/// use serde_json::json;
///
/// #[derive(DataObject)]
/// struct Developer {
///     full_name: String,
///     email: Option<String>,
/// }
///
/// let dev = Developer { full_name: "Ali".into(), email: None };
///
/// let record = serialize(&dev, SerializeOptions::new());
/// assert_eq!(json!(record), json!({ "fullName": "Ali", "email": null }));
///
/// let options = SerializeOptions::new().with_trim_nulls(true).with_snake_case(true);
/// assert_eq!(json!(serialize(&dev, options)), json!({ "full_name": "Ali" }));
/// ```
pub fn serialize<T: DataObject>(object: &T, options: SerializeOptions) -> Record {
    let info = T::object_info();
    let mut record = Record::new();

    for (index, field) in info.iter().enumerate() {
        let Some(value) = object.field_at(index) else {
            continue;
        };

        let value = value.to_value(options);
        if options.trim_nulls && value.is_null() {
            continue;
        }

        let key = if options.snake_case {
            field.snake_name()
        } else {
            field.name()
        };
        record.insert(String::from(key), value);
    }

    record
}

/// Serializes a data object into a [`Value::Object`].
///
/// Used by the generated [`FieldValue`] impl of every data-object type.
#[inline]
pub fn serialize_value<T: DataObject>(object: &T, options: SerializeOptions) -> Value {
    Value::Object(serialize(object, options))
}
