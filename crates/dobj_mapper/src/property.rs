//! Field listings for new data-object types.
//!
//! Given a sample record, [`create_property`] writes one Rust field
//! declaration per key, ready to paste into a `#[derive(DataObject)]` struct.

use alloc::string::String;

use dobj_utils::case;

use crate::error::{Error, Result};
use crate::record::{ToRecord, value_kind};
use crate::{Record, Value};

/// Writes field declarations for a sample model.
///
/// An object is read as one record. An array is read as a collection of
/// records and its first element is used; it must be an object. Anything
/// else fails with [`Error::InvalidModelType`].
///
/// # Examples
///
/// ```
/// use dobj_mapper::property::create_property;
/// use dobj_mapper::Error;
/// use serde_json::json;
///
/// let fields = create_property(&json!({ "user_id": 1, "full_name": "Ali" }), true).unwrap();
/// assert_eq!(fields, "userId: i64,\npub fullName: String,");
///
/// let err = create_property(&json!(42), false).unwrap_err();
/// assert_eq!(err.code(), Some(Error::INVALID_MODEL_TYPE));
/// ```
pub fn create_property(model: &Value, camel_case: bool) -> Result<String> {
    match model {
        Value::Object(record) => Ok(record_to_fields(record, camel_case)),
        Value::Array(items) => match items.first() {
            Some(Value::Object(record)) => Ok(record_to_fields(record, camel_case)),
            Some(other) => Err(Error::InvalidModelType {
                found: value_kind(other),
            }),
            None => Err(Error::InvalidModelType {
                found: "empty array",
            }),
        },
        other => Err(Error::InvalidModelType {
            found: value_kind(other),
        }),
    }
}

/// [`create_property`] for a single record source.
pub fn create_property_from_record<R: ToRecord + ?Sized>(model: &R, camel_case: bool) -> String {
    record_to_fields(&model.to_record(), camel_case)
}

/// [`create_property`] for a collection of record sources; the first one is
/// used.
pub fn create_property_from_records<R: ToRecord>(models: &[R], camel_case: bool) -> Result<String> {
    models
        .first()
        .map(|model| create_property_from_record(model, camel_case))
        .ok_or(Error::InvalidModelType {
            found: "empty collection",
        })
}

/// Writes one field declaration per key of `record`, one per line.
///
/// | value   | type             |
/// |---------|------------------|
/// | integer | `i64`            |
/// | float   | `f64`            |
/// | string  | `String`         |
/// | array   | `Value`          |
/// | object  | `Value`          |
/// | bool    | `bool`           |
/// | null    | `Option<String>` |
///
/// Keys containing `id` are declared as read-only `i64`, without `pub`.
/// With `camel_case`, keys are converted to camelCase.
pub fn record_to_fields(record: &Record, camel_case: bool) -> String {
    let mut out = String::new();

    for (key, value) in record {
        let read_only = key.contains("id");
        let ty = if read_only {
            "i64"
        } else {
            field_type_name(value)
        };
        let name = if camel_case {
            case::camel_case(key)
        } else {
            key.clone()
        };

        if !out.is_empty() {
            out.push('\n');
        }
        if !read_only {
            out.push_str("pub ");
        }
        out.push_str(&name);
        out.push_str(": ");
        out.push_str(ty);
        out.push(',');
    }

    out
}

fn field_type_name(value: &Value) -> &'static str {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => "i64",
        Value::Number(_) => "f64",
        Value::String(_) => "String",
        Value::Array(_) | Value::Object(_) => "Value",
        Value::Bool(_) => "bool",
        Value::Null => "Option<String>",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{create_property, create_property_from_records, record_to_fields};
    use crate::{Error, Record};

    #[test]
    fn type_mapping() {
        let record = json!({
            "title": "Acme",
            "rating": 4.5,
            "employees": 12,
            "tags": ["a"],
            "active": true,
            "deleted_at": null,
            "parent_id": 3,
        });
        let record = record.as_object().unwrap();

        assert_eq!(
            record_to_fields(record, false),
            "pub title: String,\n\
             pub rating: f64,\n\
             pub employees: i64,\n\
             pub tags: Value,\n\
             pub active: bool,\n\
             pub deleted_at: Option<String>,\n\
             parent_id: i64,"
        );
    }

    #[test]
    fn collections_use_first_record() {
        let model = json!([{ "created_at": "2024-01-31" }, { "other": 1 }]);
        assert_eq!(create_property(&model, true).unwrap(), "pub createdAt: String,");

        let records = vec![Record::new()];
        assert_eq!(create_property_from_records(&records, false).unwrap(), "");

        let empty: Vec<Record> = Vec::new();
        assert!(matches!(
            create_property_from_records(&empty, false),
            Err(Error::InvalidModelType { .. })
        ));
    }

    #[test]
    fn invalid_models() {
        for model in [json!(42), json!("text"), json!(null), json!([]), json!([1, 2])] {
            let err = create_property(&model, false).unwrap_err();
            assert_eq!(err.code(), Some(Error::INVALID_MODEL_TYPE), "{model}");
        }
    }
}
