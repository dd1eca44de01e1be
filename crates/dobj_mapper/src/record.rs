//! Raw associative input and the capability to produce it.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::BuildHasher;
use std::collections::HashMap;

use serde_json::{Map, Value};

/// A raw record: string keys to loosely-typed values.
///
/// Keys keep their insertion order, so serialized records list fields in
/// declaration order.
pub type Record = Map<String, Value>;

/// Conversion of a record source (an ORM model, a decoded row, a generic
/// map) into a [`Record`].
///
/// # Examples
///
/// ```
/// use dobj_mapper::{Record, ToRecord, Value};
///
/// let row = serde_json::json!({ "id": 1, "title": "Acme" });
/// let record: Record = row.to_record();
/// assert_eq!(record["title"], Value::from("Acme"));
///
/// // Non-object values produce an empty record.
/// assert!(Value::from(42).to_record().is_empty());
/// ```
pub trait ToRecord {
    fn to_record(&self) -> Record;
}

impl ToRecord for Record {
    #[inline]
    fn to_record(&self) -> Record {
        self.clone()
    }
}

impl ToRecord for Value {
    fn to_record(&self) -> Record {
        match self {
            Value::Object(map) => map.clone(),
            _ => Record::new(),
        }
    }
}

impl<S: BuildHasher> ToRecord for HashMap<String, Value, S> {
    fn to_record(&self) -> Record {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl ToRecord for BTreeMap<String, Value> {
    fn to_record(&self) -> Record {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<T: ToRecord + ?Sized> ToRecord for &T {
    #[inline]
    fn to_record(&self) -> Record {
        (**self).to_record()
    }
}

/// Short name of a value's JSON kind, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::{ToRecord, value_kind};
    use crate::Value;

    #[test]
    fn hash_map_source() {
        let mut map = HashMap::new();
        map.insert(String::from("title"), json!("Acme"));
        let record = map.to_record();
        assert_eq!(record.len(), 1);
        assert_eq!(record["title"], json!("Acme"));
    }

    #[test]
    fn kinds() {
        assert_eq!(value_kind(&Value::Null), "null");
        assert_eq!(value_kind(&json!([1])), "array");
        assert_eq!(value_kind(&json!({})), "object");
        assert_eq!(value_kind(&json!(1.5)), "number");
    }
}
