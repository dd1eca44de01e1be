use alloc::format;
use alloc::string::{String, ToString};

use crate::error::{Error, Result};
use crate::hydrate::{self, ResolvedFields};
use crate::info::ObjectInfo;
use crate::record::{ToRecord, value_kind};
use crate::resolve::FieldType;
use crate::ser::{self, FieldValue, SerializeOptions};
use crate::{Record, Value};

/// A typed record that can be hydrated from and serialized to raw records.
///
/// Implement it with `#[derive(DataObject)]`; the required methods are
/// generated, the provided methods form the public facade.
///
/// # Examples
///
/// ```
/// use dobj_mapper::{DataObject, Record};
///
/// #[derive(DataObject, Debug, PartialEq)]
/// struct Developer {
///     name: String,
///     email: Option<String>,
/// }
///
/// #[derive(DataObject, Debug, PartialEq)]
/// struct Project {
///     title: String,
///     developers: Vec<Developer>,
/// }
///
/// let project = Project::from_json(r#"{
///     "title": "Portal",
///     "developers": [{ "name": "Ali", "email": "ali@example.com" }, { "name": "Vali" }]
/// }"#).unwrap();
///
/// assert_eq!(project.developers.len(), 2);
/// assert_eq!(project.developers[1].email, None);
///
/// let record: Record = project.to_array(true);
/// assert_eq!(Project::from_array(record).unwrap(), project);
/// ```
pub trait DataObject: FieldType {
    /// Builds the metadata of this type.
    ///
    /// Called once per type by the [field cache](crate::cache); use
    /// [`object_info`](Self::object_info) to read it.
    fn describe() -> ObjectInfo;

    /// Moves resolved field values into a new instance.
    ///
    /// `parameters` is the raw input record.
    fn assemble(fields: ResolvedFields, parameters: &Record) -> Result<Self>;

    /// Returns the value of the declared field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn FieldValue>;

    /// Runs after all fields are assigned.
    ///
    /// Derive computed fields here. Returning an error aborts hydration.
    #[inline]
    fn prepare(&mut self, parameters: &Record) -> Result<()> {
        let _ = parameters;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Provided

    /// Returns the cached metadata of this type.
    #[inline]
    fn object_info() -> &'static ObjectInfo {
        crate::cache::fields::<Self>()
    }

    /// Hydrates an instance from a raw record.
    #[inline]
    fn from_array(record: Record) -> Result<Self> {
        hydrate::hydrate(record)
    }

    /// Alias of [`from_array`](Self::from_array).
    #[inline]
    fn create_from_array(record: Record) -> Result<Self> {
        Self::from_array(record)
    }

    /// Hydrates an instance from a value, which must be a mapping.
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(record) => Self::from_array(record),
            other => Err(Error::malformed(format!(
                "expected a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Hydrates an instance from a record source, e.g. an ORM model.
    #[inline]
    fn from_record<R: ToRecord + ?Sized>(source: &R) -> Result<Self> {
        Self::from_array(source.to_record())
    }

    /// Alias of [`from_record`](Self::from_record).
    #[inline]
    fn from_model<R: ToRecord + ?Sized>(model: &R) -> Result<Self> {
        Self::from_record(model)
    }

    /// Alias of [`from_record`](Self::from_record).
    #[inline]
    fn create_from_record<R: ToRecord + ?Sized>(source: &R) -> Result<Self> {
        Self::from_record(source)
    }

    /// Hydrates an instance from JSON text.
    ///
    /// Fails with [`Error::MalformedInput`] on invalid JSON or a top level
    /// that is not an object.
    fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Alias of [`from_json`](Self::from_json).
    #[inline]
    fn create_from_json(json: &str) -> Result<Self> {
        Self::from_json(json)
    }

    /// Serializes into a record keyed by declared names.
    #[inline]
    fn to_array(&self, trim_nulls: bool) -> Record {
        ser::serialize(self, SerializeOptions::new().with_trim_nulls(trim_nulls))
    }

    /// Serializes into a record keyed by snake_case names.
    #[inline]
    fn to_snake_array(&self, trim_nulls: bool) -> Record {
        let options = SerializeOptions::new()
            .with_trim_nulls(trim_nulls)
            .with_snake_case(true);
        ser::serialize(self, options)
    }

    /// Alias of [`to_array`](Self::to_array).
    #[inline]
    fn all(&self, trim_nulls: bool) -> Record {
        self.to_array(trim_nulls)
    }

    /// Serializes like [`to_array`](Self::to_array), then removes `keys`.
    ///
    /// Keys are matched against the output, i.e. the declared names.
    fn to_array_forget_property<K: AsRef<str>>(&self, keys: &[K], trim_nulls: bool) -> Record {
        let mut record = self.to_array(trim_nulls);
        record.retain(|key, _| !keys.iter().any(|k| k.as_ref() == key));
        record
    }

    /// Serializes into JSON text.
    fn to_json(&self, trim_nulls: bool) -> String {
        Value::Object(self.to_array(trim_nulls)).to_string()
    }
}
