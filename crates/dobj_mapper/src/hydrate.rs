//! Hydration of data objects from raw records.
//!
//! For every declared field, in declaration order:
//!
//! 1. The raw value is looked up under the declared name, then under its
//!    snake_case form. A `null` counts as absent. Without a match the
//!    declared default is used, and `null` without a default.
//! 2. The raw value is resolved according to the field's [`TypeTag`]:
//!    nested objects and lists are hydrated recursively, temporal values
//!    are parsed and moved to the configured timezone, everything else is
//!    handed to the field type as is.
//! 3. The generated [`DataObject::assemble`] moves the resolved values into
//!    the struct, where scalars are coerced by their [`FieldType`] impls.
//!
//! Then [`DataObject::prepare`] runs. Any error aborts hydration and no
//! instance is returned.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::any::Any;
use core::mem;

use chrono::{DateTime, FixedOffset};

use crate::error::{Error, Result};
use crate::info::{Field, ObjectInfo, TypeTag};
use crate::record::value_kind;
use crate::resolve::{FieldType, parse_temporal};
use crate::{DataObject, Record, Value, config};

// -----------------------------------------------------------------------------
// Resolved

/// The value of one field after type-directed resolution.
#[derive(Debug, Default)]
pub enum Resolved {
    /// No value, or an explicit `null`.
    #[default]
    Null,
    /// A raw value, for scalar, opaque and pass-through fields.
    Value(Value),
    /// A parsed date-time in the configured timezone.
    Temporal(DateTime<FixedOffset>),
    /// A hydrated nested data object.
    Object(Box<dyn Any + Send>),
    /// Hydrated elements of a nested data-object list.
    List(Vec<Box<dyn Any + Send>>),
}

impl Resolved {
    /// Short description of the contents, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Value(value) => value_kind(value),
            Self::Temporal(_) => "date-time",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

// -----------------------------------------------------------------------------
// ResolvedFields

/// Resolved values of all declared fields of one type, in declaration order.
///
/// Passed to [`DataObject::assemble`], which takes each value out by index.
#[derive(Debug)]
pub struct ResolvedFields {
    info: &'static ObjectInfo,
    values: Vec<Resolved>,
}

impl ResolvedFields {
    #[inline]
    pub fn info(&self) -> &'static ObjectInfo {
        self.info
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Takes the value of the field at `index` and converts it to `T`.
    ///
    /// A second take of the same index sees [`Resolved::Null`]. Errors are
    /// located at the field.
    pub fn take<T: FieldType>(&mut self, index: usize) -> Result<T> {
        let resolved = self.values.get_mut(index).map(mem::take).unwrap_or_default();
        T::from_resolved(resolved).map_err(|err| self.locate(err, index))
    }

    fn locate(&self, err: Error, index: usize) -> Error {
        match self.info.field_at(index) {
            Some(field) => err.in_field(self.info.type_name(), field.name()),
            None => err,
        }
    }
}

// -----------------------------------------------------------------------------
// Hydration

/// Hydrates an instance of `T` from a raw record.
///
/// # Examples
///
/// ```
/// use dobj_mapper::{DataObject, hydrate::hydrate};
/// use serde_json::json;
///
/// #[derive(DataObject, Debug)]
/// struct Developer {
///     name: String,
///     #[data_object(default = 30)]
///     age: u32,
/// }
///
/// let record = json!({ "name": "Ali" }).as_object().cloned().unwrap();
/// let dev: Developer = hydrate(record).unwrap();
/// assert_eq!(dev.name, "Ali");
/// assert_eq!(dev.age, 30);
/// ```
pub fn hydrate<T: DataObject>(record: Record) -> Result<T> {
    let info = T::object_info();
    log::trace!("hydrating `{}` from {} keys", info.type_name(), record.len());

    let values = info
        .iter()
        .map(|field| {
            let raw = lookup(field, &record);
            resolve_field(field, raw).map_err(|err| err.in_field(info.type_name(), field.name()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut instance = T::assemble(ResolvedFields { info, values }, &record)?;
    instance.prepare(&record)?;
    Ok(instance)
}

/// [`hydrate`] with the instance boxed, the erased constructor stored in
/// [`ObjectInfo`].
pub fn hydrate_erased<T: DataObject>(record: Record) -> Result<Box<dyn Any + Send>> {
    hydrate::<T>(record).map(|instance| Box::new(instance) as Box<dyn Any + Send>)
}

/// Finds the raw value of `field`: the declared name, the snake_case name,
/// then the declared default. `null` values are skipped.
fn lookup(field: &Field, record: &Record) -> Option<Value> {
    let present = |key: &str| record.get(key).filter(|v| !v.is_null());

    present(field.name())
        .or_else(|| present(field.snake_name()))
        .cloned()
        .or_else(|| field.default_value())
        .filter(|v| !v.is_null())
}

fn resolve_field(field: &Field, raw: Option<Value>) -> Result<Resolved> {
    let Some(raw) = raw else {
        return resolve_null(field);
    };

    match field.tag() {
        TypeTag::Temporal => parse_temporal(&raw, config::timezone()).map(Resolved::Temporal),
        TypeTag::NestedObject(elem) => match raw {
            Value::Object(record) => elem.info().construct(record).map(Resolved::Object),
            other => Err(Error::mismatch(format!(
                "expected a mapping for `{}`, found {}",
                elem.info().type_name(),
                value_kind(&other)
            ))),
        },
        TypeTag::NestedObjectList(elem) => match raw {
            Value::Array(items) => {
                let info = elem.info();
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| construct_element(info, item).map_err(|e| e.at_index(index)))
                    .collect::<Result<Vec<_>>>()
                    .map(Resolved::List)
            }
            other => Err(Error::mismatch(format!(
                "expected a list of `{}`, found {}",
                elem.info().type_name(),
                value_kind(&other)
            ))),
        },
        TypeTag::Scalar(_) | TypeTag::Opaque(_) | TypeTag::Unknown => Ok(Resolved::Value(raw)),
    }
}

fn construct_element(info: &ObjectInfo, item: Value) -> Result<Box<dyn Any + Send>> {
    match item {
        Value::Object(record) => info.construct(record),
        other => Err(Error::mismatch(format!(
            "expected a mapping for `{}`, found {}",
            info.type_name(),
            value_kind(&other)
        ))),
    }
}

fn resolve_null(field: &Field) -> Result<Resolved> {
    if field.nullable() {
        return Ok(Resolved::Null);
    }

    match field.tag() {
        TypeTag::NestedObject(elem) => elem.info().construct(Record::new()).map(Resolved::Object),
        TypeTag::NestedObjectList(_) => Ok(Resolved::List(Vec::new())),
        TypeTag::Temporal => Err(Error::mismatch("missing value for a non-nullable date-time")),
        TypeTag::Scalar(_) | TypeTag::Opaque(_) | TypeTag::Unknown => Ok(Resolved::Null),
    }
}
