use alloc::boxed::Box;
use core::any::{Any, TypeId};

use dobj_utils::hash::HashMap;

use crate::error::Result;
use crate::info::Field;
use crate::{DataObject, Record};

/// Erased constructor: hydrates the type from a record and boxes it.
pub type ErasedConstructor = fn(Record) -> Result<Box<dyn Any + Send>>;

/// The declared fields of one data-object type, in declaration order.
///
/// Created by [`DataObject::describe`] and stored once per type in the
/// [field cache](crate::cache).
///
/// # Examples
///
/// ```
/// use dobj_mapper::DataObject;
///
/// #[derive(DataObject, Debug, PartialEq)]
/// struct Developer {
///     name: String,
///     email: Option<String>,
/// }
///
/// let info = Developer::object_info();
/// assert_eq!(info.type_name(), "Developer");
/// assert_eq!(info.field_names().collect::<Vec<_>>(), ["name", "email"]);
/// assert!(info.field("email").unwrap().nullable());
/// ```
#[derive(Debug)]
pub struct ObjectInfo {
    type_id: TypeId,
    type_name: &'static str,
    type_path: &'static str,
    fields: Box<[Field]>,
    indices: HashMap<&'static str, usize>,
    construct: ErasedConstructor,
}

impl ObjectInfo {
    /// Creates the metadata of `T` from its declared fields.
    ///
    /// On duplicate names the first field wins the name lookup; the derive
    /// rejects duplicates at compile time.
    pub fn new<T: DataObject>(type_name: &'static str, fields: impl IntoIterator<Item = Field>) -> Self {
        let fields: Box<[Field]> = fields.into_iter().collect();

        let mut indices = HashMap::with_capacity_and_hasher(fields.len(), Default::default());
        for (index, field) in fields.iter().enumerate() {
            indices.entry(field.name()).or_insert(index);
        }

        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            type_path: core::any::type_name::<T>(),
            fields,
            indices,
            construct: crate::hydrate::hydrate_erased::<T>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The identifier of the type, e.g. `Developer`.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The full path of the type, e.g. `app::model::Developer`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the field with the given declared name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.indices.get(name).map(|&index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Iterates over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(Field::name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Hydrates an instance of the described type and returns it boxed.
    ///
    /// Used for nested fields, whose concrete type the hydrator only knows
    /// through this metadata.
    #[inline]
    pub fn construct(&self, record: Record) -> Result<Box<dyn Any + Send>> {
        (self.construct)(record)
    }
}

impl<'a> IntoIterator for &'a ObjectInfo {
    type Item = &'a Field;
    type IntoIter = core::slice::Iter<'a, Field>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
