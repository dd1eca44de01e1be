use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use dobj_utils::case::snake_case;

use crate::DataObject;
use crate::Value;
use crate::info::ObjectInfo;

// -----------------------------------------------------------------------------
// ScalarKind

/// The primitive kind of a [`TypeTag::Scalar`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    String,
    Bool,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
        })
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A reference to the element type of a nested field.
///
/// The [`ObjectInfo`] is only looked up when needed, so describing a type
/// never recurses into the types it nests.
#[derive(Clone, Copy)]
pub struct ObjectRef {
    ty_id: TypeId,
    type_path: &'static str,
    info: fn() -> &'static ObjectInfo,
}

impl ObjectRef {
    /// Returns the reference for the data-object type `T`.
    #[inline]
    pub fn of<T: DataObject>() -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_path: type_name::<T>(),
            info: crate::cache::fields::<T>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the cached metadata of the referenced type.
    #[inline]
    pub fn info(&self) -> &'static ObjectInfo {
        (self.info)()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.type_path).finish()
    }
}

impl PartialEq for ObjectRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty_id == other.ty_id
    }
}

impl Eq for ObjectRef {}

// -----------------------------------------------------------------------------
// OpaqueRef

/// A reference to a type that is built from a raw value by its own
/// constructor, see [`OpaqueValue`](crate::resolve::OpaqueValue).
#[derive(Clone, Copy)]
pub struct OpaqueRef {
    ty_id: TypeId,
    type_path: &'static str,
}

impl OpaqueRef {
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_path: type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for OpaqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueRef").field(&self.type_path).finish()
    }
}

impl PartialEq for OpaqueRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty_id == other.ty_id
    }
}

impl Eq for OpaqueRef {}

// -----------------------------------------------------------------------------
// TypeTag

/// Classification of a declared field type.
///
/// Decides how the hydrator turns a raw value into the field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// Integers, floats, strings and booleans, coerced leniently.
    Scalar(ScalarKind),
    /// A date-time normalized to the configured timezone.
    Temporal,
    /// Another data-object type, hydrated recursively.
    NestedObject(ObjectRef),
    /// A list of another data-object type, each element hydrated recursively.
    NestedObjectList(ObjectRef),
    /// A type constructed from the raw value by its own constructor.
    Opaque(OpaqueRef),
    /// Anything else, passed through unchanged.
    Unknown,
}

impl TypeTag {
    /// Returns the referenced element type of nested fields.
    #[inline]
    pub fn object(&self) -> Option<&ObjectRef> {
        match self {
            Self::NestedObject(r) | Self::NestedObjectList(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn is_nested(&self) -> bool {
        self.object().is_some()
    }
}

// -----------------------------------------------------------------------------
// Field

/// A declared field of a data-object type.
///
/// `name` is the key looked up first during hydration and written during
/// serialization. `snake_name` is the fallback lookup key and the key
/// written by snake-case serialization.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    snake_name: Box<str>,
    tag: TypeTag,
    nullable: bool,
    type_path: &'static str,
    default: Option<fn() -> Value>,
}

impl Field {
    /// Creates a field without default value.
    ///
    /// Usually built through [`classify`](crate::resolve::classify).
    pub fn new(name: &'static str, tag: TypeTag, nullable: bool, type_path: &'static str) -> Self {
        Self {
            name,
            snake_name: snake_case(name).into_boxed_str(),
            tag,
            nullable,
            type_path,
            default: None,
        }
    }

    /// Sets the declared default value, used when no key of the raw record
    /// matches.
    #[inline]
    pub fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Replaces the snake_case key derived from the declared name.
    ///
    /// The derive passes the Rust identifier, e.g. `address_1` for the
    /// declared name `address1`.
    #[inline]
    pub fn with_snake_name(mut self, snake_name: &str) -> Self {
        self.snake_name = Box::from(snake_name);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn snake_name(&self) -> &str {
        &self.snake_name
    }

    #[inline]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Returns `true` for `Option<_>` fields.
    #[inline]
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// The Rust type of the field, as given by [`core::any::type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Evaluates the declared default value.
    #[inline]
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|f| f())
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, ScalarKind, TypeTag};
    use crate::Value;

    #[test]
    fn field_names() {
        let field = Field::new("createdAt", TypeTag::Temporal, true, "i64");
        assert_eq!(field.name(), "createdAt");
        assert_eq!(field.snake_name(), "created_at");
        assert!(field.nullable());
        assert!(!field.has_default());
        assert_eq!(field.default_value(), None);
    }

    #[test]
    fn default_value() {
        let field = Field::new("page", TypeTag::Scalar(ScalarKind::Int), false, "u64")
            .with_default(|| Value::from(1));
        assert_eq!(field.default_value(), Some(Value::from(1)));
        assert_eq!(field.tag().object(), None);
        assert_eq!(ScalarKind::Float.to_string(), "float");
    }
}
