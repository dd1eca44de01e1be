use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::error::Error as StdError;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors raised while hydrating data objects or building property listings.
///
/// Serialization never fails and therefore has no variant here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a mapping: bad JSON text or a non-object top level.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: Cow<'static, str> },

    /// A value could not be turned into the declared type of a field.
    ///
    /// `field` is the path from the outermost hydrated type down to the
    /// failing field, e.g. `projects[1].developers[0].email`.
    #[error("type mismatch at `{type_name}.{field}`: {reason}")]
    TypeMismatch {
        type_name: &'static str,
        field: String,
        reason: Cow<'static, str>,
    },

    /// `create_property` received something that is not a record source.
    #[error("invalid model type: {found}")]
    InvalidModelType { found: &'static str },

    /// A `prepare` hook rejected the hydrated instance.
    #[error("prepare hook failed: {0}")]
    Prepare(#[source] Box<dyn StdError + Send + Sync>),

    /// Bad configuration value, e.g. an unknown timezone specification.
    #[error("invalid configuration: {reason}")]
    Config { reason: Cow<'static, str> },
}

/// A specialized [`Result`](core::result::Result) for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Numeric code of [`Error::InvalidModelType`].
    pub const INVALID_MODEL_TYPE: i32 = -1000;

    /// Returns the numeric code of this error, if it has one.
    ///
    /// ```
    /// use dobj_mapper::Error;
    ///
    /// let err = Error::InvalidModelType { found: "number" };
    /// assert_eq!(err.code(), Some(Error::INVALID_MODEL_TYPE));
    /// ```
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::InvalidModelType { .. } => Some(Self::INVALID_MODEL_TYPE),
            _ => None,
        }
    }

    #[inline]
    pub fn malformed(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// A [`TypeMismatch`](Self::TypeMismatch) without location.
    ///
    /// The hydrator fills in the type and the field path while the error
    /// travels up through [`in_field`](Self::in_field).
    #[inline]
    pub fn mismatch(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::TypeMismatch {
            type_name: "",
            field: String::new(),
            reason: reason.into(),
        }
    }

    /// Wraps a failure reported by a `prepare` hook.
    #[inline]
    pub fn prepare(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Prepare(err.into())
    }

    #[inline]
    pub fn config(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Prefixes the field path of a [`TypeMismatch`](Self::TypeMismatch)
    /// with `field` and records `type_name` as the owning type.
    ///
    /// Other variants are returned unchanged.
    pub fn in_field(self, type_name: &'static str, field: &str) -> Self {
        match self {
            Self::TypeMismatch {
                field: path,
                reason,
                ..
            } => Self::TypeMismatch {
                type_name,
                field: join_path(field, &path),
                reason,
            },
            other => other,
        }
    }

    /// Prefixes the field path with a list index, `[index]`.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::TypeMismatch {
                type_name,
                field: path,
                reason,
            } => Self::TypeMismatch {
                type_name,
                field: join_path(&format!("[{index}]"), &path),
                reason,
            },
            other => other,
        }
    }

    /// Returns the field path of a [`TypeMismatch`](Self::TypeMismatch).
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}

fn join_path(head: &str, tail: &str) -> String {
    if tail.is_empty() {
        String::from(head)
    } else if tail.starts_with('[') {
        format!("{head}{tail}")
    } else {
        format!("{head}.{tail}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(format!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn path_is_built_inside_out() {
        let err = Error::mismatch("expected a mapping")
            .in_field("Developer", "email")
            .at_index(0)
            .in_field("Project", "developers")
            .at_index(1)
            .in_field("Company", "projects");

        assert_eq!(err.field_path(), Some("projects[1].developers[0].email"));
        assert_eq!(
            err.to_string(),
            "type mismatch at `Company.projects[1].developers[0].email`: expected a mapping"
        );
    }

    #[test]
    fn other_variants_pass_through() {
        let err = Error::malformed("eof").in_field("Company", "title");
        assert!(matches!(err, Error::MalformedInput { .. }));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn json_errors_are_malformed_input() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not valid json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }
}
