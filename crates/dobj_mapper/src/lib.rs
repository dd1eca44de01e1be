//! Typed data objects over loosely-typed records.
//!
//! `#[derive(DataObject)]` turns a struct into a data object: it can be
//! hydrated from a raw [`Record`] (a decoded JSON object, a database row, an
//! ORM model) and serialized back into one.
//!
//! Hydration matches keys in camelCase and snake_case, falls back to
//! declared defaults, coerces scalars leniently, normalizes date-times to
//! the [configured](config) timezone and hydrates nested data objects and
//! lists of them recursively.
//!
//! # Examples
//!
//! ```
//! use dobj_mapper::DataObject;
//!
//! #[derive(DataObject, Debug, PartialEq)]
//! struct Developer {
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! #[derive(DataObject, Debug, PartialEq)]
//! struct Project {
//!     title: String,
//!     #[data_object(default = "example.com")]
//!     domain: String,
//!     developers: Vec<Developer>,
//! }
//!
//! #[derive(DataObject, Debug, PartialEq)]
//! struct Company {
//!     title: String,
//!     projects: Vec<Project>,
//! }
//!
//! let company = Company::from_json(r#"{
//!     "title": "Acme",
//!     "projects": [
//!         { "title": "Portal", "developers": [{ "name": "Ali" }] }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(company.projects[0].domain, "example.com");
//! assert_eq!(company.projects[0].developers[0].name, "Ali");
//!
//! let record = company.to_array(true);
//! assert_eq!(Company::from_array(record).unwrap(), company);
//! ```
//!
//! # Attributes
//!
//! See [`derive::DataObject`] for the `#[data_object(...)]` attributes.

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to this crate as `::dobj_mapper`, also inside the
// crate's own tests.
extern crate self as dobj_mapper;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod object;

pub mod cache;
pub mod collection;
pub mod config;
pub mod error;
pub mod hydrate;
pub mod info;
pub mod property;
pub mod record;
pub mod resolve;
pub mod ser;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use dobj_mapper_derive as derive;
pub use dobj_mapper_derive::DataObject;

pub use collection::Collection;
pub use error::{Error, Result};
pub use object::DataObject;
pub use record::{Record, ToRecord};
pub use serde_json::Value;

// -----------------------------------------------------------------------------
// Macro exports

#[doc(hidden)]
pub mod __macro_exports {
    pub use serde_json::json;
}
